//! Utility modules for the block editor

pub mod performance;

pub use performance::*;
