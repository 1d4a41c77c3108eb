//! Models module for the block editor
//!
//! Configuration and the block view handed across the JS boundary.

pub mod config;
pub mod block;

// Re-export commonly used types
pub use config::{EditorConfig, Palette};
pub use block::Block;
