//! HTML Layout
//!
//! The rendering step: turns the segmented block sequence into a tree of
//! elements and text leaves, and serializes that tree to markup for the DOM.

pub mod node;
pub mod document;
pub mod html;

pub use node::{NodeId, NodeKind, RenderTree};
pub use document::{render_blocks, RenderOptions};
pub use html::inner_html;
