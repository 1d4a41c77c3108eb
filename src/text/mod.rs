//! Layer 0: Text
//!
//! Pure text handling with no knowledge of the rendered tree.
//!
//! ## Modules
//!
//! - `segment`: splitting a text snapshot into blocks
//! - `cursor`: caret/selection as linear offsets
//! - `annotations`: importance and collapse metadata per block

pub mod segment;
pub mod cursor;
pub mod annotations;

// Re-exports for convenience
pub use segment::{segment, segment_spans};
pub use cursor::{LinearOffset, SavedSelection};
pub use annotations::{AnnotationLayer, BlockAnnotation, Importance};
