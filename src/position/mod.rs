//! Position mapping between rendered trees and linear offsets
//!
//! - `walk`: the [`ContentTree`] view and the shared pre-order traversal
//! - `mapper`: caret save (tree -> offsets) and restore (offsets -> tree)

pub mod walk;
pub mod mapper;

pub use walk::{content_len, flatten_text, walk_content, walk_preorder, ContentTree, Step};
pub use mapper::{
    linear_offset_of, resolve_offset, restore_selection, save_selection, DomPoint, DomRange,
};
