//! Block Editor WASM API
//!
//! The JavaScript-facing surface of the editor.
//!
//! # Module Structure
//!
//! - `helpers`: serialization, config parsing, error conversion
//! - `types`: values returned to JavaScript
//! - `core`: stateless segmentation and rendering
//! - `position`: caret save/restore on any element
//! - `dom`: the DOM-backed editing surface
//! - `editor`: the `BlockEditor` class driving the processing cycle
//! - `export`: plain-text download

pub mod helpers;
pub mod types;
pub mod core;
pub mod position;
pub mod dom;
pub mod editor;
pub mod export;

pub use self::core::{segment_text, render_blocks_html};
pub use position::{save_selection_js, restore_selection_js};
pub use dom::DomSurface;
pub use editor::BlockEditor;
pub use export::download_text_file;
