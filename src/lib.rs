//! Block Draft Editor WASM Module
//!
//! Re-segments plain text into blocks (sentences and parenthetical asides) on
//! every qualifying edit, renders each block with tagging/collapse controls,
//! and keeps the caret in place across the full rebuild.
//!
//! ## Layers
//!
//! - [`text`]: segmentation, linear caret offsets, block annotations
//! - [`position`]: mapping between rendered trees and linear offsets
//! - [`html_layout`]: the rendering step and its markup
//! - [`cycle`]: the save → segment → rebuild → restore controller
//! - [`api`]: the JavaScript-facing surface

pub mod api;
pub mod cycle;
pub mod error;
pub mod html_layout;
pub mod models;
pub mod position;
pub mod text;
pub mod utils;

// Re-export commonly used types
pub use cycle::{CycleReport, EditorSurface, MemorySurface, ProcessingCycle, Trigger};
pub use error::EditorError;
pub use models::{Block, EditorConfig};
pub use position::{restore_selection, save_selection, ContentTree, DomPoint, DomRange};
pub use text::{segment, AnnotationLayer, Importance, SavedSelection};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();
    log::info!("Block editor WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    // the host page may have installed a logger already
    let _ = console_log::init_with_level(log::Level::Debug);
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
