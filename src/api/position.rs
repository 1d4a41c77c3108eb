//! Caret save/restore on an arbitrary editor element
//!
//! Thin wrappers over the position mapper for callers that rebuild the
//! element's content themselves.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::dom::DomSurface;
use super::helpers::{deserialize, serialize};
use crate::cycle::EditorSurface;
use crate::position::mapper::{restore_selection, save_selection};
use crate::text::cursor::SavedSelection;

/// Save the page selection as linear offsets into `root`'s content
///
/// # Returns
/// `{ start, end }`, or `null` if there is no selection inside `root`
#[wasm_bindgen(js_name = saveSelection)]
pub fn save_selection_js(root: &HtmlElement) -> Result<JsValue, JsValue> {
    let surface = DomSurface::new(root.clone());
    let node = surface.root();
    let saved = save_selection(&surface, &node, surface.selection().as_ref());
    serialize(&saved, "Failed to serialize selection")
}

/// Re-apply offsets from `saveSelection` to `root`'s (rebuilt) content
///
/// # Returns
/// `true` if a selection was set; `false` if `root` has no text to place it in
#[wasm_bindgen(js_name = restoreSelection)]
pub fn restore_selection_js(root: &HtmlElement, saved_js: JsValue) -> Result<bool, JsValue> {
    if saved_js.is_null() || saved_js.is_undefined() {
        return Ok(false);
    }
    let saved: SavedSelection = deserialize(saved_js, "Failed to deserialize selection")?;

    let mut surface = DomSurface::new(root.clone());
    let node = surface.root();
    match restore_selection(&surface, &node, &saved) {
        Some(range) => {
            surface.set_selection(&range);
            Ok(true)
        }
        None => Ok(false),
    }
}
