//! Stateless WASM API
//!
//! Segmentation and rendering exposed as plain functions, for callers that
//! manage the DOM themselves.

use wasm_bindgen::prelude::*;

use super::helpers::{config_from_js, serialize};
use crate::html_layout::document::{render_blocks, RenderOptions};
use crate::html_layout::html::inner_html;
use crate::text::annotations::AnnotationLayer;
use crate::text::segment::segment;

/// Split text into blocks
///
/// # Returns
/// JavaScript array of block strings, in document order
#[wasm_bindgen(js_name = segmentText)]
pub fn segment_text(text: &str) -> Result<JsValue, JsValue> {
    let blocks = segment(text);
    log::debug!("segmentText: {} blocks", blocks.len());
    serialize(&blocks, "Failed to serialize blocks")
}

/// Segment `text` and render it to block markup (no annotations)
///
/// # Parameters
/// - `text`: the document text
/// - `config_js`: optional editor config object (palette, boundary outlines)
#[wasm_bindgen(js_name = renderBlocksHtml)]
pub fn render_blocks_html(text: &str, config_js: JsValue) -> Result<String, JsValue> {
    let config = config_from_js(config_js)?;
    let blocks = segment(text);
    let tree = render_blocks(
        &blocks,
        &AnnotationLayer::new(),
        &RenderOptions {
            config: &config,
            show_block_boundaries: config.show_block_boundaries,
        },
    );
    Ok(inner_html(&tree, tree.root()))
}
