//! Text export
//!
//! Offers a string to the user as a downloaded `text/plain` file through a
//! Blob URL and a transient anchor. Fire-and-forget: nothing is retried.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::{EditorError, Result};

/// Trigger a browser download of `text` named `filename`
pub fn download_text_file(text: &str, filename: &str) -> Result<()> {
    let window = web_sys::window().ok_or(EditorError::NoWindow)?;
    let document = window.document().ok_or(EditorError::NoWindow)?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(EditorError::dom)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(EditorError::dom)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(EditorError::dom)?
        .dyn_into()
        .map_err(|_| EditorError::Dom("created element is not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| EditorError::Dom("document has no body".to_string()))?;
    body.append_child(&anchor).map_err(EditorError::dom)?;
    anchor.click();
    body.remove_child(&anchor).map_err(EditorError::dom)?;
    Url::revoke_object_url(&url).map_err(EditorError::dom)?;

    log::info!("exported {} chars as {}", text.chars().count(), filename);
    Ok(())
}

/// Download `text` as a plain-text file
#[wasm_bindgen(js_name = downloadTextFile)]
pub fn download_text_file_js(text: &str, filename: &str) -> std::result::Result<(), JsValue> {
    download_text_file(text, filename).map_err(JsValue::from)
}
