//! Shared helpers for WASM API operations
//!
//! Serialization, deserialization, and validation used across the
//! JavaScript-facing functions. Failures are logged before being handed back.

use wasm_bindgen::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EditorError;
use crate::models::config::EditorConfig;

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    // Plain objects rather than ES Maps for anything map-shaped
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Read an optional config object; `undefined`/`null` mean defaults
pub fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    let config = if value.is_undefined() || value.is_null() {
        EditorConfig::default()
    } else {
        deserialize(value, "Failed to deserialize editor config")?
    };
    config.validate().map_err(error_to_js)?;
    Ok(config)
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log an editor error and convert it for JavaScript
pub fn error_to_js(err: EditorError) -> JsValue {
    log::error!("{}", err);
    JsValue::from(err)
}
