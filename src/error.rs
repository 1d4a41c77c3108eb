//! Error types for the editor boundary
//!
//! The core algorithms never fail; these cover user input and the JS/DOM edge.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// A value could not cross the JS boundary
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Block index {index} out of bounds (blocks: {len})")]
    BlockIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown importance level: '{0}'")]
    UnknownImportance(String),

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("No global window available")]
    NoWindow,
}

impl EditorError {
    /// Wrap a thrown JS value
    pub fn dom(value: JsValue) -> Self {
        EditorError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<EditorError> for JsValue {
    fn from(err: EditorError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for EditorError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        EditorError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
