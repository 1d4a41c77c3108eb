//! Editor configuration
//!
//! Passed in from JavaScript as a plain object (or JSON). Every field has a
//! default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::text::annotations::Importance;

/// Colour for each importance level
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    pub none: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    pub urgent: String,
    pub omit: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            none: "#333333".to_string(),
            low: "#0099cc".to_string(),
            medium: "#ff9900".to_string(),
            high: "#cc0000".to_string(),
            urgent: "#ff0000".to_string(),
            omit: "#999999".to_string(),
        }
    }
}

impl Palette {
    pub fn color(&self, importance: Importance) -> &str {
        match importance {
            Importance::None => &self.none,
            Importance::Low => &self.low,
            Importance::Medium => &self.medium,
            Importance::High => &self.high,
            Importance::Urgent => &self.urgent,
            Importance::Omit => &self.omit,
        }
    }
}

/// Configuration for the processing cycle and rendering
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Key values (as in `KeyboardEvent.key`) that schedule a re-segmentation
    pub trigger_keys: Vec<String>,

    /// Delay between a trigger key and the cycle it schedules
    pub debounce_ms: u32,

    /// File name offered for text export
    pub export_filename: String,

    pub palette: Palette,

    /// Initial state of the block outline toggle
    pub show_block_boundaries: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            trigger_keys: [".", "?", "!", "。", "？", "！", ")"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            debounce_ms: 100,
            export_filename: "draft.txt".to_string(),
            palette: Palette::default(),
            show_block_boundaries: false,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trigger_keys.is_empty() {
            return Err(EditorError::InvalidConfig(
                "trigger_keys must not be empty".to_string(),
            ));
        }
        if let Some(level) = Importance::ALL
            .iter()
            .find(|level| self.palette.color(**level).trim().is_empty())
        {
            return Err(EditorError::InvalidConfig(format!(
                "palette colour for '{}' is empty",
                level
            )));
        }
        if self.export_filename.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "export_filename must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_trigger_key(&self, key: &str) -> bool {
        self.trigger_keys.iter().any(|k| k == key)
    }
}
