//! Shared types for the WASM API

use serde::{Deserialize, Serialize};

use crate::models::block::Block;

/// Editor state as seen from JavaScript
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EditorSnapshot {
    pub blocks: Vec<Block>,
    pub show_block_boundaries: bool,
    /// A cycle is scheduled but has not run yet
    pub pending: bool,
}
