//! Block view
//!
//! A segmented block joined with its presentation metadata, as handed to
//! JavaScript.

use serde::{Deserialize, Serialize};

use crate::text::annotations::{AnnotationLayer, Importance};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    pub text: String,
    pub importance: Importance,
    pub collapsed: bool,
}

impl Block {
    /// Pair each block string with its annotation
    pub fn collect(blocks: &[String], annotations: &AnnotationLayer) -> Vec<Block> {
        blocks
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let annotation = annotations.get(index);
                Block {
                    index,
                    text: text.clone(),
                    importance: annotation.importance,
                    collapsed: annotation.collapsed,
                }
            })
            .collect()
    }
}
