//! Annotation layer for block metadata
//!
//! Importance tags and collapse flags belong to the presentation side, not to
//! segmentation. They are stored per block and re-attached after every
//! re-segmentation by matching block text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// Importance level a user can tag a block with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[default]
    None,
    Low,
    Medium,
    High,
    Urgent,
    Omit,
}

impl Importance {
    /// All levels, in the order the controls show them
    pub const ALL: [Importance; 6] = [
        Importance::None,
        Importance::Low,
        Importance::Medium,
        Importance::High,
        Importance::Urgent,
        Importance::Omit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::None => "none",
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
            Importance::Urgent => "urgent",
            Importance::Omit => "omit",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Importance::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::UnknownImportance(s.to_string()))
    }
}

/// Presentation metadata for one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockAnnotation {
    pub importance: Importance,
    pub collapsed: bool,
}

impl BlockAnnotation {
    pub fn is_default(&self) -> bool {
        *self == BlockAnnotation::default()
    }
}

/// Per-block annotations, parallel to the current block sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLayer {
    entries: Vec<BlockAnnotation>,
}

impl AnnotationLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotation for a block, default if never tagged
    pub fn get(&self, index: usize) -> BlockAnnotation {
        self.entries.get(index).copied().unwrap_or_default()
    }

    pub fn set_importance(&mut self, index: usize, importance: Importance) {
        self.slot(index).importance = importance;
    }

    /// Flip the collapsed flag, returning the new value
    pub fn toggle_collapsed(&mut self, index: usize) -> bool {
        let slot = self.slot(index);
        slot.collapsed = !slot.collapsed;
        slot.collapsed
    }

    fn slot(&mut self, index: usize) -> &mut BlockAnnotation {
        if self.entries.len() <= index {
            self.entries.resize(index + 1, BlockAnnotation::default());
        }
        &mut self.entries[index]
    }

    /// Re-attach annotations after `old_blocks` was re-segmented into `new_blocks`.
    ///
    /// A new block takes the annotation of the first unused old block with
    /// identical text. When the block count did not change, blocks left
    /// unmatched inherit from the old block at the same index, so editing
    /// inside a tagged block keeps its tag.
    pub fn realign(&self, old_blocks: &[String], new_blocks: &[String]) -> AnnotationLayer {
        let mut used = vec![false; old_blocks.len()];
        let mut entries = vec![BlockAnnotation::default(); new_blocks.len()];
        let mut matched = vec![false; new_blocks.len()];

        for (new_idx, text) in new_blocks.iter().enumerate() {
            let hit = old_blocks
                .iter()
                .enumerate()
                .position(|(old_idx, old)| !used[old_idx] && old == text);
            if let Some(old_idx) = hit {
                used[old_idx] = true;
                matched[new_idx] = true;
                entries[new_idx] = self.get(old_idx);
            }
        }

        if old_blocks.len() == new_blocks.len() {
            for idx in 0..new_blocks.len() {
                if !matched[idx] && !used[idx] {
                    used[idx] = true;
                    entries[idx] = self.get(idx);
                }
            }
        }

        let mut layer = AnnotationLayer { entries };
        layer.trim();
        layer
    }

    fn trim(&mut self) {
        while self.entries.last().is_some_and(BlockAnnotation::is_default) {
            self.entries.pop();
        }
    }

    /// Number of blocks carrying a non-default annotation
    pub fn tagged_count(&self) -> usize {
        self.entries.iter().filter(|a| !a.is_default()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_importance_parse() {
        assert_eq!("urgent".parse::<Importance>().unwrap(), Importance::Urgent);
        assert_eq!(" High ".parse::<Importance>().unwrap(), Importance::High);
        assert!("critical".parse::<Importance>().is_err());
    }

    #[test]
    fn test_untagged_block_is_default() {
        let layer = AnnotationLayer::new();
        assert!(layer.get(7).is_default());
    }

    #[test]
    fn test_toggle_collapsed() {
        let mut layer = AnnotationLayer::new();
        assert!(layer.toggle_collapsed(2));
        assert!(layer.get(2).collapsed);
        assert!(!layer.toggle_collapsed(2));
    }

    #[test]
    fn test_realign_follows_text_when_blocks_shift() {
        let mut layer = AnnotationLayer::new();
        layer.set_importance(1, Importance::High);

        let old = blocks(&["A. ", "B. "]);
        let new = blocks(&["Z. ", "A. ", "B. "]);
        let moved = layer.realign(&old, &new);

        assert_eq!(moved.get(2).importance, Importance::High);
        assert_eq!(moved.get(1).importance, Importance::None);
        assert_eq!(moved.get(0).importance, Importance::None);
    }

    #[test]
    fn test_realign_keeps_tag_on_edited_block() {
        let mut layer = AnnotationLayer::new();
        layer.set_importance(0, Importance::Urgent);
        layer.toggle_collapsed(0);

        let old = blocks(&["Fix this. ", "Other."]);
        let new = blocks(&["Fix this now. ", "Other."]);
        let moved = layer.realign(&old, &new);

        assert_eq!(moved.get(0).importance, Importance::Urgent);
        assert!(moved.get(0).collapsed);
    }

    #[test]
    fn test_realign_drops_unmatched_when_count_changes() {
        let mut layer = AnnotationLayer::new();
        layer.set_importance(0, Importance::Low);

        let old = blocks(&["One two"]);
        let new = blocks(&["One. ", "two"]);
        let moved = layer.realign(&old, &new);

        assert_eq!(moved.tagged_count(), 0);
    }
}
