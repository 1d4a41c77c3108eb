//! Processing cycle
//!
//! One cycle: save caret as linear offsets, read the text, segment it,
//! re-attach annotations, render, replace the surface content, restore the
//! caret. The controller owns the only state that lives between cycles: the
//! busy flag, the last block sequence and its annotations, and the boundary
//! outline toggle.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::html_layout::document::{render_blocks, RenderOptions};
use crate::html_layout::node::RenderTree;
use crate::models::block::Block;
use crate::models::config::EditorConfig;
use crate::position::mapper::{restore_selection, save_selection, DomRange};
use crate::position::walk::{flatten_text, ContentTree};
use crate::text::annotations::{AnnotationLayer, Importance};
use crate::text::cursor::SavedSelection;
use crate::text::segment::segment;

pub use memory::MemorySurface;

/// The live editing surface a cycle reads from and rebuilds.
///
/// Implemented over the browser DOM and over an in-memory [`RenderTree`].
pub trait EditorSurface: ContentTree {
    /// The editor root; everything under it is the document
    fn root(&self) -> Self::Node;

    /// Current native selection, if any
    fn selection(&self) -> Option<DomRange<Self::Node>>;

    fn set_selection(&mut self, range: &DomRange<Self::Node>);

    /// Discard the current content and replace it with `rendered`'s children
    fn rebuild(&mut self, rendered: &RenderTree);

    /// Document text with decorations excluded
    fn plain_text(&self) -> String {
        flatten_text(self, &self.root())
    }
}

/// Outcome of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Key does not end a block
    Ignored,
    /// A cycle is already scheduled or running
    Busy,
    /// Caller should run a cycle after `delay_ms`
    Scheduled { delay_ms: u32 },
}

/// Summary of a finished cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub block_count: usize,
    /// Content length in chars
    pub text_len: usize,
    /// Caret saved before the rebuild
    pub caret: Option<SavedSelection>,
    /// Whether a caret was re-applied to the new content
    pub restored: bool,
}

/// Controller for the save → segment → rebuild → restore cycle
#[derive(Debug, Clone)]
pub struct ProcessingCycle {
    config: EditorConfig,
    busy: bool,
    blocks: Vec<String>,
    annotations: AnnotationLayer,
    show_block_boundaries: bool,
}

impl ProcessingCycle {
    pub fn new(config: EditorConfig) -> Self {
        let show_block_boundaries = config.show_block_boundaries;
        Self {
            config,
            busy: false,
            blocks: Vec::new(),
            annotations: AnnotationLayer::new(),
            show_block_boundaries,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Blocks produced by the last cycle
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn annotations(&self) -> &AnnotationLayer {
        &self.annotations
    }

    pub fn show_block_boundaries(&self) -> bool {
        self.show_block_boundaries
    }

    /// Blocks joined with their annotations
    pub fn block_views(&self) -> Vec<Block> {
        Block::collect(&self.blocks, &self.annotations)
    }

    /// Handle a key-up. Trigger keys schedule one cycle; further triggers are
    /// dropped until that cycle has run.
    pub fn on_key(&mut self, key: &str) -> Trigger {
        if !self.config.is_trigger_key(key) {
            return Trigger::Ignored;
        }
        if self.busy {
            log::debug!("cycle already pending; ignoring '{}'", key);
            return Trigger::Busy;
        }
        self.busy = true;
        Trigger::Scheduled {
            delay_ms: self.config.debounce_ms,
        }
    }

    /// Run the cycle a trigger key scheduled, then clear the busy flag.
    pub fn run_scheduled<S>(&mut self, surface: &mut S) -> CycleReport
    where
        S: EditorSurface + ?Sized,
    {
        let report = self.run(surface);
        self.busy = false;
        report
    }

    /// Drop a scheduled cycle that can no longer run
    pub fn cancel_scheduled(&mut self) {
        self.busy = false;
    }

    /// Run one full cycle against `surface`.
    ///
    /// Leaves the busy flag alone; only `run_scheduled` clears it.
    pub fn run<S>(&mut self, surface: &mut S) -> CycleReport
    where
        S: EditorSurface + ?Sized,
    {
        let root = surface.root();
        let caret = save_selection(&*surface, &root, surface.selection().as_ref());

        let text = surface.plain_text();
        let blocks = segment(&text);
        self.annotations = self.annotations.realign(&self.blocks, &blocks);
        self.blocks = blocks;

        let rendered = self.render();
        surface.rebuild(&rendered);

        let restored = match caret {
            Some(saved) => {
                let root = surface.root();
                match restore_selection(&*surface, &root, &saved) {
                    Some(range) => {
                        surface.set_selection(&range);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        };

        let report = CycleReport {
            block_count: self.blocks.len(),
            text_len: text.chars().count(),
            caret,
            restored,
        };
        log::debug!(
            "cycle: {} blocks, {} chars, caret {:?}, restored {}",
            report.block_count,
            report.text_len,
            report.caret,
            report.restored
        );
        report
    }

    /// Render the current blocks without touching any surface
    pub fn render(&self) -> RenderTree {
        render_blocks(
            &self.blocks,
            &self.annotations,
            &RenderOptions {
                config: &self.config,
                show_block_boundaries: self.show_block_boundaries,
            },
        )
    }

    /// Tag a block and re-render
    pub fn set_importance<S>(&mut self, surface: &mut S, index: usize, importance: Importance) -> Result<CycleReport>
    where
        S: EditorSurface + ?Sized,
    {
        self.check_index(index)?;
        self.annotations.set_importance(index, importance);
        Ok(self.run(surface))
    }

    /// Collapse or expand a block and re-render; returns the new collapsed state
    pub fn toggle_collapsed<S>(&mut self, surface: &mut S, index: usize) -> Result<bool>
    where
        S: EditorSurface + ?Sized,
    {
        self.check_index(index)?;
        let collapsed = self.annotations.toggle_collapsed(index);
        self.run(surface);
        Ok(collapsed)
    }

    /// Flip the block outline toggle and re-render; returns the new state
    pub fn toggle_block_boundaries<S>(&mut self, surface: &mut S) -> bool
    where
        S: EditorSurface + ?Sized,
    {
        self.show_block_boundaries = !self.show_block_boundaries;
        self.run(surface);
        self.show_block_boundaries
    }

    /// Flat text for export, decorations excluded
    pub fn export_text<S>(&self, surface: &S) -> String
    where
        S: EditorSurface + ?Sized,
    {
        surface.plain_text()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.blocks.len() {
            return Err(EditorError::BlockIndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        Ok(())
    }
}

impl Default for ProcessingCycle {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
