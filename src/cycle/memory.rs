//! In-memory editing surface
//!
//! A [`RenderTree`] plus a selection, standing in for the DOM. Typing goes
//! through `type_text`, which edits the leaf under the caret the way a
//! contenteditable would.

use std::borrow::Cow;

use super::EditorSurface;
use crate::html_layout::node::{NodeId, RenderTree};
use crate::position::mapper::{resolve_offset, save_selection, DomPoint, DomRange};
use crate::position::walk::ContentTree;
use crate::text::cursor::{LinearOffset, SavedSelection};

#[derive(Debug, Clone)]
pub struct MemorySurface {
    tree: RenderTree,
    selection: Option<DomRange<NodeId>>,
}

impl MemorySurface {
    /// An empty editor
    pub fn new() -> Self {
        Self {
            tree: RenderTree::new("div"),
            selection: None,
        }
    }

    /// An editor holding `text` as a single unsegmented leaf
    pub fn from_text(text: &str) -> Self {
        let mut tree = RenderTree::new("div");
        let root = tree.root();
        tree.append_text(root, text);
        Self {
            tree,
            selection: None,
        }
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// Place a bare caret at a linear offset (clamped to the content)
    pub fn set_caret(&mut self, offset: LinearOffset) {
        self.select(offset, offset);
    }

    /// Select between two linear offsets
    pub fn select(&mut self, start: LinearOffset, end: LinearOffset) {
        let root = self.tree.root();
        let start = resolve_offset(&self.tree, &root, start);
        let end = resolve_offset(&self.tree, &root, end);
        self.selection = match (start, end) {
            (Some(start), Some(end)) => Some(DomRange::new(start, end)),
            _ => None,
        };
    }

    /// Current selection as linear offsets
    pub fn caret(&self) -> Option<SavedSelection> {
        let root = self.tree.root();
        save_selection(&self.tree, &root, self.selection.as_ref())
    }

    /// Replace the selection with `text`, leaving a caret after it.
    ///
    /// Only selections within a single leaf are edited; anything else is a no-op.
    pub fn type_text(&mut self, text: &str) {
        let Some(range) = self.selection.clone() else {
            return;
        };
        if range.start.node != range.end.node {
            return;
        }

        let leaf = range.start.node;
        let (from, to) = (
            range.start.offset.min(range.end.offset),
            range.start.offset.max(range.end.offset),
        );
        self.tree.delete_text(leaf, from, to - from);
        self.tree.insert_text(leaf, from, text);

        let caret = DomPoint::new(leaf, from + text.chars().count());
        self.selection = Some(DomRange::collapsed(caret));
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree for MemorySurface {
    type Node = NodeId;

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.tree.children(node)
    }

    fn leaf_text(&self, node: &NodeId) -> Option<Cow<'_, str>> {
        self.tree.leaf_text(node)
    }

    fn is_non_content(&self, node: &NodeId) -> bool {
        self.tree.is_non_content(node)
    }
}

impl EditorSurface for MemorySurface {
    fn root(&self) -> NodeId {
        self.tree.root()
    }

    fn selection(&self) -> Option<DomRange<NodeId>> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: &DomRange<NodeId>) {
        self.selection = Some(range.clone());
    }

    fn rebuild(&mut self, rendered: &RenderTree) {
        self.tree = rendered.clone();
        // old node ids are meaningless in the new tree
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_text_at_caret() {
        let mut surface = MemorySurface::from_text("Hello world");
        surface.set_caret(5);
        surface.type_text(",");
        assert_eq!(surface.plain_text(), "Hello, world");
        assert_eq!(surface.caret(), Some(SavedSelection::collapsed(6)));
    }

    #[test]
    fn test_type_text_replaces_selection() {
        let mut surface = MemorySurface::from_text("Hello world");
        surface.select(6, 11);
        surface.type_text("there.");
        assert_eq!(surface.plain_text(), "Hello there.");
        assert_eq!(surface.caret(), Some(SavedSelection::collapsed(12)));
    }

    #[test]
    fn test_empty_surface_has_no_caret() {
        let mut surface = MemorySurface::new();
        surface.set_caret(0);
        assert_eq!(surface.caret(), None);
    }
}
