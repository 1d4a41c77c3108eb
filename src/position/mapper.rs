//! Caret save/restore across a full rebuild
//!
//! `save_selection` turns a native (node, in-node offset) selection into
//! linear offsets over the content text; `restore_selection` resolves those
//! offsets against a freshly built tree. Both walk via [`walk_content`].

use std::ops::ControlFlow;

use super::walk::{contains, content_len, walk_content, ContentTree, Step};
use crate::text::cursor::{LinearOffset, SavedSelection};

/// A point inside a rendered tree, the way a platform selection anchors it.
///
/// For text leaves `offset` counts units into the text; for elements it is
/// a child index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomPoint<N> {
    pub node: N,
    pub offset: usize,
}

impl<N> DomPoint<N> {
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A native selection: start and end anchors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomRange<N> {
    pub start: DomPoint<N>,
    pub end: DomPoint<N>,
}

impl<N: Clone + PartialEq> DomRange<N> {
    pub fn new(start: DomPoint<N>, end: DomPoint<N>) -> Self {
        Self { start, end }
    }

    /// A bare caret at `point`
    pub fn collapsed(point: DomPoint<N>) -> Self {
        Self {
            start: point.clone(),
            end: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Linear offset of `point`, or `None` if the point is not inside `root`.
///
/// Points inside a non-content subtree map to where that subtree begins.
/// In-leaf offsets past the leaf end clamp to the leaf end.
pub fn linear_offset_of<T>(tree: &T, root: &T::Node, point: &DomPoint<T::Node>) -> Option<LinearOffset>
where
    T: ContentTree + ?Sized,
{
    let mut running = 0;
    let mut found = None;

    let _ = walk_content(tree, root, |step| match step {
        Step::Leaf { node, len } => {
            if *node == point.node {
                found = Some(running + point.offset.min(len));
                return ControlFlow::Break(());
            }
            running += len;
            ControlFlow::Continue(())
        }
        Step::Element(node) => {
            if *node == point.node {
                let before: usize = tree
                    .children(node)
                    .iter()
                    .take(point.offset)
                    .map(|child| content_len(tree, child))
                    .sum();
                found = Some(running + before);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }
        Step::Skipped(node) => {
            if contains(tree, node, &point.node) {
                found = Some(running);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        }
    });

    found
}

/// Save the current selection as linear offsets.
///
/// Returns `None` when there is no selection, or when its start anchor lies
/// outside `root`. An end anchor outside `root` collapses onto the start.
pub fn save_selection<T>(
    tree: &T,
    root: &T::Node,
    selection: Option<&DomRange<T::Node>>,
) -> Option<SavedSelection>
where
    T: ContentTree + ?Sized,
{
    let range = selection?;

    let Some(start) = linear_offset_of(tree, root, &range.start) else {
        log::warn!("selection start is outside the editor; not saving caret");
        return None;
    };

    let end = if range.is_collapsed() {
        start
    } else {
        linear_offset_of(tree, root, &range.end).unwrap_or_else(|| {
            log::warn!("selection end is outside the editor; collapsing to start");
            start
        })
    };

    Some(SavedSelection::new(start, end))
}

/// Resolve a linear offset to a leaf and an in-leaf offset.
///
/// The first leaf whose cumulative end reaches `target` wins, so an offset on
/// a leaf boundary lands at the end of the earlier leaf. Offsets past the end
/// clamp to the end of the last leaf. `None` if the tree has no text leaves.
pub fn resolve_offset<T>(tree: &T, root: &T::Node, target: LinearOffset) -> Option<DomPoint<T::Node>>
where
    T: ContentTree + ?Sized,
{
    let mut running = 0;
    let mut found = None;
    let mut last_leaf: Option<(T::Node, usize)> = None;

    let _ = walk_content(tree, root, |step| {
        if let Step::Leaf { node, len } = step {
            if running + len >= target {
                found = Some(DomPoint::new(node.clone(), target - running));
                return ControlFlow::Break(());
            }
            running += len;
            last_leaf = Some((node.clone(), len));
        }
        ControlFlow::Continue(())
    });

    if found.is_some() {
        return found;
    }

    let (node, len) = last_leaf?;
    log::warn!("caret offset {} past end of content ({}); clamping", target, running);
    Some(DomPoint::new(node, len))
}

/// Resolve a saved selection against a (new) tree.
///
/// Returns `None` if the tree has no text leaves; callers leave the native
/// selection untouched in that case.
pub fn restore_selection<T>(
    tree: &T,
    root: &T::Node,
    saved: &SavedSelection,
) -> Option<DomRange<T::Node>>
where
    T: ContentTree + ?Sized,
{
    let start = resolve_offset(tree, root, saved.start)?;
    if saved.is_collapsed() {
        return Some(DomRange::collapsed(start));
    }

    let end = resolve_offset(tree, root, saved.end).unwrap_or_else(|| start.clone());
    Some(DomRange::new(start, end))
}
