//! Pre-order traversal over rendered trees
//!
//! Both caret save and caret restore walk the tree through this module, with
//! the same exclusion rule, so they agree on one offset space even though the
//! tree is rebuilt between them.

use std::borrow::Cow;
use std::ops::ControlFlow;

/// Read-only view of a rendered tree, as the position mapper sees it.
///
/// A node is either a text-bearing leaf (`leaf_text` returns `Some`) or an
/// element with ordered children. Elements may be flagged non-content, in
/// which case their whole subtree is invisible to offset computations.
pub trait ContentTree {
    type Node: Clone + PartialEq;

    /// Ordered children of an element. Leaves have none.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Text of a text-bearing leaf, `None` for elements
    fn leaf_text(&self, node: &Self::Node) -> Option<Cow<'_, str>>;

    /// True for decoration subtrees (controls, affordances)
    fn is_non_content(&self, node: &Self::Node) -> bool;

    /// Length of a text leaf in this tree's offset unit.
    ///
    /// Defaults to Unicode scalar values. Trees backed by a platform with its
    /// own offset unit override this.
    fn text_len(&self, node: &Self::Node) -> Option<usize> {
        self.leaf_text(node).map(|text| text.chars().count())
    }
}

/// One step of a pre-order walk
#[derive(Debug)]
pub enum Step<'a, N> {
    /// Entering an element whose children will be walked next
    Element(&'a N),
    /// A text-bearing leaf and its length
    Leaf { node: &'a N, len: usize },
    /// Root of an excluded subtree; its descendants are not visited
    Skipped(&'a N),
}

/// Walk `root` in pre-order, skipping every subtree whose root matches `excluded`.
///
/// Returns `Break` if the visitor stopped the walk early.
pub fn walk_preorder<T, P, F>(tree: &T, root: &T::Node, excluded: P, mut visit: F) -> ControlFlow<()>
where
    T: ContentTree + ?Sized,
    P: Fn(&T::Node) -> bool,
    F: FnMut(Step<'_, T::Node>) -> ControlFlow<()>,
{
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if excluded(&node) {
            visit(Step::Skipped(&node))?;
            continue;
        }

        if let Some(len) = tree.text_len(&node) {
            visit(Step::Leaf { node: &node, len })?;
            continue;
        }

        visit(Step::Element(&node))?;
        let mut children = tree.children(&node);
        children.reverse();
        stack.extend(children);
    }

    ControlFlow::Continue(())
}

/// Pre-order walk using the tree's own non-content flag
pub fn walk_content<T, F>(tree: &T, root: &T::Node, visit: F) -> ControlFlow<()>
where
    T: ContentTree + ?Sized,
    F: FnMut(Step<'_, T::Node>) -> ControlFlow<()>,
{
    walk_preorder(tree, root, |node| tree.is_non_content(node), visit)
}

/// Total content length under `node`
pub fn content_len<T: ContentTree + ?Sized>(tree: &T, node: &T::Node) -> usize {
    let mut total = 0;
    let _ = walk_content(tree, node, |step| {
        if let Step::Leaf { len, .. } = step {
            total += len;
        }
        ControlFlow::Continue(())
    });
    total
}

/// Concatenated content text under `root`, decorations excluded
pub fn flatten_text<T: ContentTree + ?Sized>(tree: &T, root: &T::Node) -> String {
    let mut out = String::new();
    let _ = walk_content(tree, root, |step| {
        if let Step::Leaf { node, .. } = step {
            if let Some(text) = tree.leaf_text(node) {
                out.push_str(&text);
            }
        }
        ControlFlow::Continue(())
    });
    out
}

/// True if `node` is `ancestor` or lies anywhere beneath it, excluded subtrees included
pub fn contains<T: ContentTree + ?Sized>(tree: &T, ancestor: &T::Node, node: &T::Node) -> bool {
    walk_preorder(tree, ancestor, |_| false, |step| {
        let current = match step {
            Step::Element(n) | Step::Skipped(n) => n,
            Step::Leaf { node: n, .. } => n,
        };
        if current == node {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}
