// Caret save/restore across rendered trees

use blockdraft_wasm::html_layout::document::{render_blocks, RenderOptions};
use blockdraft_wasm::html_layout::node::{NodeId, NodeKind, RenderTree};
use blockdraft_wasm::models::config::EditorConfig;
use blockdraft_wasm::position::mapper::{
    linear_offset_of, resolve_offset, restore_selection, save_selection, DomPoint, DomRange,
};
use blockdraft_wasm::position::walk::{content_len, flatten_text, walk_content, ContentTree, Step};
use blockdraft_wasm::text::annotations::AnnotationLayer;
use blockdraft_wasm::text::cursor::SavedSelection;
use blockdraft_wasm::text::segment::segment;
use proptest::prelude::*;
use std::ops::ControlFlow;

fn rendered(text: &str) -> RenderTree {
    let config = EditorConfig::default();
    render_blocks(
        &segment(text),
        &AnnotationLayer::new(),
        &RenderOptions {
            config: &config,
            show_block_boundaries: false,
        },
    )
}

fn single_leaf(text: &str) -> (RenderTree, NodeId) {
    let mut tree = RenderTree::new("div");
    let root = tree.root();
    let leaf = tree.append_text(root, text);
    (tree, leaf)
}

fn content_leaves(tree: &RenderTree) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    let _ = walk_content(tree, &tree.root(), |step| {
        if let Step::Leaf { node, .. } = step {
            leaves.push(*node);
        }
        ControlFlow::Continue(())
    });
    leaves
}

fn element_ids(tree: &RenderTree) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        if matches!(tree.kind(id), NodeKind::Element { .. }) {
            out.push(id);
        }
        stack.extend(tree.child_ids(id).iter().copied());
    }
    out
}

#[test]
fn test_caret_survives_resegmentation() {
    let (before, leaf) = single_leaf("Hello world.");
    let caret = DomRange::collapsed(DomPoint::new(leaf, 5));
    let saved = save_selection(&before, &before.root(), Some(&caret)).unwrap();
    assert_eq!(saved, SavedSelection::collapsed(5));

    let config = EditorConfig::default();
    let after = render_blocks(
        &["Hello ".to_string(), "world.".to_string()],
        &AnnotationLayer::new(),
        &RenderOptions {
            config: &config,
            show_block_boundaries: false,
        },
    );
    let leaves = content_leaves(&after);

    let range = restore_selection(&after, &after.root(), &saved).unwrap();
    assert!(range.is_collapsed());
    assert_eq!(range.start, DomPoint::new(leaves[0], 5));

    // exactly on the block boundary: end of the earlier leaf
    let boundary = restore_selection(&after, &after.root(), &SavedSelection::collapsed(6)).unwrap();
    assert_eq!(boundary.start, DomPoint::new(leaves[0], 6));
}

#[test]
fn test_no_selection_saves_nothing() {
    let tree = rendered("Hello world.");
    assert_eq!(save_selection(&tree, &tree.root(), None), None);
}

#[test]
fn test_restore_clamps_to_content_end() {
    let tree = rendered("Hello world.");
    let range = restore_selection(&tree, &tree.root(), &SavedSelection::collapsed(1000)).unwrap();
    let offset = linear_offset_of(&tree, &tree.root(), &range.start);
    assert_eq!(offset, Some(12));
}

#[test]
fn test_restore_range_spans_blocks() {
    let tree = rendered("One. Two. Three.");
    let saved = SavedSelection::new(2, 12);
    let range = restore_selection(&tree, &tree.root(), &saved).unwrap();
    let leaves = content_leaves(&tree);

    assert_eq!(range.start, DomPoint::new(leaves[0], 2));
    assert_eq!(range.end, DomPoint::new(leaves[2], 2));
    assert_eq!(save_selection(&tree, &tree.root(), Some(&range)), Some(saved));
}

#[test]
fn test_restore_into_tree_without_text_is_noop() {
    let tree = rendered("");
    assert_eq!(resolve_offset(&tree, &tree.root(), 0), None);
    assert_eq!(restore_selection(&tree, &tree.root(), &SavedSelection::new(0, 4)), None);
}

#[test]
fn test_element_anchor_and_outside_anchor() {
    let tree = rendered("Short. Second.");
    let root = tree.root();
    let leaves = content_leaves(&tree);

    let on_root = DomRange::collapsed(DomPoint::new(root, 1));
    assert_eq!(save_selection(&tree, &root, Some(&on_root)), Some(SavedSelection::collapsed(7)));

    // walking only the first leaf, a point in the second is outside
    let elsewhere = DomRange::collapsed(DomPoint::new(leaves[1], 2));
    assert_eq!(save_selection(&tree, &leaves[0], Some(&elsewhere)), None);
}

#[test]
fn test_controls_text_never_counts() {
    let tree = rendered("A. B.");
    assert_eq!(flatten_text(&tree, &tree.root()), "A. B.");
    assert_eq!(content_len(&tree, &tree.root()), 5);
}

fn draft_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z .!?()…。\n]{0,48}").unwrap()
}

proptest! {
    #[test]
    fn offsets_round_trip(text in draft_text()) {
        let tree = rendered(&text);
        let root = tree.root();
        let total = content_len(&tree, &root);
        if content_leaves(&tree).is_empty() {
            return Ok(());
        }

        for k in 0..=total {
            let point = resolve_offset(&tree, &root, k).unwrap();
            prop_assert_eq!(linear_offset_of(&tree, &root, &point), Some(k));

            let saved = save_selection(&tree, &root, Some(&DomRange::collapsed(point))).unwrap();
            let restored = restore_selection(&tree, &root, &saved).unwrap();
            prop_assert_eq!(linear_offset_of(&tree, &root, &restored.start), Some(k));
        }
    }

    #[test]
    fn leaf_offsets_increase_in_preorder(text in draft_text()) {
        let tree = rendered(&text);
        let root = tree.root();
        let starts: Vec<usize> = content_leaves(&tree)
            .into_iter()
            .map(|leaf| linear_offset_of(&tree, &root, &DomPoint::new(leaf, 0)).unwrap())
            .collect();

        for pair in starts.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn non_content_insertion_keeps_offsets(
        text in draft_text(),
        parent_pick in 0usize..64,
        child_pick in 0usize..8,
        junk in "[a-z]{1,6}",
    ) {
        let tree = rendered(&text);
        let root = tree.root();
        let leaves = content_leaves(&tree);
        let before: Vec<Option<usize>> = leaves
            .iter()
            .map(|leaf| linear_offset_of(&tree, &root, &DomPoint::new(*leaf, 1)))
            .collect();

        let mut decorated = tree.clone();
        let elements = element_ids(&decorated);
        let parent = elements[parent_pick % elements.len()];
        let index = child_pick % (decorated.child_ids(parent).len() + 1);
        let extra = decorated.insert_element(parent, index, "span");
        decorated.set_non_content(extra, true);
        decorated.append_text(extra, &junk);

        let after: Vec<Option<usize>> = leaves
            .iter()
            .map(|leaf| linear_offset_of(&decorated, &root, &DomPoint::new(*leaf, 1)))
            .collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(flatten_text(&decorated, &root), flatten_text(&tree, &root));
        prop_assert!(decorated.is_non_content(&extra));
    }
}
