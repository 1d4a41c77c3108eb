//! Block rendering
//!
//! Takes the segmented block sequence plus annotations and produces the
//! rendered tree: one `span.block` per block holding its text verbatim, and a
//! `div.block-controls` decoration flagged non-content so caret mapping and
//! export never see it.

use crate::models::config::EditorConfig;
use crate::text::annotations::{AnnotationLayer, Importance};

use super::node::{NodeId, RenderTree};

pub const BLOCK_CLASS: &str = "block";
pub const COLLAPSED_CLASS: &str = "collapsed";
pub const CONTROLS_CLASS: &str = "block-controls";
pub const BLOCK_INDEX_ATTR: &str = "data-block-index";
pub const ACTION_ATTR: &str = "data-action";
pub const IMPORTANCE_ATTR: &str = "data-importance";

/// Control action: set the block's importance to the dot's level
pub const ACTION_IMPORTANCE: &str = "importance";
/// Control action: collapse or expand the block
pub const ACTION_TOGGLE_COLLAPSE: &str = "toggle-collapse";

const TOGGLE_GLYPH: &str = "↔️";
const BOUNDARY_OUTLINE: &str = "outline: 1px dashed #ccc;";

/// Options for one render pass
#[derive(Clone, Debug)]
pub struct RenderOptions<'a> {
    pub config: &'a EditorConfig,
    pub show_block_boundaries: bool,
}

/// Build the rendered tree for `blocks`
pub fn render_blocks(blocks: &[String], annotations: &AnnotationLayer, options: &RenderOptions<'_>) -> RenderTree {
    let mut tree = RenderTree::new("div");
    let root = tree.root();

    for (index, text) in blocks.iter().enumerate() {
        render_block(&mut tree, root, index, text, annotations, options);
    }

    log::trace!("rendered {} blocks into {} nodes", blocks.len(), tree.len());
    tree
}

fn render_block(
    tree: &mut RenderTree,
    root: NodeId,
    index: usize,
    text: &str,
    annotations: &AnnotationLayer,
    options: &RenderOptions<'_>,
) {
    let annotation = annotations.get(index);
    let span = tree.append_element(root, "span");
    tree.add_class(span, BLOCK_CLASS);
    if annotation.collapsed {
        tree.add_class(span, COLLAPSED_CLASS);
    }
    tree.set_attr(span, BLOCK_INDEX_ATTR, &index.to_string());
    tree.set_attr(span, IMPORTANCE_ATTR, annotation.importance.as_str());

    let mut style = String::new();
    if annotation.importance != Importance::None {
        style.push_str(&format!("color: {};", options.config.palette.color(annotation.importance)));
    }
    if options.show_block_boundaries {
        style.push_str(BOUNDARY_OUTLINE);
    }
    if !style.is_empty() {
        tree.set_attr(span, "style", &style);
    }

    tree.append_text(span, text);
    render_controls(tree, span, index, options);
}

fn render_controls(tree: &mut RenderTree, block: NodeId, index: usize, options: &RenderOptions<'_>) {
    let controls = tree.append_element(block, "div");
    tree.add_class(controls, CONTROLS_CLASS);
    tree.set_non_content(controls, true);
    tree.set_attr(controls, "contenteditable", "false");

    for level in Importance::ALL {
        let dot = tree.append_element(controls, "span");
        tree.add_class(dot, "color-dot");
        tree.set_attr(dot, "title", level.as_str());
        tree.set_attr(dot, ACTION_ATTR, ACTION_IMPORTANCE);
        tree.set_attr(dot, IMPORTANCE_ATTR, level.as_str());
        tree.set_attr(dot, BLOCK_INDEX_ATTR, &index.to_string());
        tree.set_attr(
            dot,
            "style",
            &format!("background-color: {};", options.config.palette.color(level)),
        );
    }

    let toggle = tree.append_element(controls, "span");
    tree.add_class(toggle, "collapse-toggle");
    tree.set_attr(toggle, "title", "Collapse/Expand");
    tree.set_attr(toggle, ACTION_ATTR, ACTION_TOGGLE_COLLAPSE);
    tree.set_attr(toggle, BLOCK_INDEX_ATTR, &index.to_string());
    tree.append_text(toggle, TOGGLE_GLYPH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::walk::{flatten_text, ContentTree};

    fn render(blocks: &[&str], annotations: &AnnotationLayer, boundaries: bool) -> RenderTree {
        let config = EditorConfig::default();
        let blocks: Vec<String> = blocks.iter().map(|s| s.to_string()).collect();
        render_blocks(
            &blocks,
            annotations,
            &RenderOptions {
                config: &config,
                show_block_boundaries: boundaries,
            },
        )
    }

    #[test]
    fn test_content_text_matches_blocks() {
        let tree = render(&["He said ", "(quietly)", " hello."], &AnnotationLayer::new(), false);
        assert_eq!(flatten_text(&tree, &tree.root()), "He said (quietly) hello.");
    }

    #[test]
    fn test_one_block_span_per_block_with_controls() {
        let tree = render(&["A. ", "B."], &AnnotationLayer::new(), false);
        let blocks = tree.elements_with_class(BLOCK_CLASS);
        assert_eq!(blocks.len(), 2);
        assert_eq!(tree.attr(blocks[1], BLOCK_INDEX_ATTR), Some("1"));

        let controls = tree.elements_with_class(CONTROLS_CLASS);
        assert_eq!(controls.len(), 2);
        assert!(controls.iter().all(|c| tree.is_non_content(c)));
        assert_eq!(tree.child_ids(controls[0]).len(), Importance::ALL.len() + 1);
    }

    #[test]
    fn test_annotations_become_style_and_class() {
        let mut layer = AnnotationLayer::new();
        layer.set_importance(0, Importance::High);
        layer.toggle_collapsed(0);
        let tree = render(&["Tagged. ", "Plain."], &layer, false);
        let blocks = tree.elements_with_class(BLOCK_CLASS);

        assert_eq!(tree.attr(blocks[0], "style"), Some("color: #cc0000;"));
        assert!(tree.has_class(blocks[0], COLLAPSED_CLASS));
        assert_eq!(tree.attr(blocks[0], IMPORTANCE_ATTR), Some("high"));
        assert_eq!(tree.attr(blocks[1], "style"), None);
        assert!(!tree.has_class(blocks[1], COLLAPSED_CLASS));
    }

    #[test]
    fn test_block_boundaries_outline() {
        let tree = render(&["A."], &AnnotationLayer::new(), true);
        let block = tree.elements_with_class(BLOCK_CLASS)[0];
        assert_eq!(tree.attr(block, "style"), Some(BOUNDARY_OUTLINE));
    }

    #[test]
    fn test_no_blocks_renders_empty_root() {
        let tree = render(&[], &AnnotationLayer::new(), false);
        assert!(tree.is_empty());
    }
}
