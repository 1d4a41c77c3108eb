//! DOM-backed editing surface
//!
//! Walks the live `contenteditable` element through `web-sys`. Offsets in
//! text nodes are UTF-16 code units, the unit the DOM `Range` API uses, so
//! `text_len` counts those instead of chars.
//!
//! Only text nodes carry content. `prepare` switches the element to
//! plain-text editing so Enter inserts `\n` into a text node rather than a
//! `<div>` or `<br>`.

use std::borrow::Cow;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};

use crate::cycle::EditorSurface;
use crate::error::{EditorError, Result};
use crate::html_layout::document::{BLOCK_CLASS, CONTROLS_CLASS};
use crate::html_layout::html::{inner_html, NON_CONTENT_ATTR};
use crate::html_layout::node::RenderTree;
use crate::position::mapper::{DomPoint, DomRange};
use crate::position::walk::ContentTree;

/// The editor element and the page selection
pub struct DomSurface {
    root: HtmlElement,
}

impl DomSurface {
    pub fn new(root: HtmlElement) -> Self {
        Self { root }
    }

    /// Make the element edit plain text and fold any host markup into text.
    ///
    /// Host content that was never rendered by the editor (no `.block`
    /// children) is replaced by its `innerText`, which turns `<div>` and
    /// `<br>` line breaks into `\n`.
    pub fn prepare(&self) -> Result<()> {
        let style = self.root.style();
        style
            .set_property("white-space", "pre-wrap")
            .map_err(EditorError::dom)?;
        self.root
            .set_attribute("contenteditable", "plaintext-only")
            .map_err(EditorError::dom)?;

        let rendered = self
            .root
            .query_selector(&format!(".{}", BLOCK_CLASS))
            .map_err(EditorError::dom)?
            .is_some();
        if !rendered && self.root.first_element_child().is_some() {
            let text = self.root.inner_text();
            log::debug!("folding host markup into {} chars of text", text.chars().count());
            self.root.set_text_content(Some(&text));
        }
        Ok(())
    }

    /// True if `node` is the editor element or inside it
    pub fn owns(&self, node: &Node) -> bool {
        self.root.contains(Some(node))
    }
}

impl ContentTree for DomSurface {
    type Node = Node;

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn leaf_text(&self, node: &Node) -> Option<Cow<'_, str>> {
        if node.node_type() == Node::TEXT_NODE {
            Some(Cow::Owned(node.node_value().unwrap_or_default()))
        } else {
            None
        }
    }

    fn is_non_content(&self, node: &Node) -> bool {
        node.dyn_ref::<Element>().is_some_and(|el| {
            el.has_attribute(NON_CONTENT_ATTR) || el.class_list().contains(CONTROLS_CLASS)
        })
    }

    fn text_len(&self, node: &Node) -> Option<usize> {
        self.leaf_text(node).map(|text| text.encode_utf16().count())
    }
}

impl EditorSurface for DomSurface {
    fn root(&self) -> Node {
        Node::from(self.root.clone())
    }

    fn selection(&self) -> Option<DomRange<Node>> {
        let selection = web_sys::window()?.get_selection().ok()??;
        if selection.range_count() == 0 {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;

        let start = DomPoint::new(
            range.start_container().ok()?,
            range.start_offset().ok()? as usize,
        );
        let end = DomPoint::new(range.end_container().ok()?, range.end_offset().ok()? as usize);
        Some(DomRange::new(start, end))
    }

    fn set_selection(&mut self, target: &DomRange<Node>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Ok(Some(selection)) = window.get_selection() else {
            return;
        };

        let applied = document.create_range().and_then(|range| {
            range.set_start(&target.start.node, target.start.offset as u32)?;
            range.set_end(&target.end.node, target.end.offset as u32)?;
            selection.remove_all_ranges()?;
            selection.add_range(&range)
        });

        if let Err(err) = applied {
            log::warn!("could not restore selection: {:?}", err);
        }
    }

    fn rebuild(&mut self, rendered: &RenderTree) {
        self.root.set_inner_html(&inner_html(rendered, rendered.root()));
    }
}
