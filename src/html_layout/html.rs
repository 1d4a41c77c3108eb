//! HTML serialization of a [`RenderTree`]
//!
//! Non-content elements are written with a `data-non-content` attribute so the
//! flag survives the trip into the live DOM.

use super::node::{NodeId, NodeKind, RenderTree};

/// Attribute that marks decoration subtrees in markup
pub const NON_CONTENT_ATTR: &str = "data-non-content";

/// Serialize the children of `node` (what goes into the editor's innerHTML)
pub fn inner_html(tree: &RenderTree, node: NodeId) -> String {
    let mut out = String::new();
    for child in tree.child_ids(node) {
        write_node(tree, *child, &mut out);
    }
    out
}

fn write_node(tree: &RenderTree, node: NodeId, out: &mut String) {
    match tree.kind(node) {
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element {
            tag,
            classes,
            attrs,
            non_content,
        } => {
            out.push('<');
            out.push_str(tag);
            if !classes.is_empty() {
                out.push_str(" class=\"");
                out.push_str(&escape_attr(&classes.join(" ")));
                out.push('"');
            }
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            if *non_content {
                out.push(' ');
                out.push_str(NON_CONTENT_ATTR);
                out.push_str("=\"true\"");
            }
            out.push('>');
            for child in tree.child_ids(node) {
                write_node(tree, *child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
