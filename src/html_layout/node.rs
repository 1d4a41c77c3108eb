//! Arena-backed rendered node tree
//!
//! The output shape of the rendering step: elements with ordered children,
//! text leaves, and a non-content flag on decoration subtrees.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::position::walk::ContentTree;

/// Index of a node in a [`RenderTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

/// Element or text payload of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Element {
        tag: String,
        classes: Vec<String>,
        attrs: Vec<(String, String)>,
        /// Decoration subtree, skipped by offset computations
        non_content: bool,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An ordered tree of elements and text leaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    nodes: Vec<NodeData>,
}

impl RenderTree {
    /// Create a tree with a single root element
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element {
                    tag: root_tag.to_string(),
                    classes: Vec::new(),
                    attrs: Vec::new(),
                    non_content: false,
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Append an element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let index = self.nodes[parent.0].children.len();
        self.insert_element(parent, index, tag)
    }

    /// Insert an element at child position `index` of `parent`
    pub fn insert_element(&mut self, parent: NodeId, index: usize, tag: &str) -> NodeId {
        self.insert_node(
            parent,
            index,
            NodeKind::Element {
                tag: tag.to_string(),
                classes: Vec::new(),
                attrs: Vec::new(),
                non_content: false,
            },
        )
    }

    /// Append a text leaf as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let index = self.nodes[parent.0].children.len();
        self.insert_node(parent, index, NodeKind::Text(text.to_string()))
    }

    fn insert_node(&mut self, parent: NodeId, index: usize, kind: NodeKind) -> NodeId {
        debug_assert!(
            matches!(self.nodes[parent.0].kind, NodeKind::Element { .. }),
            "text leaves cannot have children"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        let children = &mut self.nodes[parent.0].children;
        let at = index.min(children.len());
        children.insert(at, id);
        id
    }

    pub fn set_non_content(&mut self, id: NodeId, value: bool) {
        if let NodeKind::Element { non_content, .. } = &mut self.nodes[id.0].kind {
            *non_content = value;
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes[id.0].kind {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id.0].kind {
            match attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        matches!(&self.nodes[id.0].kind, NodeKind::Element { classes, .. } if classes.iter().any(|c| c == class))
    }

    /// Text of a leaf, `None` for elements
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Insert `text` into a leaf at char offset `at` (clamped)
    pub fn insert_text(&mut self, leaf: NodeId, at: usize, text: &str) {
        if let NodeKind::Text(existing) = &mut self.nodes[leaf.0].kind {
            let byte = existing
                .char_indices()
                .nth(at)
                .map(|(i, _)| i)
                .unwrap_or(existing.len());
            existing.insert_str(byte, text);
        }
    }

    /// Delete `count` chars from a leaf starting at char offset `at`
    pub fn delete_text(&mut self, leaf: NodeId, at: usize, count: usize) {
        if let NodeKind::Text(existing) = &mut self.nodes[leaf.0].kind {
            *existing = existing
                .chars()
                .enumerate()
                .filter(|(i, _)| *i < at || *i >= at + count)
                .map(|(_, c)| c)
                .collect();
        }
    }

    /// All element ids carrying `class`, in pre-order
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            if self.has_class(id, class) {
                out.push(id);
            }
            stack.extend(self.child_ids(id).iter().rev().copied());
        }
        out
    }
}

impl ContentTree for RenderTree {
    type Node = NodeId;

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.child_ids(*node).to_vec()
    }

    fn leaf_text(&self, node: &NodeId) -> Option<Cow<'_, str>> {
        self.text(*node).map(Cow::Borrowed)
    }

    fn is_non_content(&self, node: &NodeId) -> bool {
        matches!(self.kind(*node), NodeKind::Element { non_content: true, .. })
    }
}
