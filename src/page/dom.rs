use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a node inside its `Document` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// One element of the host page. Only the parts the extractors read are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Uppercase, like `tagName`.
    pub tag: String,
    pub id: Option<String>,
    /// Raw `class` attribute, like `className`.
    pub class_name: String,
    pub attributes: BTreeMap<String, String>,
    /// Own text (text nodes directly under this element).
    pub text: String,
    /// Current value for form controls.
    pub value: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_ascii_whitespace().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena snapshot of the page DOM. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                element: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends `element` as the last child of `parent`. Unknown parents attach to the root.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let parent = if parent.0 < self.nodes.len() { parent } else { self.root() };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).map(|n| &n.element)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element in document order with the given id.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.preorder(self.root(), true)
            .into_iter()
            .find(|n| self.nodes[n.0].element.id.as_deref() == Some(id))
    }

    /// `node` itself or its nearest ancestor matching `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            let n = self.nodes.get(current.0)?;
            if pred(&n.element) {
                return Some(current);
            }
            cursor = n.parent;
        }
        None
    }

    /// Whether `node` is `ancestor` or sits somewhere below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// First descendant of `root` (excluding `root`) matching `pred`, in document order.
    pub fn query_first(&self, root: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.preorder(root, false)
            .into_iter()
            .find(|n| pred(&self.nodes[n.0].element))
    }

    /// Concatenated text of `node` and all its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        self.preorder(node, true)
            .into_iter()
            .map(|n| self.nodes[n.0].element.text.as_str())
            .collect()
    }

    fn preorder(&self, root: NodeId, include_root: bool) -> Vec<NodeId> {
        let mut out = Vec::new();
        if root.0 >= self.nodes.len() {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id != root || include_root {
                out.push(id);
            }
            // Reverse so the first child is visited first.
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}

/// Nested, serde-friendly description of a page tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTree {
    pub tag: String,
    pub id: Option<String>,
    pub class: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub value: Option<String>,
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    fn element(&self) -> Element {
        Element {
            tag: self.tag.to_ascii_uppercase(),
            id: self.id.clone(),
            class_name: self.class.clone(),
            attributes: self.attrs.clone(),
            text: self.text.clone(),
            value: self.value.clone(),
        }
    }
}

impl From<&NodeTree> for Document {
    fn from(tree: &NodeTree) -> Self {
        let mut doc = Document::new(tree.element());
        let mut pending: Vec<(NodeId, &NodeTree)> = tree
            .children
            .iter()
            .rev()
            .map(|c| (NodeId(0), c))
            .collect();
        while let Some((parent, child)) = pending.pop() {
            let id = doc.append(parent, child.element());
            pending.extend(child.children.iter().rev().map(|c| (id, c)));
        }
        doc
    }
}
