//! The node tree built from a parsed JSON value.
//!
//! Every node of a document lives in one arena owned by [`Tree`]. Nodes refer to their
//! parent and children by [`NodeId`], so the structure is a strict tree with a non-owning
//! back-reference and dropping the `Tree` releases the whole document at once.
//! [`Node`] is a cheap, copyable handle borrowing the arena.

use crate::value::{Value, ValueKind};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    value: Value,
    text: String,
    parent: Option<NodeId>,
    /// All children in document order.
    children: Vec<NodeId>,
    /// Children grouped by name, each group in document order.
    by_name: HashMap<String, Vec<NodeId>>,
}

/// An immutable tree of named nodes decomposed from one JSON value.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    /// Decomposes `value` into a tree whose root has an empty name.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self::from_named_value(String::new(), value)
    }

    #[must_use]
    pub fn from_named_value(name: impl Into<String>, value: Value) -> Self {
        let mut tree = Tree { nodes: Vec::new() };
        tree.decompose(value, name.into(), None);
        tree
    }

    fn decompose(&mut self, value: Value, name: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let text = value.to_text();
        self.nodes.push(NodeData {
            name,
            value: Value::Null,
            text,
            parent,
            children: Vec::new(),
            by_name: HashMap::new(),
        });

        match &value {
            Value::Object(members) => {
                for (child_name, child_value) in members {
                    self.attach(id, child_value, child_name);
                }
            }
            Value::Array(elements) => {
                for element in elements {
                    self.attach(id, element, "");
                }
            }
            _ => {}
        }

        self.nodes[id.0].value = value;
        id
    }

    fn attach(&mut self, parent: NodeId, value: &Value, name: &str) {
        let child_id = self.decompose(value.clone(), name.to_string(), Some(parent));
        let data = &mut self.nodes[parent.0];
        data.children.push(child_id);
        data.by_name.entry(name.to_string()).or_default().push(child_id);
    }

    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Looks a node up by id; `None` if the id belongs to another tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serializes the document into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the document into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root().value().serialize(serializer)
    }
}

/// A handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> Node<'t> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    /// The key this node was found under; empty for array elements and the root.
    #[must_use]
    pub fn name(&self) -> &'t str {
        &self.tree.data(self.id).name
    }

    /// The node's text: a string's contents, or the compact JSON of any other value.
    #[must_use]
    pub fn text(&self) -> &'t str {
        &self.tree.data(self.id).text
    }

    #[must_use]
    pub fn value(&self) -> &'t Value {
        &self.tree.data(self.id).value
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.value().kind()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.value().is_object()
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.value().is_array()
    }

    /// All children, in document order.
    #[must_use]
    pub fn children(&self) -> NodeIter<'t> {
        NodeIter::new(self.tree, &self.tree.data(self.id).children)
    }

    /// Same as [`Node::children`]: a cursor positioned on the first child.
    #[must_use]
    pub fn find_first_child(&self) -> NodeIter<'t> {
        self.children()
    }

    /// Every child named `name`, in document order.
    #[must_use]
    pub fn find(&self, name: &str) -> NodeIter<'t> {
        match self.tree.data(self.id).by_name.get(name) {
            Some(ids) => NodeIter::new(self.tree, ids),
            None => NodeIter::empty(self.tree),
        }
    }

    /// A cursor on the first child named `name`.
    ///
    /// The cursor ends with the last child of that name; it never runs on into
    /// children with other names.
    #[must_use]
    pub fn find_first(&self, name: &str) -> NodeIter<'t> {
        self.find(name)
    }

    #[must_use]
    pub fn find_one(&self, name: &str) -> Option<Node<'t>> {
        self.find(name).get()
    }

    /// Text of the first child named `key`.
    #[must_use]
    pub fn child_text(&self, key: &str) -> Option<&'t str> {
        self.find_one(key).map(|child| child.text())
    }

    /// Looks `name` up in the node's attribute map, which holds the node's own
    /// name mapped to its text.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'t str> {
        (self.name() == name).then(|| self.text())
    }

    /// Compact JSON text of each element; empty unless the node is an array.
    #[must_use]
    pub fn array_elements(&self) -> Vec<String> {
        self.value()
            .as_array()
            .map(|elements| elements.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.text())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

/// A cursor over a half-open range of sibling nodes.
#[derive(Clone)]
pub struct NodeIter<'t> {
    tree: &'t Tree,
    ids: &'t [NodeId],
    pos: usize,
}

impl<'t> NodeIter<'t> {
    fn new(tree: &'t Tree, ids: &'t [NodeId]) -> Self {
        NodeIter { tree, ids, pos: 0 }
    }

    fn empty(tree: &'t Tree) -> Self {
        NodeIter {
            tree,
            ids: &[],
            pos: 0,
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.pos >= self.ids.len()
    }

    /// The node under the cursor, or `None` at the end.
    #[must_use]
    pub fn get(&self) -> Option<Node<'t>> {
        self.ids.get(self.pos).map(|&id| Node {
            tree: self.tree,
            id,
        })
    }

    /// Moves to the next node; a no-op once the end is reached.
    pub fn advance(&mut self) {
        if !self.is_end() {
            self.pos += 1;
        }
    }
}

impl<'t> Iterator for NodeIter<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.get()?;
        self.advance();
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ids.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for NodeIter<'_> {}

impl std::iter::FusedIterator for NodeIter<'_> {}
