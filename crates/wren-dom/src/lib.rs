//! DOM tree implementation for the Wren browser.
//!
//! This crate provides an arena-based DOM tree loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. Children are owned by the arena; the parent link is a
//! plain index, so the usual ownership cycle of a doubly-linked tree never
//! appears. The root of a parsed document is the `<html>` element itself;
//! there is no separate Document node.
//!
//! Each node carries a computed-style map which the style pass rewrites
//! wholesale on every run.

use std::collections::HashMap;

/// Computed style for one node: lowercased property name → raw value.
pub type StyleMap = HashMap<String, String>;

/// One element attribute.
///
/// [§ 4.9.1 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// Attributes keep their document order: an element's attribute list is an
/// insertion-ordered sequence, not a hash map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Attribute value with any surrounding quotes already stripped; empty
    /// for bare attributes like `disabled`.
    pub value: String,
}

/// A type-safe index into the DOM arena.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Element-specific data: lowercased tag name plus ordered attributes.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's lowercased local name.
    pub tag_name: String,
    /// Attributes in document order.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Look up an attribute value by (lowercased) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type."
#[derive(Debug, Clone)]
pub enum NodeType {
    /// An element node.
    Element(ElementData),
    /// A text node holding a literal run of characters.
    Text(String),
}

/// A node in the arena: its type, tree relationships, and computed style.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub node_type: NodeType,
    /// Parent index, `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Computed style, populated by the style resolver.
    pub style: StyleMap,
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl DomTree {
    /// Create an empty tree. The HTML parser allocates the root element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element of the document.
    ///
    /// Only meaningful on a non-empty tree; the HTML parser always produces
    /// at least an `<html>` root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root.unwrap_or(NodeId(0))
    }

    /// Record which node is the document root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node, detached from the tree.
    ///
    /// The node has no parent and no children until it is inserted with
    /// [`append_child`](Self::append_child).
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            style: StyleMap::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Append `child` to `parent`'s children and set the back-reference.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// [§ 4.2.5 Ancestor](https://dom.spec.whatwg.org/#concept-tree-ancestor)
    ///
    /// Iterator over a node's ancestors, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Iterator over a node's descendants in document order (depth-first,
    /// pre-order), excluding the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Iterate over every node in the tree in document order.
    pub fn iter_all(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.root()).chain(self.descendants(self.root()))
    }

    /// Element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Computed style of a node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&StyleMap> {
        self.get(id).map(|n| &n.style)
    }

}

/// Iterator that walks up the tree from a node to the root.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator that walks the tree in document order (depth-first, pre-order).
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    /// Nodes still to visit; children are pushed in reverse so they pop
    /// left-to-right.
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
