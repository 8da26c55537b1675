//! The nodes stored in a tree's arena and the handles used to name them.

use std::fmt;

/// A handle to a node in a tree.
///
/// Nodes live in an arena owned by the tree and link to each other by `NodeId`
/// instead of by pointer. A handle stays valid until the value it names is
/// removed from the tree for good, after which its slot may be reused by a
/// later insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena slot this handle refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Bookkeeping carried alongside a node's value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Meta {
    /// How many times an equal value has been added. Always at least 1.
    pub multiplicity: usize,
}

/// A `Node` holds a value and links to its children and parent. The value is
/// both the key used for ordering and the payload.
#[derive(Clone)]
pub struct Node<T> {
    id: NodeId,
    pub(crate) value: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) meta: Meta,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<T> Node<T> {
    pub(crate) fn new(id: NodeId, value: T, parent: Option<NodeId>) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
            parent,
            meta: Meta { multiplicity: 1 },
            height: 1,
        }
    }

    /// The handle naming this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// This node's bookkeeping.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// How many times this node's value has been added.
    pub fn multiplicity(&self) -> usize {
        self.meta.multiplicity
    }

    /// How many levels are in the subtree rooted at this node.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("multiplicity", &self.meta.multiplicity)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("parent", &self.parent)
            .finish()
    }
}
