//! Broken tree invariants, as reported by `validate`.
//!
//! None of these should ever be observable after a public operation returns.
//! They exist so tests (and debug builds) can say exactly what went wrong.

use crate::node::NodeId;

/// A tree invariant that does not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The in-order sequence is not strictly increasing at this node.
    #[error("node {0:?} is out of order")]
    Order(NodeId),
    /// A child does not point back at the node holding it.
    #[error("node {child:?} should have parent {expected:?} but has {actual:?}")]
    Parent {
        /// The child with the bad back link.
        child: NodeId,
        /// The node that actually holds the child.
        expected: Option<NodeId>,
        /// The back link the child has.
        actual: Option<NodeId>,
    },
    /// A cached height does not match the subtree below it.
    #[error("node {node:?} caches height {cached} but its subtree is {actual} high")]
    Height {
        /// The node with the stale height.
        node: NodeId,
        /// The height stored on the node.
        cached: usize,
        /// The height computed from its children.
        actual: usize,
    },
    /// A node's subtrees differ in height by more than one.
    #[error("node {node:?} has balance factor {balance_factor}")]
    Balance {
        /// The unbalanced node.
        node: NodeId,
        /// Left height minus right height.
        balance_factor: isize,
    },
    /// A node claims to hold its value zero times.
    #[error("node {0:?} has a multiplicity of zero")]
    Multiplicity(NodeId),
    /// The tree's size does not match what it holds.
    #[error("tree has size {size} but its nodes hold {counted} values")]
    Size {
        /// The size recorded on the tree.
        size: usize,
        /// The sum of every node's multiplicity.
        counted: usize,
    },
}
