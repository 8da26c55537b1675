//! This crate exposes a Binary Search Tree and a self-balancing AVL tree built
//! on top of it, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Values that compare equal share a single `Node`, which counts how many times
//! the value was added (its "multiplicity").
//!
//! ## AVL Tree
//!
//! Searching for a value takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). Adding values in
//! ascending order to a plain BST makes its height `O(N)`. An [`AvlTree`] keeps
//! the heights of every `Node`'s two subtrees within one of each other by
//! rotating nodes after each change, which limits its height to `O(lg N)`.
//!
//! ## Nodes and handles
//!
//! Each tree owns its nodes in an arena. Nodes link to their children and to
//! their parent with [`NodeId`] handles rather than pointers, so walking back
//! up from a node is cheap and there are no reference cycles to manage.
//!
//! # Examples
//!
//! ```
//! use avl::AvlTree;
//!
//! let tree: AvlTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! let sorted: Vec<_> = tree.in_order().map(|n| *n.value()).collect();
//! assert_eq!(sorted, [1, 3, 4, 5, 7, 8, 9]);
//!
//! let levels: Vec<_> = tree.bfs().map(|n| *n.value()).collect();
//! assert_eq!(levels, [5, 3, 8, 1, 4, 7, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod error;
pub mod iter;
pub mod node;
pub mod util;

pub use crate::avl::AvlTree;
pub use crate::error::Violation;
pub use crate::node::{Meta, Node, NodeId};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
