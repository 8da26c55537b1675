//! A self-balancing Binary Search Tree (specifically, an AVL tree). It wraps a [`bst::Tree`] and,
//! after every structural change, walks from the changed node back up to the root rotating any
//! node whose subtrees have drifted more than one level apart.
//!
//! # Examples
//!
//! ```
//! use avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Ascending adds would make a plain search tree into a linked list.
//! for x in 1..=7 {
//!     tree.add(x);
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().map(|n| *n.value()), Some(4));
//!
//! assert!(tree.remove(&4));
//! assert!(!tree.has(&4));
//! assert!(tree.validate().is_ok());
//! ```
//!
//! [`bst::Tree`]: crate::bst::Tree

use std::fmt;

use crate::bst::{Inserted, Removal, Side, Tree};
use crate::error::Violation;
use crate::iter::{Bfs, Dfs, InOrder, PostOrder, PreOrder, Values};
use crate::node::{Node, NodeId};

/// A search tree that keeps the heights of every node's subtrees within one of each other.
#[derive(Clone)]
pub struct AvlTree<T> {
    tree: Tree<T>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// The underlying search tree.
    pub fn as_bst(&self) -> &Tree<T> {
        &self.tree
    }

    /// The number of values in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of distinct values in the tree.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }

    /// How many levels the tree has. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.tree.root()
    }

    /// Looks up a node by handle. Returns `None` if the handle's node has been removed.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.tree.get(id)
    }

    /// Which side of its parent the given node hangs from.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        self.tree.side_of(id)
    }

    /// The height of the given node's left subtree minus the height of its right subtree. Always
    /// -1, 0 or 1 between operations.
    pub fn balance_factor(&self, id: NodeId) -> Option<isize> {
        self.tree.balance_factor(id)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// See [`Tree::get_leftmost`].
    pub fn get_leftmost(&self, from: Option<NodeId>) -> Option<&Node<T>> {
        self.tree.get_leftmost(from)
    }

    /// See [`Tree::get_rightmost`].
    pub fn get_rightmost(&self, from: Option<NodeId>) -> Option<&Node<T>> {
        self.tree.get_rightmost(from)
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// See [`Tree::in_order`].
    pub fn in_order(&self) -> InOrder<'_, T> {
        self.tree.in_order()
    }

    /// See [`Tree::pre_order`].
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        self.tree.pre_order()
    }

    /// See [`Tree::post_order`].
    pub fn post_order(&self) -> PostOrder<'_, T> {
        self.tree.post_order()
    }

    /// See [`Tree::bfs`].
    pub fn bfs(&self) -> Bfs<'_, T> {
        self.tree.bfs()
    }

    /// See [`Tree::dfs`].
    pub fn dfs(&self) -> Dfs<'_, T> {
        self.tree.dfs()
    }

    /// See [`Tree::values`].
    pub fn values(&self) -> Values<'_, T> {
        self.tree.values()
    }

    /// See [`Tree::to_array`].
    pub fn to_array(&self) -> Vec<Option<&T>> {
        self.tree.to_array()
    }

    /// Walks from `from` up to the root, balancing every node on the way.
    fn rebalance_upward(&mut self, from: Option<NodeId>) {
        let mut current = from;
        while let Some(id) = current {
            let settled = self.balance(id);
            current = self.tree.node(settled).parent;
        }
    }

    /// Balances a node using the heights of its children. Returns the node the upward walk should
    /// continue from: the new local root after a rotation, the node itself if it was already
    /// balanced, or the re-seated node after a graft.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn balance(&mut self, id: NodeId) -> NodeId {
        self.tree.fix_height(id);
        let node = self.tree.node(id);
        let (left, right) = (node.left, node.right);
        let balance_factor = self.tree.factor(id);

        match balance_factor {
            2 => {
                let left = left.expect("Left heavy => left child");
                if self.tree.factor(left) < 0 {
                    self.rotate_left_right(id)
                } else {
                    self.rotate_right(id)
                }
            }
            -2 => {
                let right = right.expect("Right heavy => right child");
                if self.tree.factor(right) > 0 {
                    self.rotate_right_left(id)
                } else {
                    self.rotate_left(id)
                }
            }
            n if n > 2 => self.graft_into(id, Side::Left),
            n if n < -2 => self.graft_into(id, Side::Right),
            _ => id,
        }
    }

    /// Rotate `id` to the right. This moves the left child up vertically and `id` down
    /// vertically. Used to rebalance the tree when the left child is too tall. As such, it must
    /// only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///   old_root (i.e. "id")      new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self
            .tree
            .node(old_root)
            .left
            .expect("Rotate right => left child");
        let y = self.tree.node(new_root).right;

        self.tree.set_child(old_root, Side::Left, y);
        self.tree.replace_child(old_root, Some(new_root));
        self.tree.set_child(new_root, Side::Right, Some(old_root));
        self.tree.fix_height(old_root);
        self.tree.fix_height(new_root);

        tracing::trace!(?old_root, ?new_root, "rotated right");
        new_root
    }

    /// Mirror image of [`rotate_right`][AvlTree::rotate_right].
    fn rotate_left(&mut self, old_root: NodeId) -> NodeId {
        let new_root = self
            .tree
            .node(old_root)
            .right
            .expect("Rotate left => right child");
        let y = self.tree.node(new_root).left;

        self.tree.set_child(old_root, Side::Right, y);
        self.tree.replace_child(old_root, Some(new_root));
        self.tree.set_child(new_root, Side::Left, Some(old_root));
        self.tree.fix_height(old_root);
        self.tree.fix_height(new_root);

        tracing::trace!(?old_root, ?new_root, "rotated left");
        new_root
    }

    /// Rotates the left child left so its right child is on the outside, then rotates `id`
    /// right. The left child's right child ends up on top.
    fn rotate_left_right(&mut self, id: NodeId) -> NodeId {
        let left = self
            .tree
            .node(id)
            .left
            .expect("Rotate left-right => left child");
        self.rotate_left(left);
        self.rotate_right(id)
    }

    /// Rotates the right child right so its left child is on the outside, then rotates `id`
    /// left. The right child's left child ends up on top.
    fn rotate_right_left(&mut self, id: NodeId) -> NodeId {
        let right = self
            .tree
            .node(id)
            .right
            .expect("Rotate right-left => right child");
        self.rotate_right(right);
        self.rotate_left(id)
    }

    /// Handles a node whose `heavy` subtree is at least three levels taller than the other one.
    /// That can only happen when a removal hung a whole subtree under a leftmost node.
    ///
    /// The heavy child takes this node's place. This node then walks down the heavy subtree's
    /// inner spine to the first subtree no more than one level taller than its light child,
    /// adopts that subtree in place of the heavy child and hangs itself where the subtree was.
    /// Every node above it on the spine grew by at most one level, which the ordinary rotations
    /// fix as the upward walk passes through them.
    ///
    /// ```text
    ///        id                    a
    ///       /  \                  / \
    ///      a    b      ->       ..   p
    ///     / \                         \
    ///   ..   p                         id
    ///         \                       /  \
    ///          c                     c    b
    /// ```
    fn graft_into(&mut self, id: NodeId, heavy: Side) -> NodeId {
        let node = self.tree.node(id);
        let (heavy_root, light) = match heavy {
            Side::Left => (node.left, node.right),
            Side::Right => (node.right, node.left),
        };
        let heavy_root = heavy_root.expect("Heavy side => child");
        let inner = match heavy {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };
        let limit = self.tree.height_of(light) + 1;

        let mut spine_parent = heavy_root;
        let mut spine = self.child(heavy_root, inner);
        while let Some(next) = spine.filter(|&n| self.tree.node(n).height > limit) {
            spine_parent = next;
            spine = self.child(next, inner);
        }

        self.tree.replace_child(id, Some(heavy_root));
        self.tree.set_child(id, heavy, spine);
        self.tree.set_child(spine_parent, inner, Some(id));
        self.tree.fix_height(id);

        tracing::trace!(node = ?id, ?heavy_root, ?spine_parent, "grafted node");
        id
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.tree.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Adds the value to the tree, rebalancing as needed, and returns the node holding it. Adding
    /// an equal value bumps the multiplicity of the existing node instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.add(1);
    /// tree.add(2);
    /// tree.add(3);
    ///
    /// // A single left rotation put 2 on top.
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.value(), 2);
    /// assert_eq!(root.left().and_then(|id| tree.get(id)).map(|n| *n.value()), Some(1));
    /// assert_eq!(root.right().and_then(|id| tree.get(id)).map(|n| *n.value()), Some(3));
    /// ```
    pub fn add(&mut self, value: T) -> NodeId {
        let Inserted { id, created } = self.tree.attach(value);
        if created {
            self.rebalance_upward(Some(id));
        }
        self.debug_check();
        id
    }

    /// Removes one occurrence of the value, rebalancing as needed. Returns `false` if the value
    /// wasn't in the tree.
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = match self.tree.detach(value) {
            Removal::NotFound => false,
            // Only the multiplicity changed so there's nothing to rebalance.
            Removal::Decremented => true,
            Removal::Detached { lowest } => {
                self.rebalance_upward(lowest);
                true
            }
        };
        self.debug_check();
        removed
    }

    /// Finds the node holding the given value. If no node has it, `None` is returned.
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        self.tree.find(value)
    }

    /// Like [`find`][AvlTree::find] but returns the handle.
    pub fn find_id(&self, value: &T) -> Option<NodeId> {
        self.tree.find_id(value)
    }

    /// Whether the value is in the tree.
    pub fn has(&self, value: &T) -> bool {
        self.tree.has(value)
    }

    /// Checks every search tree invariant plus the AVL one: no node's subtrees differ in height
    /// by more than one.
    pub fn validate(&self) -> Result<(), Violation> {
        self.tree.validate()?;
        for node in self.tree.in_order() {
            let balance_factor = self.tree.factor(node.id());
            if balance_factor.abs() > 1 {
                return Err(Violation::Balance {
                    node: node.id(),
                    balance_factor,
                });
            }
        }
        Ok(())
    }

    /// In debug builds, assert that the root is balanced and its cached height is right. Only the
    /// root is checked; [`validate`][AvlTree::validate] walks the whole tree.
    fn debug_check(&self) {
        self.tree.debug_check();
        if cfg!(debug_assertions) {
            if let Some(root) = self.tree.root_id() {
                let balance_factor = self.tree.factor(root);
                assert!(
                    balance_factor.abs() <= 1,
                    "unbalanced root: balance factor {balance_factor}"
                );
            }
        }
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree").field("tree", &self.tree).finish()
    }
}

impl<T> FromIterator<T> for AvlTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for AvlTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
