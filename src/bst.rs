//! An unbalanced Binary Search Tree that counts duplicates instead of storing
//! them twice. The nodes live in an arena and refer to each other by
//! [`NodeId`], so every node can find its parent without reference cycles.
//!
//! # Examples
//!
//! ```
//! use avl::bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_none());
//!
//! tree.add(1);
//! assert!(tree.has(&1));
//!
//! // Adding an equal value bumps the multiplicity of the existing node.
//! tree.add(1);
//! assert_eq!(tree.find(&1).map(|n| n.multiplicity()), Some(2));
//! assert_eq!(tree.len(), 2);
//!
//! // Each `remove` takes away one occurrence.
//! assert!(tree.remove(&1));
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::Violation;
use crate::iter::{Bfs, Dfs, InOrder, PostOrder, PreOrder, Values};
use crate::node::{Node, NodeId};
use crate::util::Queue;

/// Which child slot of its parent a node occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// The node is its parent's left child.
    Left,
    /// The node is its parent's right child.
    Right,
}

/// What [`Tree::attach`] did with a value.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Inserted {
    /// The node now holding the value.
    pub(crate) id: NodeId,
    /// Whether a node was created (as opposed to a multiplicity bump).
    pub(crate) created: bool,
}

/// What [`Tree::detach`] did with a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The value wasn't found so nothing was removed.
    NotFound,
    /// The node holds the value more than once. One occurrence was dropped and the shape of the
    /// tree is unchanged.
    Decremented,
    /// The node was unlinked and freed. `lowest` is the deepest node whose subtree changed
    /// shape, or `None` if the only change was at the root.
    Detached { lowest: Option<NodeId> },
}

/// A Binary Search Tree. This can be used for adding, finding, and removing values. Equal values
/// share one node which counts how many times the value was added.
#[derive(Clone)]
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            size: 0,
        }
    }

    /// The number of values in the tree, counting duplicates. This is the number of
    /// [`add`][Tree::add] calls minus the number of successful [`remove`][Tree::remove] calls.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of distinct values, i.e. physical nodes, in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// How many levels the tree has. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.map(|id| self.node(id))
    }

    /// Looks up a node by handle. Returns `None` if the handle's node has been removed.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Which side of its parent the given node hangs from. `None` for the root or a stale
    /// handle.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.get(id)?.parent?;
        if self.node(parent).left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The height of the given node's left subtree minus the height of its right subtree.
    pub fn balance_factor(&self, id: NodeId) -> Option<isize> {
        self.get(id)?;
        Some(self.factor(id))
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.size = 0;
    }

    /// Follows left children from `from` (or the root if `from` is `None`) until there are no
    /// more. This is the smallest value of that subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::bst::Tree;
    ///
    /// let tree: Tree<_> = [30, 10, 40, 35, 50].into_iter().collect();
    /// assert_eq!(tree.get_leftmost(None).map(|n| *n.value()), Some(10));
    ///
    /// let forty = tree.find(&40).map(|n| n.id());
    /// assert_eq!(tree.get_leftmost(forty).map(|n| *n.value()), Some(35));
    /// ```
    pub fn get_leftmost(&self, from: Option<NodeId>) -> Option<&Node<T>> {
        let start = from.or(self.root)?;
        self.get(start)?;
        Some(self.node(self.leftmost_from(start)))
    }

    /// Follows right children from `from` (or the root if `from` is `None`) until there are no
    /// more. This is the largest value of that subtree.
    pub fn get_rightmost(&self, from: Option<NodeId>) -> Option<&Node<T>> {
        let start = from.or(self.root)?;
        self.get(start)?;
        Some(self.node(self.rightmost_from(start)))
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        self.get_leftmost(None).map(Node::value)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.get_rightmost(None).map(Node::value)
    }

    /// Visits nodes left subtree first, then the node, then the right subtree. For a search tree
    /// this is ascending order.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Visits a node, then its left subtree, then its right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    /// Visits the left subtree, then the right subtree, then the node.
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    /// Visits nodes level by level starting at the root.
    pub fn bfs(&self) -> Bfs<'_, T> {
        Bfs::new(self)
    }

    /// Visits nodes depth first starting at the root, exploring left children before right ones.
    pub fn dfs(&self) -> Dfs<'_, T> {
        Dfs::new(self)
    }

    /// Every value in ascending order, each repeated as many times as it was added.
    pub fn values(&self) -> Values<'_, T> {
        Values::new(self)
    }

    /// A level-order snapshot of the tree. Each node contributes its value and then its two
    /// child slots, which show up as `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(
    ///     tree.to_array(),
    ///     vec![Some(&2), Some(&1), Some(&3), None, None, None, None]
    /// );
    ///
    /// assert!(Tree::<i32>::new().to_array().is_empty());
    /// ```
    pub fn to_array(&self) -> Vec<Option<&T>> {
        let mut array = Vec::new();
        let mut queue = Queue::new();
        if let Some(root) = self.root {
            queue.enqueue(Some(root));
        }

        while let Some(slot) = queue.dequeue() {
            match slot.map(|id| self.node(id)) {
                Some(node) => {
                    array.push(Some(&node.value));
                    queue.enqueue(node.left);
                    queue.enqueue(node.right);
                }
                None => array.push(None),
            }
        }

        array
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.0]
            .as_ref()
            .expect("Links only point at live nodes.")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.0]
            .as_mut()
            .expect("Links only point at live nodes.")
    }

    pub(crate) fn height_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).height)
    }

    /// Balance factor of a live node.
    pub(crate) fn factor(&self, id: NodeId) -> isize {
        let node = self.node(id);
        self.height_of(node.left) as isize - self.height_of(node.right) as isize
    }

    /// In debug builds, check the root's parent link and cached height. This only looks at the
    /// root; [`validate`][Tree::validate] walks the whole tree.
    pub(crate) fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let Some(root) = self.root() else {
                return;
            };
            assert!(root.parent.is_none(), "root has a parent");
            assert_eq!(
                root.height,
                self.height_of(root.left).max(self.height_of(root.right)) + 1,
                "stale root height"
            );
        }
    }

    fn leftmost_from(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost_from(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    fn alloc(&mut self, value: T, parent: Option<NodeId>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(Node::new(id, value, parent));
                id
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Some(Node::new(id, value, parent)));
                id
            }
        }
    }

    fn dealloc(&mut self, id: NodeId) -> Node<T> {
        let node = self.nodes[id.0]
            .take()
            .expect("Only live nodes are freed.");
        self.free.push(id);
        node
    }

    /// Puts `child` in the given slot of `parent` and points the child back at its new parent.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(parent);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    /// Puts `new` wherever `old` currently hangs: in its parent's slot or at the root.
    pub(crate) fn replace_child(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.node(old).parent;
        match parent {
            Some(parent) => {
                let side = if self.node(parent).left == Some(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.set_child(parent, side, new);
            }
            None => {
                self.root = new;
                if let Some(new) = new {
                    self.node_mut(new).parent = None;
                }
            }
        }
    }

    /// Adjusts the height of `id` to be the max of its children's heights + 1.
    pub(crate) fn fix_height(&mut self, id: NodeId) {
        let node = self.node(id);
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.node_mut(id).height = height;
    }

    /// Fixes the height of every node from `from` up to the root.
    fn refresh_heights(&mut self, mut from: Option<NodeId>) {
        while let Some(id) = from {
            self.fix_height(id);
            from = self.node(id).parent;
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Adds the value to the tree and returns the node holding it. If an equal value is already
    /// present, its multiplicity goes up instead of a new node being created.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// let first = tree.add(5);
    /// let second = tree.add(5);
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(tree.get(first).map(|n| n.multiplicity()), Some(2));
    /// ```
    pub fn add(&mut self, value: T) -> NodeId {
        let id = self.attach(value).id;
        self.debug_check();
        id
    }

    /// Finds the node holding the given value. If no node has it, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1).map(|n| *n.value()), Some(1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>> {
        self.find_id(value).map(|id| self.node(id))
    }

    /// Like [`find`][Tree::find] but returns the handle.
    pub fn find_id(&self, value: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Whether the value is in the tree.
    pub fn has(&self, value: &T) -> bool {
        self.find_id(value).is_some()
    }

    /// Removes one occurrence of the value. Returns `false` if the value wasn't in the tree.
    ///
    /// When the last occurrence goes, the node's left subtree is hung off the leftmost node of
    /// its right subtree and what's left takes the node's place.
    ///
    /// ```text
    ///      30*                             40
    ///    /     \                          /  \
    ///   10      40      remove 30       35   50
    ///     \    /  \    ---------->     /
    ///     15  35   50                 10
    ///                                   \
    ///                                    15
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = self.detach(value) != Removal::NotFound;
        self.debug_check();
        removed
    }

    /// Checks every invariant of the tree: ordering, parent links, cached heights, multiplicities
    /// and size.
    pub fn validate(&self) -> Result<(), Violation> {
        let mut previous: Option<&T> = None;
        let mut counted = 0;
        for node in self.in_order() {
            if previous.map_or(false, |previous| *previous >= node.value) {
                return Err(Violation::Order(node.id()));
            }
            previous = Some(&node.value);

            if node.meta.multiplicity == 0 {
                return Err(Violation::Multiplicity(node.id()));
            }
            counted += node.meta.multiplicity;

            for child in [node.left, node.right].into_iter().flatten() {
                let actual = self.node(child).parent;
                if actual != Some(node.id()) {
                    return Err(Violation::Parent {
                        child,
                        expected: Some(node.id()),
                        actual,
                    });
                }
            }

            let actual = self.height_of(node.left).max(self.height_of(node.right)) + 1;
            if node.height != actual {
                return Err(Violation::Height {
                    node: node.id(),
                    cached: node.height,
                    actual,
                });
            }
        }

        if let Some(root) = self.root() {
            if root.parent.is_some() {
                return Err(Violation::Parent {
                    child: root.id(),
                    expected: None,
                    actual: root.parent,
                });
            }
        }

        if counted != self.size {
            return Err(Violation::Size {
                size: self.size,
                counted,
            });
        }

        Ok(())
    }

    /// Adds the value without any checks. Shared with the self-balancing tree, which rebalances
    /// afterwards.
    pub(crate) fn attach(&mut self, value: T) -> Inserted {
        self.size += 1;

        let Some(mut current) = self.root else {
            let id = self.alloc(value, None);
            self.root = Some(id);
            return Inserted { id, created: true };
        };

        loop {
            let ordering = value.cmp(&self.node(current).value);
            let (next, side) = match ordering {
                Ordering::Less => (self.node(current).left, Side::Left),
                Ordering::Equal => {
                    self.node_mut(current).meta.multiplicity += 1;
                    return Inserted {
                        id: current,
                        created: false,
                    };
                }
                Ordering::Greater => (self.node(current).right, Side::Right),
            };

            match next {
                Some(next) => current = next,
                None => {
                    let id = self.alloc(value, Some(current));
                    self.set_child(current, side, Some(id));
                    self.refresh_heights(Some(current));
                    tracing::debug!(node = ?id, parent = ?current, ?side, "attached node");
                    return Inserted { id, created: true };
                }
            }
        }
    }

    /// Removes one occurrence of the value without any checks. Shared with the self-balancing
    /// tree, which rebalances from the reported node afterwards.
    pub(crate) fn detach(&mut self, value: &T) -> Removal {
        let Some(id) = self.find_id(value) else {
            return Removal::NotFound;
        };
        self.size -= 1;

        let node = self.node_mut(id);
        if node.meta.multiplicity > 1 {
            node.meta.multiplicity -= 1;
            return Removal::Decremented;
        }

        let (parent, left, right) = (node.parent, node.left, node.right);
        let (replacement, lowest) = match (left, right) {
            (Some(left), Some(right)) => {
                let leftmost = self.leftmost_from(right);
                self.set_child(leftmost, Side::Left, Some(left));
                (Some(right), Some(leftmost))
            }
            (None, Some(right)) => (Some(right), parent),
            (left, None) => (left, parent),
        };

        self.replace_child(id, replacement);
        self.dealloc(id);
        self.refresh_heights(lowest);
        tracing::debug!(node = ?id, ?parent, ?lowest, "detached node");

        Removal::Detached { lowest }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("root", &self.root.map(|id| Subtree { tree: self, id }))
            .finish()
    }
}

/// Prints a node and everything below it.
struct Subtree<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> fmt::Debug for Subtree<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.tree.node(self.id);
        let child = |id: Option<NodeId>| {
            id.map(|id| Subtree {
                tree: self.tree,
                id,
            })
        };
        f.debug_struct("Node")
            .field("value", &node.value)
            .field("multiplicity", &node.meta.multiplicity)
            .field("height", &node.height)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
