//! Lazy traversals over a [`Tree`]. Each iterator keeps its own explicit stack or queue so every
//! call to `next` does one step of work. To start over, ask the tree for a fresh iterator.

use std::iter::FusedIterator;

use crate::bst::Tree;
use crate::node::{Node, NodeId};
use crate::util::{Queue, Stack};

/// Left subtree, node, right subtree. See [`Tree::in_order`].
pub struct InOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Stack<NodeId>,
    current: Option<NodeId>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            stack: Stack::new(),
            current: tree.root_id(),
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.tree.node(id).left;
        }

        let node = self.tree.node(self.stack.pop()?);
        self.current = node.right;
        Some(node)
    }
}

impl<T> FusedIterator for InOrder<'_, T> {}

/// Node, left subtree, right subtree. See [`Tree::pre_order`].
pub struct PreOrder<'a, T> {
    tree: &'a Tree<T>,
    // Right subtrees still to be visited once the current left spine runs out.
    pending: Stack<NodeId>,
    current: Option<NodeId>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            pending: Stack::new(),
            current: tree.root_id(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = match self.current {
            Some(id) => id,
            None => self.pending.pop()?,
        };

        let node = self.tree.node(id);
        if let Some(right) = node.right {
            self.pending.push(right);
        }
        self.current = node.left;
        Some(node)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

/// Left subtree, right subtree, node. See [`Tree::post_order`].
pub struct PostOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Stack<NodeId>,
    current: Option<NodeId>,
    last_visited: Option<NodeId>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            stack: Stack::new(),
            current: tree.root_id(),
            last_visited: None,
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(id) = self.current {
                self.stack.push(id);
                self.current = self.tree.node(id).left;
            }

            let top = *self.stack.peek()?;
            let node = self.tree.node(top);
            match node.right {
                // Only go right the first time we come back up to this node.
                Some(right) if self.last_visited != Some(right) => self.current = Some(right),
                _ => {
                    self.stack.pop();
                    self.last_visited = Some(top);
                    return Some(node);
                }
            }
        }
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

/// Level by level, first in first out. See [`Tree::bfs`].
pub struct Bfs<'a, T> {
    tree: &'a Tree<T>,
    queue: Queue<NodeId>,
}

impl<'a, T> Bfs<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let mut queue = Queue::new();
        if let Some(root) = tree.root_id() {
            queue.enqueue(root);
        }
        Self { tree, queue }
    }
}

impl<'a, T> Iterator for Bfs<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.queue.dequeue()?);
        if let Some(left) = node.left {
            self.queue.enqueue(left);
        }
        if let Some(right) = node.right {
            self.queue.enqueue(right);
        }
        Some(node)
    }
}

impl<T> FusedIterator for Bfs<'_, T> {}

/// Depth first, last in first out. See [`Tree::dfs`].
pub struct Dfs<'a, T> {
    tree: &'a Tree<T>,
    stack: Stack<NodeId>,
}

impl<'a, T> Dfs<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let mut stack = Stack::new();
        if let Some(root) = tree.root_id() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for Dfs<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.stack.pop()?);
        // Right goes on first so left comes off first.
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(node)
    }
}

impl<T> FusedIterator for Dfs<'_, T> {}

/// Values in ascending order, repeated by multiplicity. See [`Tree::values`].
pub struct Values<'a, T> {
    nodes: InOrder<'a, T>,
    repeat: Option<(&'a T, usize)>,
}

impl<'a, T> Values<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            nodes: InOrder::new(tree),
            repeat: None,
        }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.repeat {
            Some((value, remaining)) if remaining > 0 => {
                self.repeat = Some((value, remaining - 1));
                Some(value)
            }
            _ => {
                let node = self.nodes.next()?;
                self.repeat = Some((&node.value, node.meta.multiplicity - 1));
                Some(&node.value)
            }
        }
    }
}

impl<T> FusedIterator for Values<'_, T> {}
