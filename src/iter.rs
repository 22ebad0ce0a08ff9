use std::collections::VecDeque;

use crate::node::{NodeId, NodeRef};
use crate::Tree;

/// In-order iterator over a tree's keys. Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    curr: Option<NodeId>,
    stack: Vec<NodeId>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self {
            tree,
            curr: tree.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(curr) = self.curr {
            self.stack.push(curr);
            self.curr = self.tree.node_at(curr).left;
        }

        let node = self.tree.node_at(self.stack.pop()?);
        self.curr = node.right;
        Some(&node.key)
    }
}

/// Breadth-first iterator over `(depth, node)` pairs. Created by [`Tree::levels`].
pub struct Levels<'a, K> {
    tree: &'a Tree<K>,
    queue: VecDeque<(usize, NodeId)>,
}

impl<'a, K> Levels<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self {
            tree,
            queue: tree.root.map(|root| (1, root)).into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = (usize, NodeRef<'a, K>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.queue.pop_front()?;
        let node = self.tree.node_at(id);
        self.queue
            .extend([node.left, node.right].into_iter().flatten().map(|child| (depth + 1, child)));
        Some((depth, NodeRef::new(self.tree, id)))
    }
}
