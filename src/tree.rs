//! The tree itself: an arena of nodes plus the root link.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 2, 8, 1, 3, 7, 9] {
//!     tree.insert(key);
//! }
//!
//! // Deleting a node with two children promotes its successor.
//! let removed = tree.delete(&5).unwrap();
//! assert_eq!(removed.key(), &5);
//! assert_eq!(tree.root().map(|root| *root.key()), Some(7));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 7, 8, 9]);
//!
//! // Absence is a normal outcome.
//! assert!(tree.delete(&5).is_none());
//! ```

use std::fmt;

use crate::iter::{Iter, Levels};
use crate::node::{Direction, Node, NodeId, NodeRef};
use crate::RotationError;

/// One arena cell. `generation` changes every time the slot is vacated so that ids handed out for
/// the previous occupant stop resolving.
#[derive(Clone)]
pub(crate) struct Slot<K> {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node<K>>,
}

/// An unbalanced Binary Search Tree with parent links. Equal keys are stored, not merged: a
/// duplicate always goes into the right subtree of its equal.
#[derive(Clone)]
pub struct Tree<K> {
    pub(crate) slots: Vec<Slot<K>>,
    /// Indices of vacant slots, reused before the arena grows.
    pub(crate) free: Vec<usize>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.levels().map(|(_, node)| node).collect::<Vec<_>>())
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// True iff the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of levels in the tree. An empty tree has height 0, a lone root has height 1.
    pub fn height(&self) -> usize {
        self.levels().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    /// Looks up a node by id. Returns `None` if the node has been deleted since the id was issued.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.get(id).map(|_| NodeRef::new(self, id))
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root
            .map(|root| &self.node_at(self.extreme(root, Direction::Left)).key)
    }

    /// The largest key in the tree. With duplicates this is the last inserted copy.
    pub fn max(&self) -> Option<&K> {
        self.root
            .map(|root| &self.node_at(self.extreme(root, Direction::Right)).key)
    }

    /// Sorted (in-order) iteration over the keys.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Breadth-first iteration over `(depth, node)` pairs, starting with the root at depth 1.
    pub fn levels(&self) -> Levels<'_, K> {
        Levels::new(self)
    }

    /// Removes every node. Ids issued before the call no longer resolve.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.root = None;
        self.len = 0;
    }

    /// Finds the first node on the search path whose key equals `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.search(&1).map(|node| *node.key()), Some(1));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>>
    where
        K: Ord,
    {
        self.search_with(key, |_| {})
    }

    /// Like [`Tree::search`] but calls `visit` with every node on the search path, in order,
    /// including the match.
    pub fn search_with<'a>(
        &'a self,
        key: &K,
        mut visit: impl FnMut(NodeRef<'a, K>),
    ) -> Option<NodeRef<'a, K>>
    where
        K: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = NodeRef::new(self, id);
            visit(node);
            current = match key.cmp(node.key()) {
                std::cmp::Ordering::Less => self.child(id, Direction::Left),
                std::cmp::Ordering::Equal => return Some(node),
                std::cmp::Ordering::Greater => self.child(id, Direction::Right),
            };
        }
        None
    }

    fn find(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        self.search(key).map(|node| node.id())
    }

    /// Inserts `key` as a new leaf and returns its id. Duplicates are allowed and go right.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let five = tree.insert(5);
    /// let other_five = tree.insert(5);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.node(five).unwrap().right().unwrap().id(), other_five);
    /// ```
    pub fn insert(&mut self, key: K) -> NodeId
    where
        K: Ord,
    {
        self.insert_with(key, |_| {})
    }

    /// Like [`Tree::insert`] but calls `visit` with every node passed on the way down to the new
    /// leaf's parent.
    pub fn insert_with(&mut self, key: K, mut visit: impl FnMut(NodeRef<'_, K>)) -> NodeId
    where
        K: Ord,
    {
        let mut attach_to = None;
        let mut current = self.root;
        while let Some(id) = current {
            visit(NodeRef::new(self, id));
            let side = if key < self.node_at(id).key {
                Direction::Left
            } else {
                Direction::Right
            };
            attach_to = Some((id, side));
            current = self.child(id, side);
        }

        let id = self.alloc(key);
        match attach_to {
            Some((parent, side)) => self.set_child(parent, side, Some(id)),
            None => self.root = Some(id),
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?id, parent = ?attach_to.map(|(parent, _)| parent), "inserted leaf");

        self.check();
        id
    }

    /// Deletes the first node found with `key` and returns it, fully detached. If no node has the
    /// key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// let removed = tree.delete(&1).unwrap();
    ///
    /// assert!(removed.is_detached());
    /// assert_eq!(removed.into_key(), 1);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<Node<K>>
    where
        K: Ord,
    {
        let id = self.find(key)?;
        let replacement = match (
            self.child(id, Direction::Left),
            self.child(id, Direction::Right),
        ) {
            (left, None) => left.map(|left| self.remove_as_subtree(left)),
            (None, Some(right)) => Some(self.remove_as_subtree(right)),
            (Some(left), Some(right)) => Some(self.promote_successor(id, left, right)),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, replacement = ?replacement, "deleting node");

        self.replace_with(id, replacement);
        let node = self.release(id);
        debug_assert!(node.is_detached(), "Deleted nodes are fully unlinked");

        self.check();
        Some(node)
    }

    /// Unlinks the successor of `id` (which has both children) and gives it `id`'s children. The
    /// returned successor is detached, ready to be spliced into `id`'s place.
    fn promote_successor(&mut self, id: NodeId, left: NodeId, right: NodeId) -> NodeId {
        let successor = self
            .successor(id)
            .expect("A node with a right child has a successor");

        if successor == right {
            // It has no left child, so `left` can hang straight off it.
            self.remove_as_subtree(successor);
        } else {
            // The successor is the leftmost node below `right`, so it is a left child and its
            // right subtree takes its place.
            let successor_parent = self
                .node_at(successor)
                .parent
                .expect("An interior successor has a parent");
            let orphan = self.child(successor, Direction::Right);
            if let Some(orphan) = orphan {
                self.remove_as_subtree(orphan);
            }
            self.remove_as_subtree(successor);
            self.set_left(successor_parent, orphan);

            self.remove_as_subtree(right);
            self.set_right(successor, Some(right));
        }

        self.remove_as_subtree(left);
        self.set_left(successor, Some(left));
        successor
    }

    /// Rotates the subtree rooted at the first node with `key` to the left and returns the new
    /// subtree root (the node's former right child).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Direction, RotationError, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// let new_root = tree.rotate_left(&1).unwrap();
    /// assert_eq!(tree.root().unwrap().id(), new_root);
    ///
    /// assert_eq!(tree.rotate_left(&1), Err(RotationError::Unavailable(Direction::Right)));
    /// assert_eq!(tree.rotate_left(&42), Err(RotationError::NotFound));
    /// ```
    pub fn rotate_left(&mut self, key: &K) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        let id = self.find(key).ok_or(RotationError::NotFound)?;
        self.rotate_left_at(id)
    }

    /// Mirror image of [`Tree::rotate_left`]: the node's left child becomes the subtree root.
    pub fn rotate_right(&mut self, key: &K) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        let id = self.find(key).ok_or(RotationError::NotFound)?;
        self.rotate_right_at(id)
    }

    /// Rotates the subtree rooted at `id` to the left. The node's right child takes its place,
    /// the node becomes that child's left child, and the child's old left subtree moves across
    /// to become the node's right subtree.
    ///
    /// Fails with [`RotationError::EqualKeys`] if the right child's key equals the node's.
    pub fn rotate_left_at(&mut self, id: NodeId) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        self.rotate_at(id, Direction::Left)
    }

    /// Rotates the subtree rooted at `id` to the right.
    pub fn rotate_right_at(&mut self, id: NodeId) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        self.rotate_at(id, Direction::Right)
    }

    // `Ord` is needed to refuse left rotations between equal keys.
    fn rotate_at(&mut self, id: NodeId, direction: Direction) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        if self.get(id).is_none() {
            return Err(RotationError::StaleNode);
        }
        let new_root = self.rotate(id, direction)?;
        self.check();
        Ok(new_root)
    }

    fn alloc(&mut self, key: K) -> NodeId {
        self.len += 1;
        let node = Some(Node::new(key));
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = node;
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node,
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Takes an unlinked node out of the arena.
    fn release(&mut self, id: NodeId) -> Node<K> {
        let slot = &mut self.slots[id.index];
        let node = slot.node.take().expect("Released nodes are live");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        node
    }

    fn check(&self)
    where
        K: Ord,
    {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    /// Panics if the tree is malformed: keys out of order, a parent link that doesn't mirror its
    /// child link, a second parentless node, a node reachable twice, or arena bookkeeping that
    /// doesn't add up.
    pub(crate) fn assert_invariants(&self)
    where
        K: Ord,
    {
        let live = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        assert_eq!(live, self.len, "Live slots must match the node count");
        assert_eq!(self.free.len() + self.len, self.slots.len());

        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "An empty tree has no nodes");
            return;
        };
        assert_eq!(self.node_at(root).parent, None, "The root has no parent");

        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack = vec![(root, None::<&K>, None::<&K>)];
        let mut visited = 0;
        while let Some((id, lower, upper)) = stack.pop() {
            visited += 1;
            assert!(visited <= self.len, "A node is reachable more than once");

            let node = self.node_at(id);
            if let Some(lower) = lower {
                assert!(*lower <= node.key, "Right subtree key below its ancestor");
            }
            if let Some(upper) = upper {
                assert!(node.key < *upper, "Left subtree key not below its ancestor");
            }

            if let Some(left) = node.left {
                assert_eq!(self.node_at(left).parent, Some(id), "Parent must mirror child");
                stack.push((left, lower, Some(&node.key)));
            }
            if let Some(right) = node.right {
                assert_eq!(self.node_at(right).parent, Some(id), "Parent must mirror child");
                stack.push((right, Some(&node.key), upper));
            }
        }
        assert_eq!(visited, self.len, "Every node is reachable from the root");
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}
