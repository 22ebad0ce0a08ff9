//! Nodes and the pointer-level primitives that rewire them.
//!
//! A node lives in a slot of its [`Tree`]'s arena and is named by a [`NodeId`]. Child links are the
//! owning edges of the tree; `parent` is a back-reference that must always mirror them. Every
//! write to a child slot goes through [`Tree::set_child`] so the mirror is maintained in one place.

use std::fmt;

use crate::{RotationError, Tree};

/// A handle to a node inside a [`Tree`].
///
/// Ids stay valid until the node is deleted (or the tree is cleared). After that the slot may be
/// reused, but the reused slot carries a new generation so the old id no longer resolves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// Which child slot of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The left child. Holds keys strictly less than the parent's.
    Left,
    /// The right child. Holds keys greater than or equal to the parent's.
    Right,
}

impl Direction {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A single tree cell: a key plus its three links.
///
/// Inside a tree a `Node` is only reachable through a [`NodeRef`]. [`Tree::delete`] hands the
/// removed cell back by value with all of its links cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// The key this node was inserted with.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the node and returns its key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// The parent link.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The left child link.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child link.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// True if the node has no parent and no children.
    pub fn is_detached(&self) -> bool {
        self.parent.is_none() && self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn child(&self, side: Direction) -> Option<NodeId> {
        match side {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Direction) -> &mut Option<NodeId> {
        match side {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// A read-only view of a node that is currently linked into a tree.
///
/// This is the whole traversal surface offered to renderers and other observers: it can walk
/// up and down the tree but never change it.
pub struct NodeRef<'a, K> {
    tree: &'a Tree<K>,
    id: NodeId,
    node: &'a Node<K>,
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }
}
impl<K> Eq for NodeRef<'_, K> {}

impl<K> fmt::Debug for NodeRef<'_, K>
where
    K: fmt::Debug,
{
    // Links print as ids; nesting whole subtrees would recurse once per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("key", &self.node.key)
            .field("parent", &self.node.parent)
            .field("left", &self.node.left)
            .field("right", &self.node.right)
            .finish()
    }
}

impl<'a, K> NodeRef<'a, K> {
    /// Builds a view of `id`, which the caller guarantees is live in `tree`.
    pub(crate) fn new(tree: &'a Tree<K>, id: NodeId) -> Self {
        Self {
            tree,
            id,
            node: tree.node_at(id),
        }
    }

    /// The handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node.parent.map(|id| Self::new(self.tree, id))
    }

    /// The left child.
    pub fn left(&self) -> Option<Self> {
        self.child(Direction::Left)
    }

    /// The right child.
    pub fn right(&self) -> Option<Self> {
        self.child(Direction::Right)
    }

    /// The child on the given side.
    pub fn child(&self, side: Direction) -> Option<Self> {
        self.node.child(side).map(|id| Self::new(self.tree, id))
    }

    /// True iff this node is its parent's left child. False for the root.
    pub fn is_left_child(&self) -> bool {
        self.tree.side_of(self.id) == Some(Direction::Left)
    }

    /// True iff this node is its parent's right child. False for the root.
    pub fn is_right_child(&self) -> bool {
        self.tree.side_of(self.id) == Some(Direction::Right)
    }

    /// True iff this node is the tree's root.
    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    /// True iff this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }

    /// The rightmost node of the left subtree, if there is a left subtree.
    pub fn predecessor(&self) -> Option<Self> {
        self.tree
            .predecessor(self.id)
            .map(|id| Self::new(self.tree, id))
    }

    /// The leftmost node of the right subtree, if there is a right subtree.
    pub fn successor(&self) -> Option<Self> {
        self.tree.successor(self.id).map(|id| Self::new(self.tree, id))
    }
}

impl<K> Tree<K> {
    /// Resolves `id` to a live node, rejecting ids whose node has been deleted.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn node_at(&self, id: NodeId) -> &Node<K> {
        self.get(id).expect("Linked node ids are always live")
    }

    fn node_at_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .expect("Linked node ids are always live")
    }

    pub(crate) fn child(&self, id: NodeId, side: Direction) -> Option<NodeId> {
        self.node_at(id).child(side)
    }

    /// Installs `child` on the given side of `id` and, if `child` is a node, points its parent
    /// back at `id`. This is the only place a child slot is written.
    pub(crate) fn set_child(&mut self, id: NodeId, side: Direction, child: Option<NodeId>) {
        *self.node_at_mut(id).child_mut(side) = child;
        if let Some(child) = child {
            self.set_parent(child, Some(id));
        }
    }

    pub(crate) fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Direction::Left, child);
    }

    pub(crate) fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Direction::Right, child);
    }

    /// Writes only the upward link. Callers are responsible for the matching child slot.
    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.node_at_mut(id).parent = parent;
    }

    /// Which of its parent's slots `id` occupies. `None` for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Direction> {
        let parent = self.node_at(id).parent?;
        let parent = self.node_at(parent);
        if parent.left == Some(id) {
            Some(Direction::Left)
        } else {
            debug_assert_eq!(parent.right, Some(id), "Parent must point back at its child");
            Some(Direction::Right)
        }
    }

    /// Cuts `id` (and everything below it) out of its parent's child slot. Its own children are
    /// left alone. Does nothing to the root.
    pub(crate) fn remove_as_subtree(&mut self, id: NodeId) -> NodeId {
        if let Some(parent) = self.node_at(id).parent {
            let side = self.side_of(id).expect("Non-root nodes have a side");
            self.set_child(parent, side, None);
            self.set_parent(id, None);
        }
        id
    }

    /// Splices `replacement` into the position `id` occupies and detaches `id` from its parent.
    ///
    /// Only the parent edge moves: wiring `replacement`'s children is up to the caller. If `id`
    /// was the root, the root is retargeted to `replacement` (possibly emptying the tree).
    pub(crate) fn replace_with(
        &mut self,
        id: NodeId,
        replacement: Option<NodeId>,
    ) -> Option<NodeId> {
        if replacement == Some(id) {
            return replacement;
        }
        if let Some(replacement) = replacement {
            debug_assert!(
                self.node_at(replacement).parent.is_none(),
                "Replacement must be detached before it is spliced in"
            );
        }

        match self.node_at(id).parent {
            Some(parent) => {
                let side = self.side_of(id).expect("Non-root nodes have a side");
                self.set_child(parent, side, replacement);
            }
            None => {
                debug_assert_eq!(self.root, Some(id), "Only the root has no parent");
                #[cfg(feature = "tracing")]
                tracing::debug!(old_root = ?id, new_root = ?replacement, "retargeting root");
                self.root = replacement;
            }
        }
        self.set_parent(id, None);

        replacement
    }

    /// Follows the `side` links from `id` as far as they go.
    pub(crate) fn extreme(&self, mut id: NodeId, side: Direction) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Direction::Left)
            .map(|left| self.extreme(left, Direction::Right))
    }

    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Direction::Right)
            .map(|right| self.extreme(right, Direction::Left))
    }

    /// Rotates the subtree rooted at `id` towards `direction` and returns the new subtree root.
    /// On failure nothing has been touched.
    ///
    /// # Diagram
    ///
    /// Rotating left:
    ///
    /// ```text
    ///    Option<parent>              Option<parent>
    ///      /                           /
    ///    old_root (i.e. `id`)       new_root
    ///    /     \                    /     \
    ///   x    new_root   rotate -> old_root  z
    ///         /  \                /  \
    ///        y    z              x    y
    /// ```
    ///
    /// `y` is the "problem child": it has to change sides. Rotating right is the mirror image.
    ///
    /// Equal keys live to the right, so a left rotation onto a right child with the same key
    /// would put `old_root` on the left of its equal. That rotation is refused.
    pub(crate) fn rotate(
        &mut self,
        id: NodeId,
        direction: Direction,
    ) -> Result<NodeId, RotationError>
    where
        K: Ord,
    {
        let raised_side = direction.opposite();
        let new_root = self
            .child(id, raised_side)
            .ok_or(RotationError::Unavailable(raised_side))?;
        if direction == Direction::Left && self.node_at(new_root).key == self.node_at(id).key {
            return Err(RotationError::EqualKeys);
        }

        let problem_child = self.child(new_root, direction);
        if let Some(problem_child) = problem_child {
            self.remove_as_subtree(problem_child);
        }

        self.remove_as_subtree(new_root);
        self.replace_with(id, Some(new_root));
        self.set_child(new_root, direction, Some(id));
        self.set_child(id, raised_side, problem_child);

        #[cfg(feature = "tracing")]
        tracing::debug!(old_root = ?id, new_root = ?new_root, %direction, "rotated subtree");

        Ok(new_root)
    }
}
