//! This crate exposes a pointer-linked Binary Search Tree whose nodes know their parents, with
//! manually invoked rotations.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! will typically store some sort of key and will sometimes have child `Node`s. The invariants
//! kept here are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a key less than its
//!    own key.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a key greater than
//!    or equal to its own key. Duplicates are kept and always go right.
//! 3. Every `Node` except the root has a parent, and that parent has it as a child.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! This tree does not balance itself. [`Tree::rotate_left`] and [`Tree::rotate_right`] are
//! primitives for the caller to use; an ascending run of inserts produces a tree of height `N`.
//!
//! ## Layout
//!
//! Nodes live in an arena owned by the [`Tree`] and refer to one another by [`NodeId`]. Child
//! links own; parent links only point back. The tree hands out read-only [`NodeRef`] views for
//! traversal (enough for the [`render`] module) and keeps every pointer rewrite to itself, so the
//! root can be retargeted in the same step that restructures the nodes below it.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for inserts, deletes, rotations and root changes.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
mod node;
pub mod render;
mod tree;

pub use error::RotationError;
pub use iter::{Iter, Levels};
pub use node::{Direction, Node, NodeId, NodeRef};
pub use tree::Tree;
