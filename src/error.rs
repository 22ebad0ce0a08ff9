use thiserror::Error;

use crate::Direction;

/// Why a rotation did not happen. The tree is unchanged whenever one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    /// No node has the requested key.
    #[error("no node with the requested key")]
    NotFound,
    /// The node has no child on the side that would have to move up.
    #[error("cannot rotate: node has no {0} child")]
    Unavailable(Direction),
    /// A left rotation would put the node to the left of an equal key, and equal keys always
    /// sit to the right.
    #[error("cannot rotate left onto a right child with an equal key")]
    EqualKeys,
    /// The node id refers to a node that has since been deleted.
    #[error("node id refers to a deleted node")]
    StaleNode,
}
