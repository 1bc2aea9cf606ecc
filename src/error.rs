use crate::NodeId;

/// Errors for operations whose preconditions on a node handle do not hold.
///
/// Navigational misses (an absent key, no successor, `kth` out of range) are not errors; those
/// operations return `None` instead. Every operation that can fail checks its inputs before
/// touching the tree, so an `Err` always leaves the tree unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The handle was released (or never came from this tree).
    #[error("node {0:?} does not refer to a live node")]
    UnknownNode(NodeId),
    /// The node is linked into the tree but the operation needs a detached node.
    #[error("node {0:?} is already linked into the tree")]
    Attached(NodeId),
    /// The node is not linked into the tree but the operation needs it to be.
    #[error("node {0:?} is not linked into the tree")]
    Detached(NodeId),
}
