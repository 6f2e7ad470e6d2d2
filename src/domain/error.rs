//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Errors raised by tree construction and selection operations.
///
/// Every variant is local to the failing call: no state is mutated when one
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("cycle detected in hierarchy at: {0}")]
    CycleDetected(NodeId),

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
