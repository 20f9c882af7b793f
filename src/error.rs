//! Error types for engine operations
//!
//! Every error here is recoverable: the rejected operation is a no-op and
//! the editor stays interactive.

use crate::types::{EdgeId, NodeId};
use thiserror::Error;

/// Errors returned by store and editor operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A referenced node or edge does not exist
    #[error("{kind} `{id}` does not exist")]
    InvalidReference { kind: RefKind, id: String },

    /// Attempt to delete the root node
    #[error("node `{0}` is protected and cannot be removed")]
    ProtectedEntity(NodeId),

    /// Attempt to connect a node to itself
    #[error("cannot link node `{0}` to itself")]
    DegenerateLink(NodeId),

    /// Imported content failed structural validation
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// An image payload could not be decoded
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// What kind of record an [`EngineError::InvalidReference`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Node,
    Edge,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefKind::Node => f.write_str("node"),
            RefKind::Edge => f.write_str("edge"),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn missing_node(id: &NodeId) -> Self {
        EngineError::InvalidReference {
            kind: RefKind::Node,
            id: id.to_string(),
        }
    }

    pub fn missing_edge(id: &EdgeId) -> Self {
        EngineError::InvalidReference {
            kind: RefKind::Edge,
            id: id.to_string(),
        }
    }

    /// Errors the user must acknowledge with a blocking notice
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            EngineError::ProtectedEntity(_) | EngineError::DegenerateLink(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::MalformedImport(e.to_string())
    }
}

impl From<image::ImageError> for EngineError {
    fn from(e: image::ImageError) -> Self {
        EngineError::InvalidImage(e.to_string())
    }
}
