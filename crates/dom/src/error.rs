//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. A query that matches nothing is not an
//! error: searches return `Option` / empty `Vec` for that.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("CDP protocol error: {0}")]
    CdpError(String),

    #[error("Maximum tree depth exceeded: {current} > {max}")]
    MaxDepthExceeded { current: usize, max: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
