//! Error type shared by the geometry, layout and DRC modules

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrcError {
    /// A value violated a construction-time invariant (range, strictness, emptiness)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation does not accept this kind of input (e.g. curved path segments)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Unknown cell: {0}")]
    UnknownCell(String),

    #[error("Cyclic cell hierarchy through: {0}")]
    CyclicHierarchy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DrcError>;

/// Shorthand for building an [`DrcError::InvalidArgument`]
pub(crate) fn invalid(msg: impl Into<String>) -> DrcError {
    DrcError::InvalidArgument(msg.into())
}
