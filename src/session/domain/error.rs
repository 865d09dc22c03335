//! Validation errors for session domain values.

use thiserror::Error;

/// Errors returned while constructing or validating session domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// `updateSessionDescription` was called with an empty description or
    /// one exceeding 500 characters.
    #[error("session description must be 1-500 characters, got {0} characters")]
    InvalidDescription(usize),

    /// A captured or stored snapshot failed structural validation.
    #[error("snapshot is invalid: {0}")]
    SnapshotInvalid(String),

    /// `rollbackSession` was called at session 1, or with no snapshot
    /// present.
    #[error("cannot roll back: {0}")]
    CannotRollback(&'static str),
}
