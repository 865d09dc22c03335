//! Repository port for the singleton operating-session record.

use crate::session::domain::OperatingSession;
use crate::store::StoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for session repository operations.
pub type SessionRepositoryResult<T> = Result<T, SessionRepositoryError>;

/// Errors returned by session repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionRepositoryError {
    /// The underlying document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence contract for the singleton operating-session record.
///
/// The "current session" is modeled as a collection with exactly one
/// record: look up by `findAll`, take the first; if missing, the caller
/// creates it. This port mirrors that strategy directly rather than hiding
/// a singleton behind module-level state.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns the singleton session record, or `None` if it has not been
    /// created yet.
    async fn load(&self) -> SessionRepositoryResult<Option<OperatingSession>>;

    /// Creates the singleton session record. Called only when [`Self::load`]
    /// returned `None`.
    async fn create(&self, session: &OperatingSession) -> SessionRepositoryResult<()>;

    /// Replaces the singleton session record in full.
    async fn save(&self, session: &OperatingSession) -> SessionRepositoryResult<()>;
}
