//! Repository port for train persistence.

use crate::store::StoreError;
use crate::train::domain::{Train, TrainId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for train repository operations.
pub type TrainRepositoryResult<T> = Result<T, TrainRepositoryError>;

/// Errors returned by train repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrainRepositoryError {
    /// The underlying document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence contract for trains.
///
/// Uniqueness checks (name per session, locomotive non-conflict) are
/// computed by the service layer over [`Self::list`], the same way
/// `RosterRepository` leaves referential checks to its callers; the
/// store contract only guarantees equality lookups, not the conjunction
/// of "status in {Planned, In Progress}" these checks need.
#[async_trait]
pub trait TrainRepository: Send + Sync {
    /// Returns every train.
    async fn list(&self) -> TrainRepositoryResult<Vec<Train>>;

    /// Finds a train by id.
    async fn find(&self, id: TrainId) -> TrainRepositoryResult<Option<Train>>;

    /// Creates a new train.
    async fn insert(&self, train: &Train) -> TrainRepositoryResult<()>;

    /// Replaces an existing train in full.
    async fn replace(&self, train: &Train) -> TrainRepositoryResult<()>;

    /// Deletes a train, returning whether one was removed.
    async fn remove(&self, id: TrainId) -> TrainRepositoryResult<bool>;

    /// Deletes every train. Used by rollback, which re-creates every train
    /// from the snapshot verbatim.
    async fn clear(&self) -> TrainRepositoryResult<usize>;
}
