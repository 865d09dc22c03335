//! Repository port for car-order persistence.

use crate::car_order::domain::{CarOrder, CarOrderId};
use crate::store::StoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for car-order repository operations.
pub type CarOrderRepositoryResult<T> = Result<T, CarOrderRepositoryError>;

/// Errors returned by car-order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CarOrderRepositoryError {
    /// The underlying document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence contract for car orders.
///
/// Filtering beyond equality (substring search, status/session/industry
/// combinations) is the service layer's responsibility, composed over
/// [`Self::list`]; the underlying store only guarantees per-field equality
/// queries, which is not expressive enough for the case-insensitive
/// substring search `getOrdersWithFilters` supports.
#[async_trait]
pub trait CarOrderRepository: Send + Sync {
    /// Returns every car order.
    async fn list(&self) -> CarOrderRepositoryResult<Vec<CarOrder>>;

    /// Finds a car order by id.
    async fn find(&self, id: CarOrderId) -> CarOrderRepositoryResult<Option<CarOrder>>;

    /// Creates a new car order.
    async fn insert(&self, order: &CarOrder) -> CarOrderRepositoryResult<()>;

    /// Replaces an existing car order in full.
    async fn replace(&self, order: &CarOrder) -> CarOrderRepositoryResult<()>;

    /// Deletes a car order, returning whether one was removed.
    async fn remove(&self, id: CarOrderId) -> CarOrderRepositoryResult<bool>;

    /// Deletes every car order. Used by rollback, which re-creates every
    /// order from the snapshot verbatim.
    async fn clear(&self) -> CarOrderRepositoryResult<usize>;
}
