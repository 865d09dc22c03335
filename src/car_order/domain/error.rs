//! Validation errors for car-order domain values.

use super::{CarOrderId, CarOrderStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning car-order domain
/// values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CarOrderDomainError {
    /// A demand config's `compatibleCarTypes` set was empty.
    #[error("car order must name at least one compatible car type")]
    EmptyCompatibleCarTypes,

    /// A status transition is not permitted by the state machine.
    #[error("car order {id} cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The order whose transition was rejected.
        id: CarOrderId,
        /// The order's status before the attempted transition.
        from: CarOrderStatus,
        /// The status the caller attempted to transition to.
        to: CarOrderStatus,
    },
}
