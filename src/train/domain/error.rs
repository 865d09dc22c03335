//! Validation errors for train domain values.

use super::{TrainId, TrainStatus};
use crate::roster::domain::LocomotiveId;
use thiserror::Error;

/// Errors returned while constructing or transitioning train domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrainDomainError {
    /// A train was created or edited with no locomotives.
    #[error("train must have at least one locomotive")]
    NoLocomotives,

    /// `maxCapacity` was outside `1..=100`.
    #[error("train maxCapacity must be between 1 and 100, got {0}")]
    InvalidMaxCapacity(u32),

    /// A status transition is not permitted by the state machine.
    #[error("train {id} cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The train whose transition was rejected.
        id: TrainId,
        /// The train's status before the attempted transition.
        from: TrainStatus,
        /// The status the caller attempted to transition to.
        to: TrainStatus,
    },

    /// An edit or delete was attempted on a train outside `Planned`.
    #[error("train {id} is immutable in status {status:?}")]
    ImmutableInState {
        /// The train the edit was attempted against.
        id: TrainId,
        /// The train's current status.
        status: TrainStatus,
    },

    /// A requested locomotive is already assigned to another non-terminal
    /// train.
    #[error("locomotive {0} is already assigned to another active train")]
    LocomotiveAlreadyAssigned(LocomotiveId),

    /// A train name collided with another train in the same session.
    #[error("train name '{0}' is already used in this session")]
    DuplicateName(String),
}
