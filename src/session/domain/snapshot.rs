//! Snapshot aggregate: the subset of world state an `advance` captures and a
//! `rollback` replays.

use super::SessionDomainError;
use crate::car_order::domain::CarOrder;
use crate::roster::domain::{CarId, IndustryId};
use crate::train::domain::Train;
use serde::{Deserialize, Serialize};

/// A car's location and dwell counter as captured immediately before an
/// advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCar {
    id: CarId,
    current_industry: IndustryId,
    sessions_at_current_location: u32,
}

impl SnapshotCar {
    /// Captures one car's pre-advance location.
    #[must_use]
    pub const fn new(id: CarId, current_industry: IndustryId, sessions_at_current_location: u32) -> Self {
        Self {
            id,
            current_industry,
            sessions_at_current_location,
        }
    }

    /// Returns the car identifier.
    #[must_use]
    pub const fn id(&self) -> CarId {
        self.id
    }

    /// Returns the car's pre-advance location.
    #[must_use]
    pub const fn current_industry(&self) -> IndustryId {
        self.current_industry
    }

    /// Returns the car's pre-advance dwell counter.
    #[must_use]
    pub const fn sessions_at_current_location(&self) -> u32 {
        self.sessions_at_current_location
    }
}

/// The subset of world state captured immediately before an `advance`:
/// every car's location, every train verbatim, and every car order
/// verbatim. Sufficient to restore the pre-advance world on `rollback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    session_number: u32,
    cars: Vec<SnapshotCar>,
    trains: Vec<Train>,
    car_orders: Vec<CarOrder>,
}

impl Snapshot {
    /// Captures a snapshot from pre-advance world state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::SnapshotInvalid`] if `session_number` is
    /// zero; every other shape constraint is already enforced by the types
    /// of `cars`, `trains`, and `car_orders`.
    pub fn new(
        session_number: u32,
        cars: Vec<SnapshotCar>,
        trains: Vec<Train>,
        car_orders: Vec<CarOrder>,
    ) -> Result<Self, SessionDomainError> {
        let snapshot = Self {
            session_number,
            cars,
            trains,
            car_orders,
        };
        validate_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    /// Returns the session number this snapshot was captured before
    /// advancing past.
    #[must_use]
    pub const fn session_number(&self) -> u32 {
        self.session_number
    }

    /// Returns the captured car locations.
    #[must_use]
    pub fn cars(&self) -> &[SnapshotCar] {
        &self.cars
    }

    /// Returns the captured train records.
    #[must_use]
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Returns the captured car-order records.
    #[must_use]
    pub fn car_orders(&self) -> &[CarOrder] {
        &self.car_orders
    }
}

/// Validates a snapshot's structural shape: `session_number >= 1`. Must be
/// directly callable without a store, both when capturing a snapshot
/// (`advance`) and when reading one back (`rollback`).
///
/// # Errors
///
/// Returns [`SessionDomainError::SnapshotInvalid`] if `session_number` is
/// zero.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), SessionDomainError> {
    if snapshot.session_number == 0 {
        return Err(SessionDomainError::SnapshotInvalid(
            "sessionNumber must be >= 1".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_session_number() {
        let err = Snapshot::new(0, Vec::new(), Vec::new(), Vec::new())
            .expect_err("session number must be >= 1");
        assert!(matches!(err, SessionDomainError::SnapshotInvalid(_)));
    }

    #[test]
    fn accepts_well_formed_snapshot() {
        let snapshot = Snapshot::new(
            1,
            vec![SnapshotCar::new(CarId::new(), IndustryId::new(), 0)],
            Vec::new(),
            Vec::new(),
        )
        .expect("valid snapshot");
        assert_eq!(snapshot.session_number(), 1);
        assert_eq!(snapshot.cars().len(), 1);
    }
}
