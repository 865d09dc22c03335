//! Car rolling stock.

use super::{AarTypeId, CarId, IndustryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A piece of freight rolling stock tracked as it moves between industries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    id: CarId,
    reporting_marks: String,
    reporting_number: String,
    car_type: AarTypeId,
    color: String,
    home_yard: IndustryId,
    current_industry: IndustryId,
    is_in_service: bool,
    sessions_at_current_location: u32,
    last_moved: Option<DateTime<Utc>>,
}

impl Car {
    /// Creates a new car, starting at `current_industry` with
    /// `sessions_at_current_location = 0`.
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    #[must_use]
    pub fn new(
        reporting_marks: impl Into<String>,
        reporting_number: impl Into<String>,
        car_type: AarTypeId,
        color: impl Into<String>,
        home_yard: IndustryId,
        current_industry: IndustryId,
        is_in_service: bool,
    ) -> Self {
        Self {
            id: CarId::new(),
            reporting_marks: reporting_marks.into(),
            reporting_number: reporting_number.into(),
            car_type,
            color: color.into(),
            home_yard,
            current_industry,
            is_in_service,
            sessions_at_current_location: 0,
            last_moved: None,
        }
    }

    /// Reconstructs a car from persisted fields.
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    #[must_use]
    pub const fn from_parts(
        id: CarId,
        reporting_marks: String,
        reporting_number: String,
        car_type: AarTypeId,
        color: String,
        home_yard: IndustryId,
        current_industry: IndustryId,
        is_in_service: bool,
        sessions_at_current_location: u32,
        last_moved: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            reporting_marks,
            reporting_number,
            car_type,
            color,
            home_yard,
            current_industry,
            is_in_service,
            sessions_at_current_location,
            last_moved,
        }
    }

    /// Returns the car identifier.
    #[must_use]
    pub const fn id(&self) -> CarId {
        self.id
    }

    /// Returns the reporting marks.
    #[must_use]
    pub fn reporting_marks(&self) -> &str {
        &self.reporting_marks
    }

    /// Returns the reporting number.
    #[must_use]
    pub fn reporting_number(&self) -> &str {
        &self.reporting_number
    }

    /// Returns the AAR car type.
    #[must_use]
    pub const fn car_type(&self) -> AarTypeId {
        self.car_type
    }

    /// Returns the car's color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the car's home yard.
    #[must_use]
    pub const fn home_yard(&self) -> IndustryId {
        self.home_yard
    }

    /// Returns the industry the car currently sits at.
    #[must_use]
    pub const fn current_industry(&self) -> IndustryId {
        self.current_industry
    }

    /// Returns whether the car is in service.
    #[must_use]
    pub const fn is_in_service(&self) -> bool {
        self.is_in_service
    }

    /// Returns how many sessions the car has spent at its current location.
    #[must_use]
    pub const fn sessions_at_current_location(&self) -> u32 {
        self.sessions_at_current_location
    }

    /// Returns the timestamp of the car's last move, if it has ever moved.
    #[must_use]
    pub const fn last_moved(&self) -> Option<DateTime<Utc>> {
        self.last_moved
    }

    /// Increments the session counter by one. Called for every car on every
    /// session advance.
    pub fn increment_sessions_at_current_location(&mut self) {
        self.sessions_at_current_location = self.sessions_at_current_location.saturating_add(1);
    }

    /// Moves the car to `destination`, resetting the session counter to zero
    /// and stamping `last_moved`.
    pub fn move_to(&mut self, destination: IndustryId, clock: &impl mockable::Clock) {
        self.current_industry = destination;
        self.sessions_at_current_location = 0;
        self.last_moved = Some(clock.utc());
    }

    /// Restores the car's location and session counter directly, bypassing
    /// [`Self::move_to`]'s timestamp side effect. Used by snapshot
    /// restoration (advance's in-flight-train reversion, and rollback),
    /// which must reproduce prior state exactly rather than recording a new
    /// move.
    pub fn restore_location(&mut self, industry: IndustryId, sessions_at_current_location: u32) {
        self.current_industry = industry;
        self.sessions_at_current_location = sessions_at_current_location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;

    fn sample_car() -> Car {
        Car::new("ATSF", "100", AarTypeId::new(), "brown", IndustryId::new(), IndustryId::new(), true)
    }

    #[test]
    fn new_car_starts_with_zero_dwell_and_no_last_moved() {
        let car = sample_car();
        assert_eq!(car.sessions_at_current_location(), 0);
        assert!(car.last_moved().is_none());
    }

    #[test]
    fn increment_sessions_at_current_location_saturates_instead_of_overflowing() {
        let mut car = sample_car();
        car.restore_location(car.current_industry(), u32::MAX);
        car.increment_sessions_at_current_location();
        assert_eq!(car.sessions_at_current_location(), u32::MAX);
    }

    #[test]
    fn move_to_resets_dwell_and_stamps_last_moved() {
        let mut car = sample_car();
        car.increment_sessions_at_current_location();
        let destination = IndustryId::new();
        car.move_to(destination, &DefaultClock);
        assert_eq!(car.current_industry(), destination);
        assert_eq!(car.sessions_at_current_location(), 0);
        assert!(car.last_moved().is_some());
    }

    #[test]
    fn restore_location_does_not_touch_last_moved() {
        let mut car = sample_car();
        car.move_to(IndustryId::new(), &DefaultClock);
        let stamped = car.last_moved();
        car.restore_location(IndustryId::new(), 3);
        assert_eq!(car.sessions_at_current_location(), 3);
        assert_eq!(car.last_moved(), stamped);
    }
}
