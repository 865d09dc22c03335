//! Switch-list shapes produced by the switch-list planning algorithm.

use crate::car_order::domain::CarOrderId;
use crate::roster::domain::{AarTypeId, CarId, IndustryId, StationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One car's movement within a station: either a pickup onto the train or a
/// setout off of it, to `destination_industry_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarMovement {
    car_id: CarId,
    reporting_marks: String,
    reporting_number: String,
    car_type: AarTypeId,
    destination_industry_id: IndustryId,
    car_order_id: Option<CarOrderId>,
}

impl CarMovement {
    /// Creates a movement entry.
    #[must_use]
    pub fn new(
        car_id: CarId,
        reporting_marks: impl Into<String>,
        reporting_number: impl Into<String>,
        car_type: AarTypeId,
        destination_industry_id: IndustryId,
        car_order_id: Option<CarOrderId>,
    ) -> Self {
        Self {
            car_id,
            reporting_marks: reporting_marks.into(),
            reporting_number: reporting_number.into(),
            car_type,
            destination_industry_id,
            car_order_id,
        }
    }

    /// Returns the moved car's identifier.
    #[must_use]
    pub const fn car_id(&self) -> CarId {
        self.car_id
    }

    /// Returns the car's reporting marks.
    #[must_use]
    pub fn reporting_marks(&self) -> &str {
        &self.reporting_marks
    }

    /// Returns the car's reporting number.
    #[must_use]
    pub fn reporting_number(&self) -> &str {
        &self.reporting_number
    }

    /// Returns the car's AAR type.
    #[must_use]
    pub const fn car_type(&self) -> AarTypeId {
        self.car_type
    }

    /// Returns the industry this movement delivers the car to.
    #[must_use]
    pub const fn destination_industry_id(&self) -> IndustryId {
        self.destination_industry_id
    }

    /// Returns the car order this movement fulfils, if any. `None` for
    /// home-yard routing moves, which are not demand-driven.
    #[must_use]
    pub const fn car_order_id(&self) -> Option<CarOrderId> {
        self.car_order_id
    }
}

/// One station's plan: the cars picked up there and the cars set out there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationPlan {
    station_id: StationId,
    station_name: String,
    pickups: Vec<CarMovement>,
    setouts: Vec<CarMovement>,
}

impl StationPlan {
    /// Creates a station plan entry.
    #[must_use]
    pub const fn new(
        station_id: StationId,
        station_name: String,
        pickups: Vec<CarMovement>,
        setouts: Vec<CarMovement>,
    ) -> Self {
        Self {
            station_id,
            station_name,
            pickups,
            setouts,
        }
    }

    /// Returns the station identifier.
    #[must_use]
    pub const fn station_id(&self) -> StationId {
        self.station_id
    }

    /// Returns the station name.
    #[must_use]
    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    /// Returns the cars picked up at this station.
    #[must_use]
    pub fn pickups(&self) -> &[CarMovement] {
        &self.pickups
    }

    /// Returns the cars set out at this station.
    #[must_use]
    pub fn setouts(&self) -> &[CarMovement] {
        &self.setouts
    }
}

/// The full per-station plan a train executes, generated from pending
/// orders, available cars, train capacity, and the route's station sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchList {
    stations: Vec<StationPlan>,
    total_pickups: u32,
    total_setouts: u32,
    final_car_count: u32,
    generated_at: DateTime<Utc>,
}

impl SwitchList {
    /// Assembles a switch list from its computed parts.
    #[must_use]
    pub const fn new(
        stations: Vec<StationPlan>,
        total_pickups: u32,
        total_setouts: u32,
        final_car_count: u32,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stations,
            total_pickups,
            total_setouts,
            final_car_count,
            generated_at,
        }
    }

    /// Returns the per-station plans, in route order.
    #[must_use]
    pub fn stations(&self) -> &[StationPlan] {
        &self.stations
    }

    /// Returns the total number of pickups across all stations.
    #[must_use]
    pub const fn total_pickups(&self) -> u32 {
        self.total_pickups
    }

    /// Returns the total number of setouts across all stations.
    #[must_use]
    pub const fn total_setouts(&self) -> u32 {
        self.total_setouts
    }

    /// Returns the number of cars the train is carrying once the plan is
    /// fully executed.
    #[must_use]
    pub const fn final_car_count(&self) -> u32 {
        self.final_car_count
    }

    /// Returns when this plan was generated.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}
