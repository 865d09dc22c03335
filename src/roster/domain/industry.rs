//! Industry reference data and car-demand configuration.

use super::{IndustryId, RosterDomainError, StationId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Direction of car movement a demand config or car order represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The industry is receiving goods (a car arrives loaded).
    Inbound,
    /// The industry is shipping goods (a car departs loaded).
    Outbound,
}

/// One industry's periodic demand for a given goods type and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarDemandConfig {
    goods_id: String,
    direction: Direction,
    compatible_car_types: Vec<super::AarTypeId>,
    cars_per_session: u32,
    frequency: u32,
}

impl CarDemandConfig {
    /// Creates a new demand configuration entry.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyCompatibleCarTypes`] if
    /// `compatible_car_types` is empty, or
    /// [`RosterDomainError::InvalidDemandQuantities`] if `cars_per_session`
    /// or `frequency` is zero. Both errors are reported against
    /// `owning_industry` since the config has no identity of its own outside
    /// its owning industry.
    pub fn new(
        goods_id: impl Into<String>,
        direction: Direction,
        compatible_car_types: Vec<super::AarTypeId>,
        cars_per_session: u32,
        frequency: u32,
        owning_industry: IndustryId,
    ) -> Result<Self, RosterDomainError> {
        if compatible_car_types.is_empty() {
            return Err(RosterDomainError::EmptyCompatibleCarTypes(owning_industry));
        }
        if cars_per_session == 0 || frequency == 0 {
            return Err(RosterDomainError::InvalidDemandQuantities(owning_industry));
        }
        Ok(Self {
            goods_id: goods_id.into(),
            direction,
            compatible_car_types,
            cars_per_session,
            frequency,
        })
    }

    /// Returns the goods identifier this config tracks demand for.
    #[must_use]
    pub fn goods_id(&self) -> &str {
        &self.goods_id
    }

    /// Returns the direction of car movement.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the AAR types a fulfilling car may have.
    #[must_use]
    pub fn compatible_car_types(&self) -> &[super::AarTypeId] {
        &self.compatible_car_types
    }

    /// Returns how many cars are ordered each time this config fires.
    #[must_use]
    pub const fn cars_per_session(&self) -> u32 {
        self.cars_per_session
    }

    /// Returns the session-count interval at which this config fires.
    #[must_use]
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Returns whether this config fires for the given session number.
    #[must_use]
    pub const fn fires_for_session(&self, session_number: u32) -> bool {
        session_number % self.frequency == 0
    }
}

/// A destination on the layout; may be a yard (route origin/termination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    id: IndustryId,
    name: String,
    station_id: StationId,
    is_yard: bool,
    car_demand_config: Vec<CarDemandConfig>,
}

impl Industry {
    /// Creates a new industry.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::DuplicateDemandConfig`] if
    /// `car_demand_config` contains more than one entry for the same
    /// `(goods_id, direction)` pair. Resolution of `station_id` against the
    /// roster is a repository concern, not validated here.
    pub fn new(
        name: impl Into<String>,
        station_id: StationId,
        is_yard: bool,
        car_demand_config: Vec<CarDemandConfig>,
    ) -> Result<Self, RosterDomainError> {
        let id = IndustryId::new();
        Self::assert_demand_config_unique(id, &car_demand_config)?;
        Ok(Self {
            id,
            name: name.into(),
            station_id,
            is_yard,
            car_demand_config,
        })
    }

    /// Reconstructs an industry from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::DuplicateDemandConfig`] under the same
    /// condition as [`Self::new`].
    pub fn from_parts(
        id: IndustryId,
        name: String,
        station_id: StationId,
        is_yard: bool,
        car_demand_config: Vec<CarDemandConfig>,
    ) -> Result<Self, RosterDomainError> {
        Self::assert_demand_config_unique(id, &car_demand_config)?;
        Ok(Self {
            id,
            name,
            station_id,
            is_yard,
            car_demand_config,
        })
    }

    fn assert_demand_config_unique(
        id: IndustryId,
        configs: &[CarDemandConfig],
    ) -> Result<(), RosterDomainError> {
        let mut seen: HashSet<(&str, Direction)> = HashSet::new();
        for config in configs {
            let key = (config.goods_id(), config.direction());
            if !seen.insert(key) {
                return Err(RosterDomainError::DuplicateDemandConfig {
                    industry: id,
                    goods_id: config.goods_id().to_owned(),
                    direction: config.direction(),
                });
            }
        }
        Ok(())
    }

    /// Returns the industry identifier.
    #[must_use]
    pub const fn id(&self) -> IndustryId {
        self.id
    }

    /// Returns the industry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the station this industry belongs to.
    #[must_use]
    pub const fn station_id(&self) -> StationId {
        self.station_id
    }

    /// Returns whether this industry is a yard.
    #[must_use]
    pub const fn is_yard(&self) -> bool {
        self.is_yard
    }

    /// Returns the industry's car-demand configuration.
    #[must_use]
    pub fn car_demand_config(&self) -> &[CarDemandConfig] {
        &self.car_demand_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{AarTypeId, StationId};
    use rstest::rstest;

    fn demand(goods_id: &str, direction: Direction, frequency: u32) -> CarDemandConfig {
        CarDemandConfig::new(goods_id, direction, vec![AarTypeId::new()], 1, frequency, IndustryId::new())
            .expect("valid demand config")
    }

    #[test]
    fn demand_config_rejects_empty_compatible_types() {
        let err = CarDemandConfig::new("lumber", Direction::Inbound, Vec::new(), 1, 1, IndustryId::new())
            .expect_err("empty compatible types rejected");
        assert!(matches!(err, RosterDomainError::EmptyCompatibleCarTypes(_)));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    fn demand_config_rejects_zero_quantities(#[case] cars_per_session: u32, #[case] frequency: u32) {
        let err = CarDemandConfig::new(
            "lumber",
            Direction::Inbound,
            vec![AarTypeId::new()],
            cars_per_session,
            frequency,
            IndustryId::new(),
        )
        .expect_err("zero quantity rejected");
        assert!(matches!(err, RosterDomainError::InvalidDemandQuantities(_)));
    }

    #[rstest]
    #[case(1, 1, true)]
    #[case(2, 1, false)]
    #[case(3, 1, true)]
    #[case(4, 2, true)]
    #[case(3, 2, false)]
    fn fires_for_session_checks_divisibility_by_frequency(
        #[case] session_number: u32,
        #[case] frequency: u32,
        #[case] fires: bool,
    ) {
        let config = demand("lumber", Direction::Inbound, frequency);
        assert_eq!(config.fires_for_session(session_number), fires);
    }

    #[test]
    fn industry_rejects_duplicate_goods_and_direction_pair() {
        let configs = vec![
            demand("lumber", Direction::Inbound, 1),
            demand("lumber", Direction::Inbound, 2),
        ];
        let err = Industry::new("Lumber Mill", StationId::new(), false, configs)
            .expect_err("duplicate demand config rejected");
        assert!(matches!(err, RosterDomainError::DuplicateDemandConfig { .. }));
    }

    #[test]
    fn industry_allows_same_goods_with_different_direction() {
        let configs = vec![
            demand("lumber", Direction::Inbound, 1),
            demand("lumber", Direction::Outbound, 1),
        ];
        let industry = Industry::new("Lumber Mill", StationId::new(), false, configs).expect("valid industry");
        assert_eq!(industry.car_demand_config().len(), 2);
    }
}
