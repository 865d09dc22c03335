//! Route reference data: an origin yard, a station sequence, a termination yard.

use super::{IndustryId, RouteId, StationId};
use serde::{Deserialize, Serialize};

/// An origin yard, an ordered sequence of stations, and a termination yard.
/// Trains run routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    id: RouteId,
    name: String,
    origin_yard: IndustryId,
    termination_yard: IndustryId,
    station_sequence: Vec<StationId>,
}

impl Route {
    /// Creates a new route.
    ///
    /// Whether `origin_yard`/`termination_yard` are in fact yards, and
    /// whether every station id resolves, are referential checks made by the
    /// repository/service layer against the roster; this constructor only
    /// shapes the record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        origin_yard: IndustryId,
        termination_yard: IndustryId,
        station_sequence: Vec<StationId>,
    ) -> Self {
        Self {
            id: RouteId::new(),
            name: name.into(),
            origin_yard,
            termination_yard,
            station_sequence,
        }
    }

    /// Reconstructs a route from persisted fields.
    #[must_use]
    pub const fn from_parts(
        id: RouteId,
        name: String,
        origin_yard: IndustryId,
        termination_yard: IndustryId,
        station_sequence: Vec<StationId>,
    ) -> Self {
        Self {
            id,
            name,
            origin_yard,
            termination_yard,
            station_sequence,
        }
    }

    /// Returns the route identifier.
    #[must_use]
    pub const fn id(&self) -> RouteId {
        self.id
    }

    /// Returns the route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the origin yard industry id.
    #[must_use]
    pub const fn origin_yard(&self) -> IndustryId {
        self.origin_yard
    }

    /// Returns the termination yard industry id.
    #[must_use]
    pub const fn termination_yard(&self) -> IndustryId {
        self.termination_yard
    }

    /// Returns the ordered intermediate station sequence (excluding the
    /// origin/termination yards' own stations).
    #[must_use]
    pub fn station_sequence(&self) -> &[StationId] {
        &self.station_sequence
    }
}
