//! Station reference data.

use super::StationId;
use serde::{Deserialize, Serialize};

/// A stop along a route, grouping zero or more industries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Creates a new station with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StationId::new(),
            name: name.into(),
        }
    }

    /// Reconstructs a station from persisted fields.
    #[must_use]
    pub const fn from_parts(id: StationId, name: String) -> Self {
        Self { id, name }
    }

    /// Returns the station identifier.
    #[must_use]
    pub const fn id(&self) -> StationId {
        self.id
    }

    /// Returns the station name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
