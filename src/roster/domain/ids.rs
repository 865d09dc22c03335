//! Identifiers for reference data and rolling stock.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID, e.g. when restoring seed data that
            /// supplied its own id.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(StationId, "Unique identifier for a [`super::Station`].");
uuid_id!(AarTypeId, "Unique identifier for an [`super::AarType`].");
uuid_id!(IndustryId, "Unique identifier for an [`super::Industry`].");
uuid_id!(RouteId, "Unique identifier for a [`super::Route`].");
uuid_id!(LocomotiveId, "Unique identifier for a [`super::Locomotive`].");
uuid_id!(CarId, "Unique identifier for a [`super::Car`].");
