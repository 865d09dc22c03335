//! Domain model for reference data (stations, AAR types, industries,
//! routes) and rolling stock (locomotives, cars).
//!
//! This module intentionally carries no business workflow beyond
//! construction and shape validation: reference data and rolling stock are
//! only read and mutated as a side effect of session, car-order, and train
//! operations.

mod aar_type;
mod car;
mod error;
mod ids;
mod industry;
mod locomotive;
mod route;
mod station;

pub use aar_type::AarType;
pub use car::Car;
pub use error::RosterDomainError;
pub use ids::{AarTypeId, CarId, IndustryId, LocomotiveId, RouteId, StationId};
pub use industry::{CarDemandConfig, Direction, Industry};
pub use locomotive::{Locomotive, Manufacturer};
pub use route::Route;
pub use station::Station;
