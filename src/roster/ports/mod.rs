//! Port contract for reference-data and rolling-stock persistence.

mod repository;

pub use repository::{RosterRepository, RosterRepositoryError, RosterRepositoryResult};
