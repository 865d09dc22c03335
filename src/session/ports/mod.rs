//! Port contract for operating-session persistence.

mod repository;

pub use repository::{SessionRepository, SessionRepositoryError, SessionRepositoryResult};
