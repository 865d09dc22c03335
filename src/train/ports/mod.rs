//! Port contract for train persistence.

mod repository;

pub use repository::{TrainRepository, TrainRepositoryError, TrainRepositoryResult};
