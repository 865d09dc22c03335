//! Port contract for car-order persistence.

mod repository;

pub use repository::{CarOrderRepository, CarOrderRepositoryError, CarOrderRepositoryResult};
