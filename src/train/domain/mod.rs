//! Train domain: the `Train` aggregate, its status state machine, switch-list
//! shapes, and the pure locomotive-conflict/name-uniqueness predicates.

mod error;
mod ids;
mod switch_list;
#[expect(clippy::module_inception, reason = "train.rs names the Train aggregate, matching the roster/car_order sibling layout")]
mod train;

pub use error::TrainDomainError;
pub use ids::TrainId;
pub use switch_list::{CarMovement, StationPlan, SwitchList};
pub use train::{locomotive_conflict, name_conflict, Train, TrainStatus};
