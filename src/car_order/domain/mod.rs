//! Car-order demand domain: the `CarOrder` aggregate, its status state
//! machine, and the pure predicates used for duplicate suppression and
//! car-assignment validation.

mod car_order;
mod enriched;
mod error;
mod ids;

pub use car_order::{
    assignment_rejections, is_duplicate_order, CarAssignmentRejection, CarOrder, CarOrderStatus,
};
pub use enriched::EnrichedCarOrder;
pub use error::CarOrderDomainError;
pub use ids::CarOrderId;
