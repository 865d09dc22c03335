//! Read-side join of a car order with its referenced records.
//!
//! An enrich-style join is a read-side concern: this type is assembled by
//! the service layer from already-loaded records and is never written back
//! or persisted.

use super::CarOrder;
use crate::roster::domain::{Car, Industry};
use crate::train::domain::Train;
use serde::{Deserialize, Serialize};

/// A car order joined with its industry, assigned car, and assigned train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCarOrder {
    order: CarOrder,
    industry: Industry,
    assigned_car: Option<Car>,
    assigned_train: Option<Train>,
}

impl EnrichedCarOrder {
    /// Assembles an enriched view from already-resolved parts.
    #[must_use]
    pub const fn new(
        order: CarOrder,
        industry: Industry,
        assigned_car: Option<Car>,
        assigned_train: Option<Train>,
    ) -> Self {
        Self {
            order,
            industry,
            assigned_car,
            assigned_train,
        }
    }

    /// Returns the underlying order.
    #[must_use]
    pub const fn order(&self) -> &CarOrder {
        &self.order
    }

    /// Returns the order's industry.
    #[must_use]
    pub const fn industry(&self) -> &Industry {
        &self.industry
    }

    /// Returns the assigned car, if any.
    #[must_use]
    pub const fn assigned_car(&self) -> Option<&Car> {
        self.assigned_car.as_ref()
    }

    /// Returns the assigned train, if any.
    #[must_use]
    pub const fn assigned_train(&self) -> Option<&Train> {
        self.assigned_train.as_ref()
    }
}
