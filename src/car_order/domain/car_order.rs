//! Car-order aggregate, status state machine, and assignment predicates.

use super::{CarOrderDomainError, CarOrderId};
use crate::roster::domain::{AarTypeId, Car, CarId, Direction, IndustryId};
use crate::train::domain::TrainId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a car order.
///
/// ```text
/// pending    -> assigned, delivered
/// assigned   -> in-transit, delivered, pending
/// in-transit -> delivered, assigned
/// delivered  -> (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarOrderStatus {
    /// Awaiting car assignment.
    Pending,
    /// A car has been assigned but has not yet departed.
    Assigned,
    /// The assigned car is moving toward the order's industry.
    InTransit,
    /// The order has been fulfilled. Terminal.
    Delivered,
}

impl CarOrderStatus {
    /// Returns whether transitioning from `self` to `target` is permitted by
    /// the state machine.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Assigned | Self::Delivered)
                | (
                    Self::Assigned,
                    Self::InTransit | Self::Delivered | Self::Pending
                )
                | (Self::InTransit, Self::Delivered | Self::Assigned)
        )
    }
}

/// A demand record: industry `X` needs a car of `aar_type` in
/// `session_number`, either to receive or to ship goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarOrder {
    id: CarOrderId,
    industry_id: IndustryId,
    aar_type_id: AarTypeId,
    goods_id: String,
    direction: Direction,
    compatible_car_types: Vec<AarTypeId>,
    session_number: u32,
    status: CarOrderStatus,
    assigned_car_id: Option<CarId>,
    assigned_train_id: Option<TrainId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CarOrder {
    /// Creates a new pending car order.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderDomainError::EmptyCompatibleCarTypes`] if
    /// `compatible_car_types` is empty.
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    pub fn new(
        industry_id: IndustryId,
        aar_type_id: AarTypeId,
        goods_id: impl Into<String>,
        direction: Direction,
        compatible_car_types: Vec<AarTypeId>,
        session_number: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CarOrderDomainError> {
        if compatible_car_types.is_empty() {
            return Err(CarOrderDomainError::EmptyCompatibleCarTypes);
        }
        Ok(Self {
            id: CarOrderId::new(),
            industry_id,
            aar_type_id,
            goods_id: goods_id.into(),
            direction,
            compatible_car_types,
            session_number,
            status: CarOrderStatus::Pending,
            assigned_car_id: None,
            assigned_train_id: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Reconstructs a car order from persisted fields, bypassing
    /// construction-time validation (used by snapshot restoration, where the
    /// record was valid when it was captured).
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    #[must_use]
    pub const fn from_parts(
        id: CarOrderId,
        industry_id: IndustryId,
        aar_type_id: AarTypeId,
        goods_id: String,
        direction: Direction,
        compatible_car_types: Vec<AarTypeId>,
        session_number: u32,
        status: CarOrderStatus,
        assigned_car_id: Option<CarId>,
        assigned_train_id: Option<TrainId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            industry_id,
            aar_type_id,
            goods_id,
            direction,
            compatible_car_types,
            session_number,
            status,
            assigned_car_id,
            assigned_train_id,
            created_at,
            updated_at,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> CarOrderId {
        self.id
    }

    /// Returns the industry this order is for.
    #[must_use]
    pub const fn industry_id(&self) -> IndustryId {
        self.industry_id
    }

    /// Returns the AAR type requested.
    #[must_use]
    pub const fn aar_type_id(&self) -> AarTypeId {
        self.aar_type_id
    }

    /// Returns the goods identifier.
    #[must_use]
    pub fn goods_id(&self) -> &str {
        &self.goods_id
    }

    /// Returns the direction of car movement.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the set of AAR types that can fulfil this order.
    #[must_use]
    pub fn compatible_car_types(&self) -> &[AarTypeId] {
        &self.compatible_car_types
    }

    /// Returns the session this order was generated for.
    #[must_use]
    pub const fn session_number(&self) -> u32 {
        self.session_number
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> CarOrderStatus {
        self.status
    }

    /// Returns the assigned car, if any.
    #[must_use]
    pub const fn assigned_car_id(&self) -> Option<CarId> {
        self.assigned_car_id
    }

    /// Returns the assigned train, if any.
    #[must_use]
    pub const fn assigned_train_id(&self) -> Option<TrainId> {
        self.assigned_train_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Transitions this order to `target`, validating the move against the
    /// state machine.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderDomainError::InvalidTransition`] if the move is not
    /// permitted.
    pub fn transition_to(
        &mut self,
        target: CarOrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CarOrderDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(CarOrderDomainError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Assigns `car_id` and `train_id` to this order and transitions it to
    /// [`CarOrderStatus::Assigned`]. Used by switch-list generation, which
    /// persists the assignment and the status change together in one write.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderDomainError::InvalidTransition`] if the order is not
    /// currently [`CarOrderStatus::Pending`].
    pub fn assign(
        &mut self,
        car_id: CarId,
        train_id: TrainId,
        now: DateTime<Utc>,
    ) -> Result<(), CarOrderDomainError> {
        self.transition_to(CarOrderStatus::Assigned, now)?;
        self.assigned_car_id = Some(car_id);
        self.assigned_train_id = Some(train_id);
        Ok(())
    }

    /// Clears the assignment and reverts this order to
    /// [`CarOrderStatus::Pending`]. Used by train cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderDomainError::InvalidTransition`] if the current
    /// status cannot transition to [`CarOrderStatus::Pending`].
    pub fn revert_to_pending(&mut self, now: DateTime<Utc>) -> Result<(), CarOrderDomainError> {
        self.transition_to(CarOrderStatus::Pending, now)?;
        self.assigned_car_id = None;
        self.assigned_train_id = None;
        Ok(())
    }
}

/// Returns whether `candidate` is a duplicate of `existing`: both orders
/// share `(industry_id, aar_type_id, session_number)` and `existing` is
/// still pending.
#[must_use]
pub fn is_duplicate_order(
    existing: &CarOrder,
    industry_id: IndustryId,
    aar_type_id: AarTypeId,
    session_number: u32,
) -> bool {
    existing.status() == CarOrderStatus::Pending
        && existing.industry_id() == industry_id
        && existing.aar_type_id() == aar_type_id
        && existing.session_number() == session_number
}

/// One reason a car cannot be assigned to an order. Multiple reasons may
/// apply to a single pairing; callers accumulate every one that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarAssignmentRejection {
    /// The car is flagged out of service.
    CarOutOfService,
    /// The car's AAR type does not match the order's.
    CarTypeMismatch,
    /// The order is not currently pending.
    OrderNotPending,
}

/// Checks whether `car` may be assigned to `order`, accumulating every
/// rejection reason that applies rather than short-circuiting on the first.
#[must_use]
pub fn assignment_rejections(car: &Car, order: &CarOrder) -> Vec<CarAssignmentRejection> {
    let mut rejections = Vec::new();
    if !car.is_in_service() {
        rejections.push(CarAssignmentRejection::CarOutOfService);
    }
    if car.car_type() != order.aar_type_id() {
        rejections.push(CarAssignmentRejection::CarTypeMismatch);
    }
    if order.status() != CarOrderStatus::Pending {
        rejections.push(CarAssignmentRejection::OrderNotPending);
    }
    rejections
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_order(status: CarOrderStatus) -> CarOrder {
        let now = Utc::now();
        let mut order = CarOrder::new(
            IndustryId::new(),
            AarTypeId::new(),
            "lumber",
            Direction::Inbound,
            vec![AarTypeId::new()],
            1,
            now,
        )
        .expect("valid order");
        order.status = status;
        order
    }

    #[rstest]
    #[case(CarOrderStatus::Pending, CarOrderStatus::Assigned, true)]
    #[case(CarOrderStatus::Pending, CarOrderStatus::Delivered, true)]
    #[case(CarOrderStatus::Pending, CarOrderStatus::InTransit, false)]
    #[case(CarOrderStatus::Assigned, CarOrderStatus::InTransit, true)]
    #[case(CarOrderStatus::Assigned, CarOrderStatus::Pending, true)]
    #[case(CarOrderStatus::InTransit, CarOrderStatus::Delivered, true)]
    #[case(CarOrderStatus::InTransit, CarOrderStatus::Pending, false)]
    #[case(CarOrderStatus::Delivered, CarOrderStatus::Pending, false)]
    #[case(CarOrderStatus::Delivered, CarOrderStatus::Assigned, false)]
    fn transition_table_matches_state_machine(
        #[case] from: CarOrderStatus,
        #[case] to: CarOrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn duplicate_requires_matching_keys_and_pending_status() {
        let order = sample_order(CarOrderStatus::Pending);
        assert!(is_duplicate_order(
            &order,
            order.industry_id(),
            order.aar_type_id(),
            order.session_number(),
        ));
        assert!(!is_duplicate_order(
            &order,
            IndustryId::new(),
            order.aar_type_id(),
            order.session_number(),
        ));

        let assigned = sample_order(CarOrderStatus::Assigned);
        assert!(!is_duplicate_order(
            &assigned,
            assigned.industry_id(),
            assigned.aar_type_id(),
            assigned.session_number(),
        ));
    }

    #[test]
    fn assignment_rejections_accumulate_every_reason() {
        let order = sample_order(CarOrderStatus::Delivered);
        let car = Car::new(
            "ATSF",
            "1",
            AarTypeId::new(),
            "red",
            IndustryId::new(),
            IndustryId::new(),
            false,
        );
        let rejections = assignment_rejections(&car, &order);
        assert_eq!(rejections.len(), 3);
    }

    #[test]
    fn transition_to_rejects_invalid_move() {
        let mut order = sample_order(CarOrderStatus::Delivered);
        let err = order
            .transition_to(CarOrderStatus::Pending, Utc::now())
            .expect_err("delivered is terminal");
        assert!(matches!(err, CarOrderDomainError::InvalidTransition { .. }));
    }
}
