//! Train aggregate and status state machine.

use super::{SwitchList, TrainDomainError, TrainId};
use crate::roster::domain::{CarId, LocomotiveId, RouteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MIN_CAPACITY: u32 = 1;
const MAX_CAPACITY: u32 = 100;

/// Train lifecycle status.
///
/// ```text
/// Planned    -> In Progress (generate), Cancelled
/// In Progress -> Completed, Cancelled
/// Completed   -> (terminal)
/// Cancelled   -> (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainStatus {
    /// Created, mutable, not yet switch-listed.
    Planned,
    /// Switch-listed and executing.
    InProgress,
    /// Finished its run. Terminal.
    Completed,
    /// Abandoned before or during its run. Terminal.
    Cancelled,
}

impl TrainStatus {
    /// Returns whether transitioning from `self` to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planned, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether the train is non-terminal (`Planned` or
    /// `InProgress`), i.e. still eligible to hold a locomotive assignment.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Planned | Self::InProgress)
    }
}

/// A planned or in-progress movement of rolling stock along a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    id: TrainId,
    name: String,
    route_id: RouteId,
    session_number: u32,
    status: TrainStatus,
    locomotive_ids: Vec<LocomotiveId>,
    max_capacity: u32,
    assigned_car_ids: Vec<CarId>,
    switch_list: Option<SwitchList>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Train {
    /// Creates a new train in status [`TrainStatus::Planned`] with no
    /// assigned cars and no switch list.
    ///
    /// # Errors
    ///
    /// Returns [`TrainDomainError::NoLocomotives`] if `locomotive_ids` is
    /// empty, or [`TrainDomainError::InvalidMaxCapacity`] if `max_capacity`
    /// is outside `1..=100`.
    pub fn new(
        name: impl Into<String>,
        route_id: RouteId,
        session_number: u32,
        locomotive_ids: Vec<LocomotiveId>,
        max_capacity: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TrainDomainError> {
        if locomotive_ids.is_empty() {
            return Err(TrainDomainError::NoLocomotives);
        }
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&max_capacity) {
            return Err(TrainDomainError::InvalidMaxCapacity(max_capacity));
        }
        Ok(Self {
            id: TrainId::new(),
            name: name.into(),
            route_id,
            session_number,
            status: TrainStatus::Planned,
            locomotive_ids,
            max_capacity,
            assigned_car_ids: Vec::new(),
            switch_list: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Reconstructs a train from persisted fields, bypassing
    /// construction-time validation (snapshot restoration replays a record
    /// that was valid when captured).
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    #[must_use]
    pub const fn from_parts(
        id: TrainId,
        name: String,
        route_id: RouteId,
        session_number: u32,
        status: TrainStatus,
        locomotive_ids: Vec<LocomotiveId>,
        max_capacity: u32,
        assigned_car_ids: Vec<CarId>,
        switch_list: Option<SwitchList>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            route_id,
            session_number,
            status,
            locomotive_ids,
            max_capacity,
            assigned_car_ids,
            switch_list,
            created_at,
            updated_at,
        }
    }

    /// Returns the train identifier.
    #[must_use]
    pub const fn id(&self) -> TrainId {
        self.id
    }

    /// Returns the train name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the route this train runs.
    #[must_use]
    pub const fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Returns the session this train belongs to.
    #[must_use]
    pub const fn session_number(&self) -> u32 {
        self.session_number
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TrainStatus {
        self.status
    }

    /// Returns the assigned locomotive identifiers.
    #[must_use]
    pub fn locomotive_ids(&self) -> &[LocomotiveId] {
        &self.locomotive_ids
    }

    /// Returns the train's capacity in cars.
    #[must_use]
    pub const fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Returns the cars currently assigned to this train's switch list.
    #[must_use]
    pub fn assigned_car_ids(&self) -> &[CarId] {
        &self.assigned_car_ids
    }

    /// Returns the generated switch list, if any.
    #[must_use]
    pub const fn switch_list(&self) -> Option<&SwitchList> {
        self.switch_list.as_ref()
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

    /// Returns whether this train may be edited or deleted (status
    /// [`TrainStatus::Planned`]).
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.status, TrainStatus::Planned)
    }

    /// Replaces this train's route, locomotives, capacity, and name while it
    /// is still [`TrainStatus::Planned`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainDomainError::ImmutableInState`] if the train is not
    /// `Planned`, [`TrainDomainError::NoLocomotives`] if `locomotive_ids` is
    /// empty, or [`TrainDomainError::InvalidMaxCapacity`] if `max_capacity`
    /// is outside `1..=100`.
    #[expect(clippy::too_many_arguments, reason = "mirrors the flat persisted record shape")]
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        route_id: RouteId,
        locomotive_ids: Vec<LocomotiveId>,
        max_capacity: u32,
        now: DateTime<Utc>,
    ) -> Result<(), TrainDomainError> {
        if !self.is_editable() {
            return Err(TrainDomainError::ImmutableInState {
                id: self.id,
                status: self.status,
            });
        }
        if locomotive_ids.is_empty() {
            return Err(TrainDomainError::NoLocomotives);
        }
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&max_capacity) {
            return Err(TrainDomainError::InvalidMaxCapacity(max_capacity));
        }
        self.name = name.into();
        self.route_id = route_id;
        self.locomotive_ids = locomotive_ids;
        self.max_capacity = max_capacity;
        self.updated_at = now;
        Ok(())
    }

    /// Transitions this train to `target`, validating the move against the
    /// state machine.
    ///
    /// # Errors
    ///
    /// Returns [`TrainDomainError::InvalidTransition`] if the move is not
    /// permitted.
    pub fn transition_to(
        &mut self,
        target: TrainStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TrainDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TrainDomainError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Records a generated switch list, assigns the given cars, and
    /// transitions to [`TrainStatus::InProgress`] in one write, matching the
    /// switch-list planning algorithm's closing step.
    ///
    /// # Errors
    ///
    /// Returns [`TrainDomainError::InvalidTransition`] if the train is not
    /// currently [`TrainStatus::Planned`].
    pub fn apply_switch_list(
        &mut self,
        switch_list: SwitchList,
        assigned_car_ids: Vec<CarId>,
        now: DateTime<Utc>,
    ) -> Result<(), TrainDomainError> {
        self.transition_to(TrainStatus::InProgress, now)?;
        self.switch_list = Some(switch_list);
        self.assigned_car_ids = assigned_car_ids;
        Ok(())
    }
}

/// Returns whether `locomotive_id` is already assigned to some other
/// non-terminal train.
///
/// `exclude` should be the id of the train being created or edited, so a
/// train is never considered in conflict with itself.
#[must_use]
pub fn locomotive_conflict<'a>(
    trains: impl IntoIterator<Item = &'a Train>,
    locomotive_id: LocomotiveId,
    exclude: Option<TrainId>,
) -> bool {
    trains.into_iter().any(|train| {
        Some(train.id()) != exclude
            && train.status().is_active()
            && train.locomotive_ids().contains(&locomotive_id)
    })
}

/// Returns whether `name` is already used by another train in
/// `session_number`.
///
/// `exclude` should be the id of the train being created or edited, so a
/// train is never considered a duplicate of itself.
#[must_use]
pub fn name_conflict<'a>(
    trains: impl IntoIterator<Item = &'a Train>,
    name: &str,
    session_number: u32,
    exclude: Option<TrainId>,
) -> bool {
    trains.into_iter().any(|train| {
        Some(train.id()) != exclude
            && train.session_number() == session_number
            && train.name() == name
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_train(status: TrainStatus) -> Train {
        let mut train = Train::new(
            "Local Turn",
            RouteId::new(),
            1,
            vec![LocomotiveId::new()],
            10,
            Utc::now(),
        )
        .expect("valid train");
        train.status = status;
        train
    }

    #[rstest]
    #[case(TrainStatus::Planned, TrainStatus::InProgress, true)]
    #[case(TrainStatus::Planned, TrainStatus::Cancelled, true)]
    #[case(TrainStatus::Planned, TrainStatus::Completed, false)]
    #[case(TrainStatus::InProgress, TrainStatus::Completed, true)]
    #[case(TrainStatus::InProgress, TrainStatus::Cancelled, true)]
    #[case(TrainStatus::InProgress, TrainStatus::Planned, false)]
    #[case(TrainStatus::Completed, TrainStatus::Cancelled, false)]
    #[case(TrainStatus::Cancelled, TrainStatus::Planned, false)]
    fn transition_table_matches_state_machine(
        #[case] from: TrainStatus,
        #[case] to: TrainStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn new_rejects_empty_locomotives() {
        let err = Train::new("T1", RouteId::new(), 1, vec![], 10, Utc::now())
            .expect_err("no locomotives");
        assert_eq!(err, TrainDomainError::NoLocomotives);
    }

    #[test]
    fn new_rejects_capacity_out_of_range() {
        let err = Train::new("T1", RouteId::new(), 1, vec![LocomotiveId::new()], 0, Utc::now())
            .expect_err("zero capacity");
        assert_eq!(err, TrainDomainError::InvalidMaxCapacity(0));

        let err = Train::new(
            "T1",
            RouteId::new(),
            1,
            vec![LocomotiveId::new()],
            101,
            Utc::now(),
        )
        .expect_err("over-capacity");
        assert_eq!(err, TrainDomainError::InvalidMaxCapacity(101));
    }

    #[test]
    fn edit_rejects_non_planned_train() {
        let mut train = sample_train(TrainStatus::InProgress);
        let err = train
            .edit("New Name", RouteId::new(), vec![LocomotiveId::new()], 5, Utc::now())
            .expect_err("not planned");
        assert!(matches!(err, TrainDomainError::ImmutableInState { .. }));
    }

    #[test]
    fn locomotive_conflict_ignores_terminal_trains_and_self() {
        let loco = LocomotiveId::new();
        let mut planned = sample_train(TrainStatus::Planned);
        planned.locomotive_ids = vec![loco];
        let mut cancelled = sample_train(TrainStatus::Cancelled);
        cancelled.locomotive_ids = vec![loco];

        assert!(locomotive_conflict([&planned], loco, None));
        assert!(!locomotive_conflict([&planned], loco, Some(planned.id())));
        assert!(!locomotive_conflict([&cancelled], loco, None));
    }

    #[test]
    fn name_conflict_is_scoped_to_session_and_excludes_self() {
        let train = sample_train(TrainStatus::Planned);
        assert!(name_conflict([&train], train.name(), train.session_number(), None));
        assert!(!name_conflict(
            [&train],
            train.name(),
            train.session_number(),
            Some(train.id())
        ));
        assert!(!name_conflict([&train], train.name(), train.session_number() + 1, None));
    }
}
