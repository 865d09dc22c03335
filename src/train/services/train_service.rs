//! `TrainService`: train lifecycle, and the switch-list planning algorithm.

use crate::car_order::domain::{CarOrder, CarOrderDomainError, CarOrderId, CarOrderStatus};
use crate::car_order::ports::{CarOrderRepository, CarOrderRepositoryError};
use crate::roster::domain::{CarId, IndustryId, LocomotiveId, RouteId};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::train::domain::{
    locomotive_conflict, name_conflict, CarMovement, StationPlan, SwitchList, Train, TrainDomainError,
    TrainId, TrainStatus,
};
use crate::train::ports::{TrainRepository, TrainRepositoryError};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Service-level errors for train operations.
#[derive(Debug, Error)]
pub enum TrainServiceError {
    /// No train exists with the given id.
    #[error("train {0} not found")]
    NotFound(TrainId),
    /// The referenced route does not exist.
    #[error("route {0} not found")]
    RouteNotFound(RouteId),
    /// A referenced locomotive does not exist.
    #[error("locomotive {0} not found")]
    LocomotiveNotFound(LocomotiveId),
    /// A referenced locomotive is flagged out of service.
    #[error("locomotive {0} is out of service")]
    LocomotiveOutOfService(LocomotiveId),
    /// A requested locomotive is already assigned to another active train.
    #[error("locomotive {0} is already assigned to another active train")]
    LocomotiveConflict(LocomotiveId),
    /// A train name collided with another train in the same session.
    #[error("train name '{0}' is already used in this session")]
    NameConflict(String),
    /// A state guard for a compound operation was violated.
    #[error("precondition failed for train {id}: {reasons:?}")]
    PreconditionFailed {
        /// The train the precondition check was run against.
        id: TrainId,
        /// Every reason the precondition failed.
        reasons: Vec<String>,
    },
    /// None of a route's stations could be resolved.
    #[error("no stations could be resolved for train {0}'s route")]
    NoStationsResolved(TrainId),
    /// Domain validation or a state-guard failed.
    #[error(transparent)]
    Domain(#[from] TrainDomainError),
    /// A car-order state-guard failed while updating an assignment.
    #[error(transparent)]
    CarOrderDomain(#[from] CarOrderDomainError),
    /// The train repository failed.
    #[error(transparent)]
    Repository(#[from] TrainRepositoryError),
    /// The roster repository failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),
    /// The car-order repository failed.
    #[error(transparent)]
    CarOrder(#[from] CarOrderRepositoryError),
}

/// Result type for train service operations.
pub type TrainServiceResult<T> = Result<T, TrainServiceError>;

/// Input to [`TrainService::create_train`].
#[derive(Debug, Clone)]
pub struct CreateTrainInput {
    /// The train's name, unique within `session_number`.
    pub name: String,
    /// The route this train will run.
    pub route_id: RouteId,
    /// The session this train is created for.
    pub session_number: u32,
    /// The locomotives hauling this train.
    pub locomotive_ids: Vec<LocomotiveId>,
    /// The train's capacity in cars, `1..=100`.
    pub max_capacity: u32,
}

/// Input to [`TrainService::update_train`]. Every field is revalidated as if
/// the train were newly created.
#[derive(Debug, Clone)]
pub struct UpdateTrainInput {
    /// The train's new name.
    pub name: String,
    /// The train's new route.
    pub route_id: RouteId,
    /// The train's new locomotives.
    pub locomotive_ids: Vec<LocomotiveId>,
    /// The train's new capacity.
    pub max_capacity: u32,
}

/// Train lifecycle and switch-list planning service.
pub struct TrainService<Tr, Ros, Co, C>
where
    Tr: TrainRepository,
    Ros: RosterRepository,
    Co: CarOrderRepository,
    C: Clock + Send + Sync,
{
    trains: Arc<Tr>,
    roster: Arc<Ros>,
    car_orders: Arc<Co>,
    clock: Arc<C>,
    advisory_lock: Mutex<()>,
    advisory_lock_enabled: bool,
}

impl<Tr, Ros, Co, C> TrainService<Tr, Ros, Co, C>
where
    Tr: TrainRepository,
    Ros: RosterRepository,
    Co: CarOrderRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new train service over the given repositories and clock,
    /// with the advisory lock enabled (the default [`crate::SwitchcoreConfig`]).
    #[must_use]
    pub fn new(trains: Arc<Tr>, roster: Arc<Ros>, car_orders: Arc<Co>, clock: Arc<C>) -> Self {
        Self::with_config(trains, roster, car_orders, clock, crate::SwitchcoreConfig::default())
    }

    /// Creates a new train service with an explicit [`crate::SwitchcoreConfig`],
    /// controlling whether the advisory lock around `generateSwitchList`/
    /// `completeTrain`/`cancelTrain` is held.
    #[must_use]
    pub fn with_config(
        trains: Arc<Tr>,
        roster: Arc<Ros>,
        car_orders: Arc<Co>,
        clock: Arc<C>,
        config: crate::SwitchcoreConfig,
    ) -> Self {
        Self {
            trains,
            roster,
            car_orders,
            clock,
            advisory_lock: Mutex::new(()),
            advisory_lock_enabled: config.advisory_lock_enabled,
        }
    }

    async fn lock_if_enabled(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        if self.advisory_lock_enabled {
            Some(self.advisory_lock.lock().await)
        } else {
            None
        }
    }

    async fn assert_locomotives_available(
        &self,
        locomotive_ids: &[LocomotiveId],
    ) -> TrainServiceResult<()> {
        for &locomotive_id in locomotive_ids {
            let locomotive = self
                .roster
                .find_locomotive(locomotive_id)
                .await?
                .ok_or(TrainServiceError::LocomotiveNotFound(locomotive_id))?;
            if !locomotive.is_in_service() {
                return Err(TrainServiceError::LocomotiveOutOfService(locomotive_id));
            }
        }
        Ok(())
    }

    async fn assert_no_conflicts(
        &self,
        locomotive_ids: &[LocomotiveId],
        name: &str,
        session_number: u32,
        exclude: Option<TrainId>,
    ) -> TrainServiceResult<()> {
        let trains = self.trains.list().await?;
        for &locomotive_id in locomotive_ids {
            if locomotive_conflict(&trains, locomotive_id, exclude) {
                return Err(TrainServiceError::LocomotiveConflict(locomotive_id));
            }
        }
        if name_conflict(&trains, name, session_number, exclude) {
            return Err(TrainServiceError::NameConflict(name.to_owned()));
        }
        Ok(())
    }

    /// Creates a new train in status [`TrainStatus::Planned`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::RouteNotFound`],
    /// [`TrainServiceError::LocomotiveNotFound`],
    /// [`TrainServiceError::LocomotiveOutOfService`],
    /// [`TrainServiceError::LocomotiveConflict`], or
    /// [`TrainServiceError::NameConflict`] if a precondition fails, or a
    /// repository error if a store call fails.
    pub async fn create_train(&self, input: CreateTrainInput) -> TrainServiceResult<Train> {
        self.roster
            .find_route(input.route_id)
            .await?
            .ok_or(TrainServiceError::RouteNotFound(input.route_id))?;
        self.assert_locomotives_available(&input.locomotive_ids).await?;
        self.assert_no_conflicts(&input.locomotive_ids, &input.name, input.session_number, None)
            .await?;

        let train = Train::new(
            input.name,
            input.route_id,
            input.session_number,
            input.locomotive_ids,
            input.max_capacity,
            self.clock.utc(),
        )?;
        self.trains.insert(&train).await?;
        Ok(train)
    }

    /// Edits an existing train, allowed only while it is
    /// [`TrainStatus::Planned`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::NotFound`] if the train does not exist,
    /// the same preconditions as [`Self::create_train`], or
    /// [`TrainDomainError::ImmutableInState`] if the train is not `Planned`.
    pub async fn update_train(&self, id: TrainId, input: UpdateTrainInput) -> TrainServiceResult<Train> {
        let mut train = self.trains.find(id).await?.ok_or(TrainServiceError::NotFound(id))?;
        self.roster
            .find_route(input.route_id)
            .await?
            .ok_or(TrainServiceError::RouteNotFound(input.route_id))?;
        self.assert_locomotives_available(&input.locomotive_ids).await?;
        self.assert_no_conflicts(
            &input.locomotive_ids,
            &input.name,
            train.session_number(),
            Some(id),
        )
        .await?;

        train.edit(input.name, input.route_id, input.locomotive_ids, input.max_capacity, self.clock.utc())?;
        self.trains.replace(&train).await?;
        Ok(train)
    }

    /// Deletes a train, allowed only while it is [`TrainStatus::Planned`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::NotFound`] if the train does not exist,
    /// or [`TrainDomainError::ImmutableInState`] if it is not `Planned`.
    pub async fn delete_train(&self, id: TrainId) -> TrainServiceResult<()> {
        let train = self.trains.find(id).await?.ok_or(TrainServiceError::NotFound(id))?;
        if !train.is_editable() {
            return Err(TrainDomainError::ImmutableInState {
                id: train.id(),
                status: train.status(),
            }
            .into());
        }
        self.trains.remove(id).await?;
        Ok(())
    }

    /// Generates a switch list for a `Planned` train and transitions it to
    /// [`TrainStatus::InProgress`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::PreconditionFailed`] if the train is not
    /// `Planned`, its route does not resolve, or any locomotive does not
    /// resolve or is out of service. Returns
    /// [`TrainServiceError::NoStationsResolved`] if none of the route's
    /// stations resolve. Returns a repository error if a store call fails.
    #[expect(clippy::too_many_lines, reason = "kept as one linear pickup/setout/home-yard-routing pass; splitting it would scatter shared mutable planning state across helpers")]
    pub async fn generate_switch_list(&self, id: TrainId) -> TrainServiceResult<Train> {
        let _guard = self.lock_if_enabled().await;
        let mut train = self.trains.find(id).await?.ok_or(TrainServiceError::NotFound(id))?;

        let mut precondition_errors = Vec::new();
        if train.status() != TrainStatus::Planned {
            precondition_errors.push(format!("train is not Planned (status: {:?})", train.status()));
        }
        let route = self.roster.find_route(train.route_id()).await?;
        if route.is_none() {
            precondition_errors.push("route does not exist".to_owned());
        }
        for &locomotive_id in train.locomotive_ids() {
            match self.roster.find_locomotive(locomotive_id).await? {
                None => precondition_errors.push(format!("locomotive {locomotive_id} not found")),
                Some(locomotive) if !locomotive.is_in_service() => {
                    precondition_errors.push(format!("locomotive {locomotive_id} is out of service"));
                }
                Some(_) => {}
            }
        }
        if !precondition_errors.is_empty() {
            tracing::warn!(train_id = %id, reasons = ?precondition_errors, "generateSwitchList preconditions failed");
            return Err(TrainServiceError::PreconditionFailed {
                id,
                reasons: precondition_errors,
            });
        }
        let Some(route) = route else {
            return Err(TrainServiceError::PreconditionFailed {
                id,
                reasons: vec!["route does not exist".to_owned()],
            });
        };

        let origin = self.roster.find_industry(route.origin_yard()).await?;
        let termination = self.roster.find_industry(route.termination_yard()).await?;
        let mut station_ids = Vec::with_capacity(route.station_sequence().len() + 2);
        if let Some(origin) = &origin {
            station_ids.push(origin.station_id());
        }
        station_ids.extend(route.station_sequence().iter().copied());
        if let Some(termination) = &termination {
            station_ids.push(termination.station_id());
        }

        let mut stations_resolved = Vec::new();
        for station_id in station_ids {
            if let Some(station) = self.roster.find_station(station_id).await? {
                stations_resolved.push(station);
            }
        }
        if stations_resolved.is_empty() {
            return Err(TrainServiceError::NoStationsResolved(id));
        }

        let industries_all = self.roster.list_industries().await?;
        let cars_all = self.roster.list_cars().await?;
        let pending_orders: Vec<CarOrder> = self
            .car_orders
            .list()
            .await?
            .into_iter()
            .filter(|order| {
                order.session_number() == train.session_number() && order.status() == CarOrderStatus::Pending
            })
            .collect();

        let now = self.clock.utc();
        let mut claimed: HashSet<CarId> = HashSet::new();
        let mut onboard: Vec<CarId> = Vec::new();
        let mut in_transit: u32 = 0;
        let mut total_pickups: u32 = 0;
        let mut total_setouts: u32 = 0;
        let mut order_updates: Vec<(CarOrderId, CarId)> = Vec::new();
        let mut station_plans: Vec<StationPlan> = Vec::new();

        for station in &stations_resolved {
            let industries_here: HashSet<IndustryId> = industries_all
                .iter()
                .filter(|industry| industry.station_id() == station.id())
                .map(|industry| industry.id())
                .collect();

            let orders_here: Vec<&CarOrder> = pending_orders
                .iter()
                .filter(|order| industries_here.contains(&order.industry_id()))
                .collect();
            let cars_here: Vec<&crate::roster::domain::Car> = cars_all
                .iter()
                .filter(|car| car.is_in_service() && industries_here.contains(&car.current_industry()))
                .collect();

            let mut pickups: Vec<CarMovement> = Vec::new();
            let mut setouts: Vec<CarMovement> = Vec::new();

            for order in &orders_here {
                if in_transit >= train.max_capacity() {
                    break;
                }
                let Some(car) = cars_here
                    .iter()
                    .find(|car| car.car_type() == order.aar_type_id() && !claimed.contains(&car.id()))
                else {
                    continue;
                };
                pickups.push(CarMovement::new(
                    car.id(),
                    car.reporting_marks(),
                    car.reporting_number(),
                    car.car_type(),
                    order.industry_id(),
                    Some(order.id()),
                ));
                claimed.insert(car.id());
                onboard.push(car.id());
                order_updates.push((order.id(), car.id()));
                in_transit = in_transit.saturating_add(1);
                total_pickups = total_pickups.saturating_add(1);
            }

            let mut remaining_pickups = Vec::with_capacity(pickups.len());
            for movement in pickups {
                if industries_here.contains(&movement.destination_industry_id()) {
                    onboard.retain(|&car_id| car_id != movement.car_id());
                    in_transit = in_transit.saturating_sub(1);
                    total_pickups = total_pickups.saturating_sub(1);
                    total_setouts = total_setouts.saturating_add(1);
                    setouts.push(movement);
                } else {
                    remaining_pickups.push(movement);
                }
            }
            pickups = remaining_pickups;

            for car in &cars_here {
                if in_transit >= train.max_capacity() {
                    break;
                }
                if claimed.contains(&car.id()) {
                    continue;
                }
                if car.home_yard() != car.current_industry() {
                    pickups.push(CarMovement::new(
                        car.id(),
                        car.reporting_marks(),
                        car.reporting_number(),
                        car.car_type(),
                        car.home_yard(),
                        None,
                    ));
                    claimed.insert(car.id());
                    onboard.push(car.id());
                    in_transit = in_transit.saturating_add(1);
                    total_pickups = total_pickups.saturating_add(1);
                }
            }

            station_plans.push(StationPlan::new(
                station.id(),
                station.name().to_owned(),
                pickups,
                setouts,
            ));
        }

        let final_car_count = u32::try_from(onboard.len()).unwrap_or(u32::MAX);
        let switch_list = SwitchList::new(station_plans, total_pickups, total_setouts, final_car_count, now);

        for (order_id, car_id) in &order_updates {
            if let Some(mut order) = self.car_orders.find(*order_id).await? {
                order.assign(*car_id, id, now)?;
                self.car_orders.replace(&order).await?;
            }
        }

        train.apply_switch_list(switch_list, onboard, now)?;
        self.trains.replace(&train).await?;

        tracing::info!(
            train_id = %id,
            total_pickups,
            total_setouts,
            final_car_count,
            "generateSwitchList completed"
        );
        Ok(train)
    }

    /// Completes an `In Progress` train: moves every setout car to its
    /// destination, delivers every order it carried, and marks it
    /// [`TrainStatus::Completed`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::NotFound`] if the train does not exist,
    /// [`TrainServiceError::PreconditionFailed`] if it is not `In Progress`
    /// or has no switch list, or a repository error if a store call fails.
    pub async fn complete_train(&self, id: TrainId) -> TrainServiceResult<Train> {
        let _guard = self.lock_if_enabled().await;
        let mut train = self.trains.find(id).await?.ok_or(TrainServiceError::NotFound(id))?;
        if train.status() != TrainStatus::InProgress {
            tracing::warn!(train_id = %id, "completeTrain rejected: train is not In Progress");
            return Err(TrainServiceError::PreconditionFailed {
                id,
                reasons: vec![format!("train is not In Progress (status: {:?})", train.status())],
            });
        }
        let Some(switch_list) = train.switch_list().cloned() else {
            return Err(TrainServiceError::PreconditionFailed {
                id,
                reasons: vec!["train has no switch list".to_owned()],
            });
        };

        for movement in switch_list.stations().iter().flat_map(StationPlan::setouts) {
            if let Some(mut car) = self.roster.find_car(movement.car_id()).await? {
                car.move_to(movement.destination_industry_id(), self.clock.as_ref());
                self.roster.put_car(&car).await?;
            }
        }

        let mut orders_transitioned: u32 = 0;
        for mut order in self.car_orders.list().await? {
            if order.assigned_train_id() != Some(id) {
                continue;
            }
            if matches!(order.status(), CarOrderStatus::Assigned | CarOrderStatus::InTransit) {
                order.transition_to(CarOrderStatus::Delivered, self.clock.utc())?;
                self.car_orders.replace(&order).await?;
                orders_transitioned = orders_transitioned.saturating_add(1);
            }
        }

        train.transition_to(TrainStatus::Completed, self.clock.utc())?;
        self.trains.replace(&train).await?;

        tracing::info!(train_id = %id, orders_transitioned, "completeTrain completed");
        Ok(train)
    }

    /// Cancels a train. Reverts every order it carried back to `pending` if
    /// it was `In Progress`, and marks it [`TrainStatus::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`TrainServiceError::NotFound`] if the train does not exist,
    /// [`TrainServiceError::PreconditionFailed`] if it is already
    /// `Completed`, or a repository error if a store call fails.
    pub async fn cancel_train(&self, id: TrainId) -> TrainServiceResult<Train> {
        let _guard = self.lock_if_enabled().await;
        let mut train = self.trains.find(id).await?.ok_or(TrainServiceError::NotFound(id))?;
        if train.status() == TrainStatus::Completed {
            tracing::warn!(train_id = %id, "cancelTrain rejected: train is Completed");
            return Err(TrainServiceError::PreconditionFailed {
                id,
                reasons: vec!["train is already Completed".to_owned()],
            });
        }

        let mut orders_reverted: u32 = 0;
        if train.status() == TrainStatus::InProgress {
            for mut order in self.car_orders.list().await? {
                if order.assigned_train_id() != Some(id) {
                    continue;
                }
                if matches!(order.status(), CarOrderStatus::Assigned | CarOrderStatus::InTransit) {
                    order.revert_to_pending(self.clock.utc())?;
                    self.car_orders.replace(&order).await?;
                    orders_reverted = orders_reverted.saturating_add(1);
                }
            }
        }

        train.transition_to(TrainStatus::Cancelled, self.clock.utc())?;
        self.trains.replace(&train).await?;

        tracing::info!(train_id = %id, orders_reverted, "cancelTrain completed");
        Ok(train)
    }
}
