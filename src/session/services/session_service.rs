//! `SessionService`: current-session lookup and atomic advance/rollback of
//! world state.

use crate::car_order::ports::{CarOrderRepository, CarOrderRepositoryError};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::session::domain::{validate_snapshot, OperatingSession, SessionDomainError, Snapshot, SnapshotCar};
use crate::session::ports::{SessionRepository, SessionRepositoryError};
use crate::train::domain::TrainStatus;
use crate::train::ports::{TrainRepository, TrainRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Service-level errors for session lifecycle operations.
#[derive(Debug, Error)]
pub enum SessionServiceError {
    /// Domain validation or a state-guard failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// The session repository failed.
    #[error(transparent)]
    Session(#[from] SessionRepositoryError),
    /// The roster repository failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),
    /// The train repository failed.
    #[error(transparent)]
    Train(#[from] TrainRepositoryError),
    /// The car-order repository failed.
    #[error(transparent)]
    CarOrder(#[from] CarOrderRepositoryError),
}

/// Result type for session service operations.
pub type SessionServiceResult<T> = Result<T, SessionServiceError>;

/// Statistics returned by a successful `advanceSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceStats {
    /// Number of cars whose dwell counter was incremented.
    pub cars_updated: u32,
    /// Number of `Completed` trains deleted.
    pub trains_deleted: u32,
    /// Number of cars reverted to their pre-advance location because their
    /// train was `In Progress`.
    pub cars_reverted: u32,
    /// The session number advanced to.
    pub advanced_to_session: u32,
}

/// Statistics returned by a successful `rollbackSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackStats {
    /// Number of cars whose location/dwell counter was restored.
    pub cars_restored: u32,
    /// Number of trains re-created from the snapshot.
    pub trains_restored: u32,
    /// Number of car orders re-created from the snapshot.
    pub orders_restored: u32,
    /// The session number rolled back to.
    pub rolled_back_to_session: u32,
}

/// Session lifecycle orchestration service.
///
/// Holds a single advisory lock around `advance`/`rollback`, a narrow
/// strengthening that is permitted but not required for these compound
/// operations.
pub struct SessionService<Sess, Ros, Tr, Co, C>
where
    Sess: SessionRepository,
    Ros: RosterRepository,
    Tr: TrainRepository,
    Co: CarOrderRepository,
    C: Clock + Send + Sync,
{
    sessions: Arc<Sess>,
    roster: Arc<Ros>,
    trains: Arc<Tr>,
    car_orders: Arc<Co>,
    clock: Arc<C>,
    advisory_lock: Mutex<()>,
    advisory_lock_enabled: bool,
}

impl<Sess, Ros, Tr, Co, C> SessionService<Sess, Ros, Tr, Co, C>
where
    Sess: SessionRepository,
    Ros: RosterRepository,
    Tr: TrainRepository,
    Co: CarOrderRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new session service over the given repositories and clock,
    /// with the advisory lock enabled (the default [`SwitchcoreConfig`]).
    #[must_use]
    pub fn new(sessions: Arc<Sess>, roster: Arc<Ros>, trains: Arc<Tr>, car_orders: Arc<Co>, clock: Arc<C>) -> Self {
        Self::with_config(sessions, roster, trains, car_orders, clock, crate::SwitchcoreConfig::default())
    }

    /// Creates a new session service with an explicit [`SwitchcoreConfig`],
    /// controlling whether the advisory lock around `advance`/`rollback` is
    /// held.
    #[must_use]
    pub fn with_config(
        sessions: Arc<Sess>,
        roster: Arc<Ros>,
        trains: Arc<Tr>,
        car_orders: Arc<Co>,
        clock: Arc<C>,
        config: crate::SwitchcoreConfig,
    ) -> Self {
        Self {
            sessions,
            roster,
            trains,
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

    /// Returns the current session, lazily creating it with
    /// `currentSessionNumber = 1` if it does not yet exist.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Session`] if the repository fails.
    pub async fn get_current_session(&self) -> SessionServiceResult<OperatingSession> {
        if let Some(session) = self.sessions.load().await? {
            return Ok(session);
        }
        let session = OperatingSession::first(self.clock.utc());
        self.sessions.create(&session).await?;
        Ok(session)
    }

    /// Replaces the session description.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidDescription`] if `description`
    /// is empty or exceeds 500 characters.
    pub async fn update_session_description(
        &self,
        description: String,
    ) -> SessionServiceResult<OperatingSession> {
        let mut session = self.get_current_session().await?;
        session.update_description(description, self.clock.utc())?;
        self.sessions.save(&session).await?;
        Ok(session)
    }

    /// Advances to the next session.
    ///
    /// Captures a snapshot of the pre-advance world (every car's location,
    /// every train, every car order), then: increments every car's dwell
    /// counter, deletes every `Completed` train, reverts every `In
    /// Progress` train's assigned cars to their pre-advance location, and
    /// finally writes the session singleton with the embedded snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::SnapshotInvalid`] if the captured
    /// snapshot fails structural validation (checked before any mutating
    /// write), or a repository error if a store call fails.
    pub async fn advance_session(
        &self,
        description: Option<String>,
    ) -> SessionServiceResult<(OperatingSession, AdvanceStats)> {
        let _guard = self.lock_if_enabled().await;
        let mut session = self.get_current_session().await?;

        let cars = self.roster.list_cars().await?;
        let snapshot_cars: Vec<SnapshotCar> = cars
            .iter()
            .map(|car| SnapshotCar::new(car.id(), car.current_industry(), car.sessions_at_current_location()))
            .collect();
        let trains = self.trains.list().await?;
        let orders = self.car_orders.list().await?;

        let snapshot = match Snapshot::new(session.current_session_number(), snapshot_cars, trains.clone(), orders) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "advanceSession aborted: snapshot failed validation");
                return Err(err.into());
            }
        };

        let cars_updated = u32::try_from(cars.len()).unwrap_or(u32::MAX);
        for mut car in cars {
            car.increment_sessions_at_current_location();
            self.roster.put_car(&car).await?;
        }

        let mut trains_deleted: u32 = 0;
        for train in &trains {
            if train.status() == TrainStatus::Completed {
                self.trains.remove(train.id()).await?;
                trains_deleted = trains_deleted.saturating_add(1);
            }
        }

        let mut cars_reverted: u32 = 0;
        for train in &trains {
            if train.status() != TrainStatus::InProgress {
                continue;
            }
            for &car_id in train.assigned_car_ids() {
                let Some(pre_advance) = snapshot.cars().iter().find(|snapshot_car| snapshot_car.id() == car_id)
                else {
                    continue;
                };
                let Some(mut car) = self.roster.find_car(car_id).await? else {
                    continue;
                };
                car.restore_location(pre_advance.current_industry(), 0);
                self.roster.put_car(&car).await?;
                cars_reverted = cars_reverted.saturating_add(1);
            }
        }

        session.advance(snapshot, self.clock.utc(), description);
        self.sessions.save(&session).await?;

        let stats = AdvanceStats {
            cars_updated,
            trains_deleted,
            cars_reverted,
            advanced_to_session: session.current_session_number(),
        };
        tracing::info!(
            cars_updated = stats.cars_updated,
            trains_deleted = stats.trains_deleted,
            cars_reverted = stats.cars_reverted,
            advanced_to_session = stats.advanced_to_session,
            "advanceSession completed"
        );
        Ok((session, stats))
    }

    /// Rolls back to the previous session, restoring every car's location
    /// and dwell counter, and re-creating every train and car order from
    /// the embedded snapshot verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::CannotRollback`] if the current
    /// session is 1 or no snapshot is present, or a repository error if a
    /// store call fails.
    pub async fn rollback_session(
        &self,
        description: Option<String>,
    ) -> SessionServiceResult<(OperatingSession, RollbackStats)> {
        let _guard = self.lock_if_enabled().await;
        let mut session = self.get_current_session().await?;

        if !session.can_roll_back() {
            let reason = if session.current_session_number() <= 1 {
                "already at session 1"
            } else {
                "no snapshot present"
            };
            tracing::warn!(reason, "rollbackSession rejected");
            return Err(SessionDomainError::CannotRollback(reason).into());
        }

        let Some(snapshot) = session.previous_session_snapshot().cloned() else {
            tracing::warn!(reason = "no snapshot present", "rollbackSession rejected");
            return Err(SessionDomainError::CannotRollback("no snapshot present").into());
        };
        validate_snapshot(&snapshot)?;

        let mut cars_restored: u32 = 0;
        for snapshot_car in snapshot.cars() {
            let Some(mut car) = self.roster.find_car(snapshot_car.id()).await? else {
                continue;
            };
            car.restore_location(snapshot_car.current_industry(), snapshot_car.sessions_at_current_location());
            self.roster.put_car(&car).await?;
            cars_restored = cars_restored.saturating_add(1);
        }

        self.trains.clear().await?;
        for train in snapshot.trains() {
            self.trains.insert(train).await?;
        }
        let trains_restored = u32::try_from(snapshot.trains().len()).unwrap_or(u32::MAX);

        self.car_orders.clear().await?;
        for order in snapshot.car_orders() {
            self.car_orders.insert(order).await?;
        }
        let orders_restored = u32::try_from(snapshot.car_orders().len()).unwrap_or(u32::MAX);

        let restored_snapshot = session.rollback(self.clock.utc(), description)?;
        debug_assert_eq!(restored_snapshot.session_number(), snapshot.session_number());
        self.sessions.save(&session).await?;

        let stats = RollbackStats {
            cars_restored,
            trains_restored,
            orders_restored,
            rolled_back_to_session: session.current_session_number(),
        };
        tracing::info!(
            cars_restored = stats.cars_restored,
            trains_restored = stats.trains_restored,
            orders_restored = stats.orders_restored,
            rolled_back_to_session = stats.rolled_back_to_session,
            "rollbackSession completed"
        );
        Ok((session, stats))
    }
}
