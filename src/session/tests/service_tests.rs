//! Scenario tests for `SessionService`, grounded in the literal scenarios
//! and invariants for session advance/rollback.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;

use crate::car_order::adapters::memory::InMemoryCarOrderRepository;
use crate::roster::adapters::memory::InMemoryRosterRepository;
use crate::roster::domain::{AarTypeId, Car, IndustryId, LocomotiveId, RouteId};
use crate::roster::ports::RosterRepository;
use crate::session::adapters::memory::InMemorySessionRepository;
use crate::session::services::SessionService;
use crate::store::memory::InMemoryStore;
use crate::train::adapters::memory::InMemoryTrainRepository;
use crate::train::domain::{Train, TrainId, TrainStatus};
use crate::train::ports::TrainRepository;

type TestService = SessionService<
    InMemorySessionRepository,
    InMemoryRosterRepository,
    InMemoryTrainRepository,
    InMemoryCarOrderRepository,
    DefaultClock,
>;

fn service() -> (
    TestService,
    Arc<InMemoryRosterRepository>,
    Arc<InMemoryTrainRepository>,
) {
    let store = Arc::new(InMemoryStore::new());
    let sessions = Arc::new(InMemorySessionRepository::new(store.clone()));
    let roster = Arc::new(InMemoryRosterRepository::new(store.clone()));
    let trains = Arc::new(InMemoryTrainRepository::new(store.clone()));
    let car_orders = Arc::new(InMemoryCarOrderRepository::new(store));
    let service = SessionService::new(
        sessions,
        roster.clone(),
        trains.clone(),
        car_orders,
        Arc::new(DefaultClock),
    );
    (service, roster, trains)
}

#[tokio::test]
async fn first_boot_creates_session_one_and_is_idempotent() {
    let (service, _roster, _trains) = service();

    let first = service
        .get_current_session()
        .await
        .expect("creates session");
    assert_eq!(first.current_session_number(), 1);
    assert!(first.description().is_empty());
    assert!(first.previous_session_snapshot().is_none());

    let second = service
        .get_current_session()
        .await
        .expect("returns existing session");
    assert_eq!(second.id(), first.id());
    assert_eq!(second.current_session_number(), 1);
}

#[tokio::test]
async fn advance_then_rollback_restores_cars_trains_and_session_number() {
    let (service, roster, trains) = service();

    let industry_a = IndustryId::new();
    let industry_b = IndustryId::new();
    let aar_type = AarTypeId::new();

    let mut car_at_a = Car::new("ATSF", "100", aar_type, "brown", industry_a, industry_a, true);
    car_at_a.restore_location(industry_a, 2);
    roster.put_car(&car_at_a).await.expect("seed car");

    let car_x = Car::new("UP", "200", aar_type, "yellow", industry_b, industry_b, true);
    roster.put_car(&car_x).await.expect("seed car");

    let completed_train = Train::from_parts(
        TrainId::new(),
        "T1".to_owned(),
        RouteId::new(),
        1,
        TrainStatus::Completed,
        vec![LocomotiveId::new()],
        10,
        Vec::new(),
        None,
        Utc::now(),
        Utc::now(),
    );
    trains
        .insert(&completed_train)
        .await
        .expect("seed completed train");

    let in_progress_train = Train::from_parts(
        TrainId::new(),
        "T2".to_owned(),
        RouteId::new(),
        1,
        TrainStatus::InProgress,
        vec![LocomotiveId::new()],
        10,
        vec![car_x.id()],
        None,
        Utc::now(),
        Utc::now(),
    );
    trains
        .insert(&in_progress_train)
        .await
        .expect("seed in-progress train");

    let (_, advance_stats) = service.advance_session(None).await.expect("advance succeeds");
    assert_eq!(advance_stats.cars_updated, 2);
    assert_eq!(advance_stats.trains_deleted, 1);
    assert_eq!(advance_stats.cars_reverted, 1);
    assert_eq!(advance_stats.advanced_to_session, 2);

    assert!(
        trains
            .find(completed_train.id())
            .await
            .expect("lookup")
            .is_none()
    );
    let restored_a = roster
        .find_car(car_at_a.id())
        .await
        .expect("lookup")
        .expect("car exists");
    assert_eq!(restored_a.sessions_at_current_location(), 3);

    let reverted_x = roster
        .find_car(car_x.id())
        .await
        .expect("lookup")
        .expect("car exists");
    assert_eq!(reverted_x.current_industry(), industry_b);
    assert_eq!(reverted_x.sessions_at_current_location(), 0);

    let session = service.get_current_session().await.expect("session exists");
    assert_eq!(session.current_session_number(), 2);
    assert!(session.previous_session_snapshot().is_some());

    let (_, rollback_stats) = service
        .rollback_session(None)
        .await
        .expect("rollback succeeds");
    assert_eq!(rollback_stats.cars_restored, 2);
    assert_eq!(rollback_stats.trains_restored, 2);
    assert_eq!(rollback_stats.rolled_back_to_session, 1);

    let restored_a_after = roster
        .find_car(car_at_a.id())
        .await
        .expect("lookup")
        .expect("car exists");
    assert_eq!(restored_a_after.current_industry(), industry_a);
    assert_eq!(restored_a_after.sessions_at_current_location(), 2);

    assert!(
        trains
            .find(completed_train.id())
            .await
            .expect("lookup")
            .is_some()
    );
    let restored_in_progress = trains
        .find(in_progress_train.id())
        .await
        .expect("lookup")
        .expect("train restored");
    assert_eq!(restored_in_progress.status(), TrainStatus::InProgress);
    assert_eq!(restored_in_progress.assigned_car_ids().to_vec(), vec![car_x.id()]);

    let session_after_rollback = service.get_current_session().await.expect("session exists");
    assert_eq!(session_after_rollback.current_session_number(), 1);
    assert!(session_after_rollback.previous_session_snapshot().is_none());
}

#[tokio::test]
async fn rollback_rejects_at_session_one() {
    let (service, _roster, _trains) = service();
    service.get_current_session().await.expect("creates session");

    let err = service
        .rollback_session(None)
        .await
        .expect_err("cannot roll back session 1");
    assert!(matches!(
        err,
        crate::session::services::SessionServiceError::Domain(
            crate::session::domain::SessionDomainError::CannotRollback(_)
        )
    ));
}

#[tokio::test]
async fn update_session_description_rejects_empty_and_oversized() {
    let (service, _roster, _trains) = service();
    service.get_current_session().await.expect("creates session");

    assert!(service.update_session_description(String::new()).await.is_err());
    let too_long = "x".repeat(501);
    assert!(service.update_session_description(too_long).await.is_err());

    let updated = service
        .update_session_description("Session notes".to_owned())
        .await
        .expect("valid description accepted");
    assert_eq!(updated.description(), "Session notes");
}

#[tokio::test]
async fn advance_succeeds_with_the_advisory_lock_disabled() {
    let store = Arc::new(InMemoryStore::new());
    let sessions = Arc::new(InMemorySessionRepository::new(store.clone()));
    let roster = Arc::new(InMemoryRosterRepository::new(store.clone()));
    let trains = Arc::new(InMemoryTrainRepository::new(store.clone()));
    let car_orders = Arc::new(InMemoryCarOrderRepository::new(store));
    let service: TestService = SessionService::with_config(
        sessions,
        roster,
        trains,
        car_orders,
        Arc::new(DefaultClock),
        crate::SwitchcoreConfig {
            advisory_lock_enabled: false,
        },
    );

    service.get_current_session().await.expect("creates session");
    let (session, stats) = service.advance_session(None).await.expect("advance succeeds");
    assert_eq!(session.current_session_number(), 2);
    assert_eq!(stats.advanced_to_session, 2);
}
