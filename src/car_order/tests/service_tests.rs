//! Scenario tests for `CarOrderService`: duplicate suppression, assignment
//! rejection accumulation, and demand-driven generation.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::car_order::adapters::memory::InMemoryCarOrderRepository;
use crate::car_order::domain::{CarAssignmentRejection, CarOrderStatus};
use crate::car_order::ports::CarOrderRepository;
use crate::car_order::services::{
    CarOrderService, CarOrderServiceError, CreateOrderInput, GenerateOrdersInput, UpdateOrderPatch,
};
use crate::roster::adapters::memory::InMemoryRosterRepository;
use crate::roster::domain::{AarType, Car, CarDemandConfig, Direction, Industry, Station};
use crate::roster::ports::RosterRepository;
use crate::session::adapters::memory::InMemorySessionRepository;
use crate::store::memory::InMemoryStore;
use crate::train::adapters::memory::InMemoryTrainRepository;
use crate::train::domain::TrainId;

type TestService = CarOrderService<
    InMemoryCarOrderRepository,
    InMemoryRosterRepository,
    InMemoryTrainRepository,
    InMemorySessionRepository,
    DefaultClock,
>;

fn service() -> (TestService, Arc<InMemoryRosterRepository>) {
    let store = Arc::new(InMemoryStore::new());
    let orders = Arc::new(InMemoryCarOrderRepository::new(store.clone()));
    let roster = Arc::new(InMemoryRosterRepository::new(store.clone()));
    let trains = Arc::new(InMemoryTrainRepository::new(store.clone()));
    let sessions = Arc::new(InMemorySessionRepository::new(store));
    let service = CarOrderService::new(orders, roster.clone(), trains, sessions, Arc::new(DefaultClock));
    (service, roster)
}

#[tokio::test]
async fn create_order_rejects_duplicate_pending_order() {
    let (service, roster) = service();
    let station = Station::new("Altoona");
    roster.put_station(&station).await.expect("seed station");
    let industry = Industry::new("Altoona Yard", station.id(), true, Vec::new()).expect("valid industry");
    roster.put_industry(&industry).await.expect("seed industry");
    let aar_type = AarType::new("XM", "Boxcar").expect("valid aar type");
    roster.put_aar_type(&aar_type).await.expect("seed aar type");

    let input = CreateOrderInput {
        industry_id: industry.id(),
        aar_type_id: aar_type.id(),
        goods_id: "lumber".to_owned(),
        direction: Direction::Inbound,
        compatible_car_types: vec![aar_type.id()],
        session_number: 1,
    };
    service.create_order(input.clone()).await.expect("first order succeeds");

    let err = service
        .create_order(input)
        .await
        .expect_err("duplicate pending order rejected");
    assert!(matches!(err, CarOrderServiceError::DuplicateOrder { .. }));
}

#[tokio::test]
async fn update_order_rejects_assignment_with_accumulated_reasons() {
    let (service, roster) = service();
    let station = Station::new("Altoona");
    roster.put_station(&station).await.expect("seed station");
    let industry = Industry::new("Altoona Yard", station.id(), true, Vec::new()).expect("valid industry");
    roster.put_industry(&industry).await.expect("seed industry");
    let aar_type = AarType::new("XM", "Boxcar").expect("valid aar type");
    let other_type = AarType::new("FM", "Flatcar").expect("valid aar type");
    roster.put_aar_type(&aar_type).await.expect("seed aar type");
    roster.put_aar_type(&other_type).await.expect("seed aar type");

    let order = service
        .create_order(CreateOrderInput {
            industry_id: industry.id(),
            aar_type_id: aar_type.id(),
            goods_id: "lumber".to_owned(),
            direction: Direction::Inbound,
            compatible_car_types: vec![aar_type.id()],
            session_number: 1,
        })
        .await
        .expect("order created");

    let out_of_service_car = Car::new(
        "ATSF",
        "1",
        other_type.id(),
        "red",
        industry.id(),
        industry.id(),
        false,
    );
    roster.put_car(&out_of_service_car).await.expect("seed car");

    let err = service
        .update_order(
            order.id(),
            UpdateOrderPatch {
                status: None,
                assignment: Some((out_of_service_car.id(), TrainId::new())),
            },
        )
        .await
        .expect_err("assignment rejected");
    let CarOrderServiceError::AssignmentRejected { reasons, .. } = err else {
        panic!("expected AssignmentRejected, got {err:?}");
    };
    assert!(reasons.contains(&CarAssignmentRejection::CarOutOfService));
    assert!(reasons.contains(&CarAssignmentRejection::CarTypeMismatch));
}

#[tokio::test]
async fn update_order_assigns_a_compatible_in_service_car() {
    let (service, roster) = service();
    let station = Station::new("Altoona");
    roster.put_station(&station).await.expect("seed station");
    let industry = Industry::new("Altoona Yard", station.id(), true, Vec::new()).expect("valid industry");
    roster.put_industry(&industry).await.expect("seed industry");
    let aar_type = AarType::new("XM", "Boxcar").expect("valid aar type");
    roster.put_aar_type(&aar_type).await.expect("seed aar type");

    let order = service
        .create_order(CreateOrderInput {
            industry_id: industry.id(),
            aar_type_id: aar_type.id(),
            goods_id: "lumber".to_owned(),
            direction: Direction::Inbound,
            compatible_car_types: vec![aar_type.id()],
            session_number: 1,
        })
        .await
        .expect("order created");

    let car = Car::new("ATSF", "1", aar_type.id(), "red", industry.id(), industry.id(), true);
    roster.put_car(&car).await.expect("seed car");
    let train_id = TrainId::new();

    let assigned = service
        .update_order(
            order.id(),
            UpdateOrderPatch {
                status: None,
                assignment: Some((car.id(), train_id)),
            },
        )
        .await
        .expect("assignment succeeds");
    assert_eq!(assigned.status(), CarOrderStatus::Assigned);
    assert_eq!(assigned.assigned_car_id(), Some(car.id()));
    assert_eq!(assigned.assigned_train_id(), Some(train_id));
}

#[tokio::test]
async fn delete_order_rejects_assigned_orders() {
    let (service, roster) = service();
    let station = Station::new("Altoona");
    roster.put_station(&station).await.expect("seed station");
    let industry = Industry::new("Altoona Yard", station.id(), true, Vec::new()).expect("valid industry");
    roster.put_industry(&industry).await.expect("seed industry");
    let aar_type = AarType::new("XM", "Boxcar").expect("valid aar type");
    roster.put_aar_type(&aar_type).await.expect("seed aar type");
    let car = Car::new("ATSF", "1", aar_type.id(), "red", industry.id(), industry.id(), true);
    roster.put_car(&car).await.expect("seed car");

    let order = service
        .create_order(CreateOrderInput {
            industry_id: industry.id(),
            aar_type_id: aar_type.id(),
            goods_id: "lumber".to_owned(),
            direction: Direction::Inbound,
            compatible_car_types: vec![aar_type.id()],
            session_number: 1,
        })
        .await
        .expect("order created");
    service
        .update_order(
            order.id(),
            UpdateOrderPatch {
                status: None,
                assignment: Some((car.id(), TrainId::new())),
            },
        )
        .await
        .expect("assignment succeeds");

    let err = service
        .delete_order(order.id())
        .await
        .expect_err("cannot delete an assigned order");
    assert!(matches!(err, CarOrderServiceError::CannotDelete { .. }));
}

#[tokio::test]
async fn generate_orders_fires_only_matching_frequencies_and_skips_existing_pending() {
    let (service, roster) = service();
    let station = Station::new("Altoona");
    roster.put_station(&station).await.expect("seed station");
    let aar_type = AarType::new("XM", "Boxcar").expect("valid aar type");
    roster.put_aar_type(&aar_type).await.expect("seed aar type");

    let fires_every_session = CarDemandConfig::new(
        "lumber",
        Direction::Inbound,
        vec![aar_type.id()],
        2,
        1,
        crate::roster::domain::IndustryId::new(),
    )
    .expect("valid config");
    let industry = Industry::new("Lumber Mill", station.id(), false, vec![fires_every_session])
        .expect("valid industry");
    roster.put_industry(&industry).await.expect("seed industry");

    let result = service
        .generate_orders(GenerateOrdersInput {
            session_number: Some(1),
            industry_ids: None,
            force: false,
        })
        .await
        .expect("generation succeeds");
    assert_eq!(result.orders_generated, 2);
    assert_eq!(result.summary.len(), 1);
    assert_eq!(result.summary[0].orders_created, 2);

    let again = service
        .generate_orders(GenerateOrdersInput {
            session_number: Some(1),
            industry_ids: None,
            force: false,
        })
        .await
        .expect("second call succeeds");
    assert_eq!(again.orders_generated, 0, "a pending order already satisfies demand");
}
