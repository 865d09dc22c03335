//! `CarOrderService`: order CRUD, enrichment, and demand-driven generation.

use crate::car_order::domain::{
    assignment_rejections, is_duplicate_order, CarAssignmentRejection, CarOrder,
    CarOrderDomainError, CarOrderId, CarOrderStatus, EnrichedCarOrder,
};
use crate::car_order::ports::{CarOrderRepository, CarOrderRepositoryError};
use crate::roster::domain::{AarTypeId, CarId, Direction, IndustryId};
use crate::roster::ports::{RosterRepository, RosterRepositoryError};
use crate::session::ports::{SessionRepository, SessionRepositoryError};
use crate::train::domain::TrainId;
use crate::train::ports::{TrainRepository, TrainRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for car-order operations.
#[derive(Debug, Error)]
pub enum CarOrderServiceError {
    /// No car order exists with the given id.
    #[error("car order {0} not found")]
    NotFound(CarOrderId),
    /// `generateOrders` was asked to default the session number, but no
    /// current session exists yet.
    #[error("no current session exists; generateOrders requires an explicit sessionNumber or a prior getCurrentSession")]
    NoSession,
    /// Deletion was refused because the order is in flight.
    #[error("car order {id} cannot be deleted in status {status:?}")]
    CannotDelete {
        /// The order that was refused deletion.
        id: CarOrderId,
        /// The order's current status.
        status: CarOrderStatus,
    },
    /// A pending order already exists for this (industry, aarType, session).
    #[error("a pending order already exists for industry {industry_id}, aarType {aar_type_id}, session {session_number}")]
    DuplicateOrder {
        /// The conflicting order's industry.
        industry_id: IndustryId,
        /// The conflicting order's AAR type.
        aar_type_id: AarTypeId,
        /// The conflicting order's session.
        session_number: u32,
    },
    /// The referenced industry does not exist.
    #[error("industry {0} not found")]
    IndustryNotFound(IndustryId),
    /// The referenced AAR type does not exist.
    #[error("AAR type {0} not found")]
    AarTypeNotFound(AarTypeId),
    /// A car could not be assigned to an order.
    #[error("car {car_id} cannot be assigned to order {order_id}: {reasons:?}")]
    AssignmentRejected {
        /// The car that was refused assignment.
        car_id: CarId,
        /// The order the car was refused assignment to.
        order_id: CarOrderId,
        /// Every reason the assignment was rejected.
        reasons: Vec<CarAssignmentRejection>,
    },
    /// Domain validation or a state-guard failed.
    #[error(transparent)]
    Domain(#[from] CarOrderDomainError),
    /// The car-order repository failed.
    #[error(transparent)]
    Repository(#[from] CarOrderRepositoryError),
    /// The roster repository failed.
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),
    /// The train repository failed.
    #[error(transparent)]
    Train(#[from] TrainRepositoryError),
    /// The session repository failed.
    #[error(transparent)]
    Session(#[from] SessionRepositoryError),
}

/// Result type for car-order service operations.
pub type CarOrderServiceResult<T> = Result<T, CarOrderServiceError>;

/// Filters accepted by [`CarOrderService::get_orders_with_filters`].
#[derive(Debug, Clone, Default)]
pub struct CarOrderFilters {
    /// Restrict to orders for this industry.
    pub industry_id: Option<IndustryId>,
    /// Restrict to orders in this status.
    pub status: Option<CarOrderStatus>,
    /// Restrict to orders generated for this session.
    pub session_number: Option<u32>,
    /// Restrict to orders requesting this AAR type.
    pub aar_type_id: Option<AarTypeId>,
    /// Case-insensitive substring match against the order's industry name
    /// and against its AAR type id.
    pub search: Option<String>,
}

/// Input to [`CarOrderService::create_order`].
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// The industry the order is for.
    pub industry_id: IndustryId,
    /// The requested AAR type.
    pub aar_type_id: AarTypeId,
    /// The goods identifier.
    pub goods_id: String,
    /// Direction of car movement.
    pub direction: Direction,
    /// The set of AAR types that may fulfil this order.
    pub compatible_car_types: Vec<AarTypeId>,
    /// The session this order is generated for.
    pub session_number: u32,
}

/// Patch applied by [`CarOrderService::update_order`]. Unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderPatch {
    /// A new status to transition to. Ignored if `assignment` is set, since
    /// assigning a car already transitions the order to `Assigned`.
    pub status: Option<CarOrderStatus>,
    /// A `(car, train)` pair to assign, validated against
    /// [`assignment_rejections`].
    pub assignment: Option<(CarId, TrainId)>,
}

/// Input to [`CarOrderService::generate_orders`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOrdersInput {
    /// The session to generate for; defaults to the current session.
    pub session_number: Option<u32>,
    /// Restrict generation to these industries; defaults to all.
    pub industry_ids: Option<Vec<IndustryId>>,
    /// Generate even if a matching pending order already exists.
    pub force: bool,
}

/// One (industry, AAR type) line in a [`GenerateOrdersResult`] summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOrdersSummaryEntry {
    /// The industry the orders were generated for.
    pub industry_id: IndustryId,
    /// The AAR type requested.
    pub aar_type_id: AarTypeId,
    /// How many orders were created for this pairing.
    pub orders_created: u32,
}

/// Result of [`CarOrderService::generate_orders`].
#[derive(Debug, Clone)]
pub struct GenerateOrdersResult {
    /// The session orders were generated for.
    pub session_number: u32,
    /// Total number of orders created.
    pub orders_generated: u32,
    /// Number of industries considered.
    pub industries_processed: u32,
    /// Per (industry, AAR type) creation counts.
    pub summary: Vec<GenerateOrdersSummaryEntry>,
    /// The orders created.
    pub orders: Vec<CarOrder>,
}

/// Car-order demand and lifecycle orchestration service.
pub struct CarOrderService<Co, Ros, Tr, Sess, C>
where
    Co: CarOrderRepository,
    Ros: RosterRepository,
    Tr: TrainRepository,
    Sess: SessionRepository,
    C: Clock + Send + Sync,
{
    orders: Arc<Co>,
    roster: Arc<Ros>,
    trains: Arc<Tr>,
    sessions: Arc<Sess>,
    clock: Arc<C>,
}

impl<Co, Ros, Tr, Sess, C> CarOrderService<Co, Ros, Tr, Sess, C>
where
    Co: CarOrderRepository,
    Ros: RosterRepository,
    Tr: TrainRepository,
    Sess: SessionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new car-order service over the given repositories and
    /// clock.
    #[must_use]
    pub fn new(orders: Arc<Co>, roster: Arc<Ros>, trains: Arc<Tr>, sessions: Arc<Sess>, clock: Arc<C>) -> Self {
        Self {
            orders,
            roster,
            trains,
            sessions,
            clock,
        }
    }

    /// Returns orders matching every supplied filter, sorted by `createdAt`
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::Repository`] or
    /// [`CarOrderServiceError::Roster`] if a store call fails.
    pub async fn get_orders_with_filters(
        &self,
        filters: &CarOrderFilters,
    ) -> CarOrderServiceResult<Vec<CarOrder>> {
        let mut orders = self.orders.list().await?;
        orders.retain(|order| {
            filters.industry_id.is_none_or(|id| order.industry_id() == id)
                && filters.status.is_none_or(|status| order.status() == status)
                && filters
                    .session_number
                    .is_none_or(|session| order.session_number() == session)
                && filters.aar_type_id.is_none_or(|id| order.aar_type_id() == id)
        });

        if let Some(search) = filters.search.as_deref().map(str::to_lowercase) {
            let mut matching = Vec::with_capacity(orders.len());
            for order in orders {
                let aar_type_matches = order.aar_type_id().to_string().to_lowercase().contains(&search);
                let industry_matches = match self.roster.find_industry(order.industry_id()).await? {
                    Some(industry) => industry.name().to_lowercase().contains(&search),
                    None => false,
                };
                if aar_type_matches || industry_matches {
                    matching.push(order);
                }
            }
            orders = matching;
        }

        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }

    /// Returns a car order joined with its industry, assigned car, and
    /// assigned train.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::NotFound`] if the order does not
    /// exist, [`CarOrderServiceError::IndustryNotFound`] if its industry has
    /// been deleted, or a repository error if a store call fails.
    pub async fn get_enriched_order(&self, id: CarOrderId) -> CarOrderServiceResult<EnrichedCarOrder> {
        let order = self
            .orders
            .find(id)
            .await?
            .ok_or(CarOrderServiceError::NotFound(id))?;
        let industry = self
            .roster
            .find_industry(order.industry_id())
            .await?
            .ok_or(CarOrderServiceError::IndustryNotFound(order.industry_id()))?;
        let assigned_car = match order.assigned_car_id() {
            Some(car_id) => self.roster.find_car(car_id).await?,
            None => None,
        };
        let assigned_train = match order.assigned_train_id() {
            Some(train_id) => self.trains.find(train_id).await?,
            None => None,
        };
        Ok(EnrichedCarOrder::new(order, industry, assigned_car, assigned_train))
    }

    /// Creates a new pending car order.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::IndustryNotFound`] or
    /// [`CarOrderServiceError::AarTypeNotFound`] if the referenced records do
    /// not exist, [`CarOrderServiceError::DuplicateOrder`] if a pending order
    /// already matches `(industryId, aarTypeId, sessionNumber)`, or a
    /// repository error if a store call fails.
    pub async fn create_order(&self, input: CreateOrderInput) -> CarOrderServiceResult<CarOrder> {
        self.roster
            .find_industry(input.industry_id)
            .await?
            .ok_or(CarOrderServiceError::IndustryNotFound(input.industry_id))?;
        self.roster
            .find_aar_type(input.aar_type_id)
            .await?
            .ok_or(CarOrderServiceError::AarTypeNotFound(input.aar_type_id))?;

        let existing = self.orders.list().await?;
        if existing
            .iter()
            .any(|order| is_duplicate_order(order, input.industry_id, input.aar_type_id, input.session_number))
        {
            return Err(CarOrderServiceError::DuplicateOrder {
                industry_id: input.industry_id,
                aar_type_id: input.aar_type_id,
                session_number: input.session_number,
            });
        }

        let order = CarOrder::new(
            input.industry_id,
            input.aar_type_id,
            input.goods_id,
            input.direction,
            input.compatible_car_types,
            input.session_number,
            self.clock.utc(),
        )?;
        self.orders.insert(&order).await?;
        Ok(order)
    }

    /// Applies a patch to an existing car order.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::NotFound`] if the order does not
    /// exist, [`CarOrderServiceError::AssignmentRejected`] if
    /// `patch.assigned_car_id` fails [`assignment_rejections`], a domain
    /// error if the status transition is invalid, or a repository error if a
    /// store call fails.
    pub async fn update_order(
        &self,
        id: CarOrderId,
        patch: UpdateOrderPatch,
    ) -> CarOrderServiceResult<CarOrder> {
        let mut order = self
            .orders
            .find(id)
            .await?
            .ok_or(CarOrderServiceError::NotFound(id))?;
        let now = self.clock.utc();

        if let Some((car_id, train_id)) = patch.assignment {
            let car = self
                .roster
                .find_car(car_id)
                .await?
                .ok_or(CarOrderServiceError::NotFound(id))?;
            let reasons = assignment_rejections(&car, &order);
            if !reasons.is_empty() {
                return Err(CarOrderServiceError::AssignmentRejected {
                    car_id,
                    order_id: id,
                    reasons,
                });
            }
            order.assign(car_id, train_id, now)?;
        } else if let Some(status) = patch.status {
            order.transition_to(status, now)?;
        }

        self.orders.replace(&order).await?;
        Ok(order)
    }

    /// Deletes a car order.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::NotFound`] if the order does not
    /// exist, [`CarOrderServiceError::CannotDelete`] if its status is
    /// `assigned` or `in-transit`, or a repository error if a store call
    /// fails.
    pub async fn delete_order(&self, id: CarOrderId) -> CarOrderServiceResult<()> {
        let order = self
            .orders
            .find(id)
            .await?
            .ok_or(CarOrderServiceError::NotFound(id))?;
        if matches!(order.status(), CarOrderStatus::Assigned | CarOrderStatus::InTransit) {
            return Err(CarOrderServiceError::CannotDelete {
                id,
                status: order.status(),
            });
        }
        self.orders.remove(id).await?;
        Ok(())
    }

    /// Generates demand-driven orders for the industries whose demand
    /// configuration fires this session.
    ///
    /// # Errors
    ///
    /// Returns [`CarOrderServiceError::NoSession`] if `input.session_number`
    /// is `None` and no current session exists, or a roster/session
    /// repository error if a store call fails. Per-order `StoreError`s while
    /// inserting generated orders are logged and skipped rather than
    /// aborting the batch.
    pub async fn generate_orders(
        &self,
        input: GenerateOrdersInput,
    ) -> CarOrderServiceResult<GenerateOrdersResult> {
        let session_number = match input.session_number {
            Some(session_number) => session_number,
            None => self
                .sessions
                .load()
                .await?
                .map(|session| session.current_session_number())
                .ok_or(CarOrderServiceError::NoSession)?,
        };

        let mut industries = self.roster.list_industries().await?;
        industries.retain(|industry| !industry.car_demand_config().is_empty());
        if let Some(ids) = &input.industry_ids {
            industries.retain(|industry| ids.contains(&industry.id()));
        }

        let existing_orders = self.orders.list().await?;
        let mut summary: Vec<GenerateOrdersSummaryEntry> = Vec::new();
        let mut created_orders = Vec::new();
        let now = self.clock.utc();

        for industry in &industries {
            for config in industry.car_demand_config() {
                if !config.fires_for_session(session_number) {
                    continue;
                }
                let Some(&aar_type_id) = config.compatible_car_types().first() else {
                    continue;
                };
                if !input.force
                    && existing_orders
                        .iter()
                        .chain(created_orders.iter())
                        .any(|order: &CarOrder| {
                            is_duplicate_order(order, industry.id(), aar_type_id, session_number)
                        })
                {
                    continue;
                }

                let mut created_for_config: u32 = 0;
                for _ in 0..config.cars_per_session() {
                    match CarOrder::new(
                        industry.id(),
                        aar_type_id,
                        config.goods_id(),
                        config.direction(),
                        config.compatible_car_types().to_vec(),
                        session_number,
                        now,
                    ) {
                        Ok(order) => match self.orders.insert(&order).await {
                            Ok(()) => {
                                created_for_config = created_for_config.saturating_add(1);
                                created_orders.push(order);
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, industry_id = %industry.id(), "generateOrders: skipping order after store failure");
                            }
                        },
                        Err(err) => {
                            tracing::warn!(error = %err, industry_id = %industry.id(), "generateOrders: skipping invalid order");
                        }
                    }
                }
                if created_for_config > 0 {
                    summary.push(GenerateOrdersSummaryEntry {
                        industry_id: industry.id(),
                        aar_type_id,
                        orders_created: created_for_config,
                    });
                }
            }
        }

        let orders_generated = u32::try_from(created_orders.len()).unwrap_or(u32::MAX);
        let industries_processed = u32::try_from(industries.len()).unwrap_or(u32::MAX);
        tracing::info!(
            session_number,
            orders_generated,
            industries_processed,
            "generateOrders completed"
        );
        Ok(GenerateOrdersResult {
            session_number,
            orders_generated,
            industries_processed,
            summary,
            orders: created_orders,
        })
    }
}
