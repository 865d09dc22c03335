//! Repository port for reference data and rolling stock.

use crate::roster::domain::{
    AarType, AarTypeId, Car, CarId, Industry, IndustryId, Locomotive, LocomotiveId, Route,
    RouteId, Station, StationId,
};
use crate::store::StoreError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for roster repository operations.
pub type RosterRepositoryResult<T> = Result<T, RosterRepositoryError>;

/// Errors returned by roster repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RosterRepositoryError {
    /// The underlying document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence contract for reference data and rolling stock.
///
/// Every method is a thin, validation-free CRUD operation; the services that
/// orchestrate sessions, car orders, and trains are responsible for
/// referential and business-rule checks (train/locomotive conflicts, station
/// resolution, and so on) before calling through to this port.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Returns every station.
    async fn list_stations(&self) -> RosterRepositoryResult<Vec<Station>>;
    /// Finds a station by id.
    async fn find_station(&self, id: StationId) -> RosterRepositoryResult<Option<Station>>;
    /// Creates or replaces a station.
    async fn put_station(&self, station: &Station) -> RosterRepositoryResult<()>;

    /// Returns every AAR type.
    async fn list_aar_types(&self) -> RosterRepositoryResult<Vec<AarType>>;
    /// Finds an AAR type by id.
    async fn find_aar_type(&self, id: AarTypeId) -> RosterRepositoryResult<Option<AarType>>;
    /// Creates or replaces an AAR type.
    async fn put_aar_type(&self, aar_type: &AarType) -> RosterRepositoryResult<()>;

    /// Returns every industry.
    async fn list_industries(&self) -> RosterRepositoryResult<Vec<Industry>>;
    /// Finds an industry by id.
    async fn find_industry(&self, id: IndustryId) -> RosterRepositoryResult<Option<Industry>>;
    /// Creates or replaces an industry.
    async fn put_industry(&self, industry: &Industry) -> RosterRepositoryResult<()>;

    /// Returns every route.
    async fn list_routes(&self) -> RosterRepositoryResult<Vec<Route>>;
    /// Finds a route by id.
    async fn find_route(&self, id: RouteId) -> RosterRepositoryResult<Option<Route>>;
    /// Finds a route by name.
    async fn find_route_by_name(&self, name: &str) -> RosterRepositoryResult<Option<Route>>;
    /// Creates or replaces a route.
    async fn put_route(&self, route: &Route) -> RosterRepositoryResult<()>;

    /// Returns every locomotive.
    async fn list_locomotives(&self) -> RosterRepositoryResult<Vec<Locomotive>>;
    /// Finds a locomotive by id.
    async fn find_locomotive(&self, id: LocomotiveId) -> RosterRepositoryResult<Option<Locomotive>>;
    /// Creates or replaces a locomotive.
    async fn put_locomotive(&self, locomotive: &Locomotive) -> RosterRepositoryResult<()>;

    /// Returns every car.
    async fn list_cars(&self) -> RosterRepositoryResult<Vec<Car>>;
    /// Finds a car by id.
    async fn find_car(&self, id: CarId) -> RosterRepositoryResult<Option<Car>>;
    /// Creates or replaces a car.
    async fn put_car(&self, car: &Car) -> RosterRepositoryResult<()>;
}
