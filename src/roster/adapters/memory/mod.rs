//! [`RosterRepository`] backed by the generic in-memory [`DocumentStore`].
//!
//! [`DocumentStore`]: crate::store::DocumentStore

use crate::roster::domain::{
    AarType, AarTypeId, Car, CarId, Industry, IndustryId, Locomotive, LocomotiveId, Route,
    RouteId, Station, StationId,
};
use crate::roster::ports::{RosterRepository, RosterRepositoryResult};
use crate::store::{query_eq, Collection, DocumentStore};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory roster repository, composed of one typed [`Collection`] per
/// entity over a shared [`DocumentStore`].
#[derive(Clone)]
pub struct InMemoryRosterRepository {
    stations: Collection<Station>,
    aar_types: Collection<AarType>,
    industries: Collection<Industry>,
    routes: Collection<Route>,
    locomotives: Collection<Locomotive>,
    cars: Collection<Car>,
}

impl InMemoryRosterRepository {
    /// Builds a roster repository over `store`'s `stations`, `aarTypes`,
    /// `industries`, `routes`, `locomotives`, and `cars` collections.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            stations: Collection::new(store.clone(), "stations"),
            aar_types: Collection::new(store.clone(), "aarTypes"),
            industries: Collection::new(store.clone(), "industries"),
            routes: Collection::new(store.clone(), "routes"),
            locomotives: Collection::new(store.clone(), "locomotives"),
            cars: Collection::new(store, "cars"),
        }
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn list_stations(&self) -> RosterRepositoryResult<Vec<Station>> {
        Ok(self.stations.list().await?)
    }

    async fn find_station(&self, id: StationId) -> RosterRepositoryResult<Option<Station>> {
        Ok(self.stations.get(&id.to_string()).await?)
    }

    async fn put_station(&self, station: &Station) -> RosterRepositoryResult<()> {
        let id = station.id().to_string();
        if self.stations.replace(&id, station).await?.is_none() {
            self.stations.insert(station).await?;
        }
        Ok(())
    }

    async fn list_aar_types(&self) -> RosterRepositoryResult<Vec<AarType>> {
        Ok(self.aar_types.list().await?)
    }

    async fn find_aar_type(&self, id: AarTypeId) -> RosterRepositoryResult<Option<AarType>> {
        Ok(self.aar_types.get(&id.to_string()).await?)
    }

    async fn put_aar_type(&self, aar_type: &AarType) -> RosterRepositoryResult<()> {
        let id = aar_type.id().to_string();
        if self.aar_types.replace(&id, aar_type).await?.is_none() {
            self.aar_types.insert(aar_type).await?;
        }
        Ok(())
    }

    async fn list_industries(&self) -> RosterRepositoryResult<Vec<Industry>> {
        Ok(self.industries.list().await?)
    }

    async fn find_industry(&self, id: IndustryId) -> RosterRepositoryResult<Option<Industry>> {
        Ok(self.industries.get(&id.to_string()).await?)
    }

    async fn put_industry(&self, industry: &Industry) -> RosterRepositoryResult<()> {
        let id = industry.id().to_string();
        if self.industries.replace(&id, industry).await?.is_none() {
            self.industries.insert(industry).await?;
        }
        Ok(())
    }

    async fn list_routes(&self) -> RosterRepositoryResult<Vec<Route>> {
        Ok(self.routes.list().await?)
    }

    async fn find_route(&self, id: RouteId) -> RosterRepositoryResult<Option<Route>> {
        Ok(self.routes.get(&id.to_string()).await?)
    }

    async fn find_route_by_name(&self, name: &str) -> RosterRepositoryResult<Option<Route>> {
        let matches = self.routes.query(&query_eq("name", name)).await?;
        Ok(matches.into_iter().next())
    }

    async fn put_route(&self, route: &Route) -> RosterRepositoryResult<()> {
        let id = route.id().to_string();
        if self.routes.replace(&id, route).await?.is_none() {
            self.routes.insert(route).await?;
        }
        Ok(())
    }

    async fn list_locomotives(&self) -> RosterRepositoryResult<Vec<Locomotive>> {
        Ok(self.locomotives.list().await?)
    }

    async fn find_locomotive(&self, id: LocomotiveId) -> RosterRepositoryResult<Option<Locomotive>> {
        Ok(self.locomotives.get(&id.to_string()).await?)
    }

    async fn put_locomotive(&self, locomotive: &Locomotive) -> RosterRepositoryResult<()> {
        let id = locomotive.id().to_string();
        if self.locomotives.replace(&id, locomotive).await?.is_none() {
            self.locomotives.insert(locomotive).await?;
        }
        Ok(())
    }

    async fn list_cars(&self) -> RosterRepositoryResult<Vec<Car>> {
        Ok(self.cars.list().await?)
    }

    async fn find_car(&self, id: CarId) -> RosterRepositoryResult<Option<Car>> {
        Ok(self.cars.get(&id.to_string()).await?)
    }

    async fn put_car(&self, car: &Car) -> RosterRepositoryResult<()> {
        let id = car.id().to_string();
        if self.cars.replace(&id, car).await?.is_none() {
            self.cars.insert(car).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::Station;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn put_station_inserts_then_replaces() {
        let repo = InMemoryRosterRepository::new(Arc::new(InMemoryStore::new()));
        let station = Station::new("Ashcroft Yard");

        repo.put_station(&station).await.expect("insert succeeds");
        assert_eq!(repo.list_stations().await.expect("list succeeds").len(), 1);

        repo.put_station(&station).await.expect("replace succeeds");
        let stored = repo
            .find_station(station.id())
            .await
            .expect("find succeeds")
            .expect("station exists");
        assert_eq!(stored, station);
    }

    #[tokio::test]
    async fn find_route_by_name_matches_exact_name() {
        let repo = InMemoryRosterRepository::new(Arc::new(InMemoryStore::new()));
        let route = Route::new(
            "Mainline Local",
            IndustryId::new(),
            IndustryId::new(),
            vec![StationId::new()],
        );
        repo.put_route(&route).await.expect("insert succeeds");

        let found = repo
            .find_route_by_name("Mainline Local")
            .await
            .expect("query succeeds");
        assert_eq!(found, Some(route));

        assert_eq!(
            repo.find_route_by_name("No Such Route")
                .await
                .expect("query succeeds"),
            None
        );
    }
}
