//! [`CarOrderRepository`] backed by the generic in-memory [`DocumentStore`].
//!
//! [`DocumentStore`]: crate::store::DocumentStore

use crate::car_order::domain::{CarOrder, CarOrderId};
use crate::car_order::ports::{CarOrderRepository, CarOrderRepositoryResult};
use crate::store::{Collection, DocumentStore};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory car-order repository over the `carOrders` collection.
#[derive(Clone)]
pub struct InMemoryCarOrderRepository {
    orders: Collection<CarOrder>,
}

impl InMemoryCarOrderRepository {
    /// Builds a car-order repository over `store`'s `carOrders` collection.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            orders: Collection::new(store, "carOrders"),
        }
    }
}

#[async_trait]
impl CarOrderRepository for InMemoryCarOrderRepository {
    async fn list(&self) -> CarOrderRepositoryResult<Vec<CarOrder>> {
        Ok(self.orders.list().await?)
    }

    async fn find(&self, id: CarOrderId) -> CarOrderRepositoryResult<Option<CarOrder>> {
        Ok(self.orders.get(&id.to_string()).await?)
    }

    async fn insert(&self, order: &CarOrder) -> CarOrderRepositoryResult<()> {
        self.orders.insert(order).await?;
        Ok(())
    }

    async fn replace(&self, order: &CarOrder) -> CarOrderRepositoryResult<()> {
        self.orders.replace(&order.id().to_string(), order).await?;
        Ok(())
    }

    async fn remove(&self, id: CarOrderId) -> CarOrderRepositoryResult<bool> {
        Ok(self.orders.remove(&id.to_string()).await?)
    }

    async fn clear(&self) -> CarOrderRepositoryResult<usize> {
        Ok(self.orders.clear().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{AarTypeId, Direction, IndustryId};
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = InMemoryCarOrderRepository::new(Arc::new(InMemoryStore::new()));
        let order = CarOrder::new(
            IndustryId::new(),
            AarTypeId::new(),
            "lumber",
            Direction::Inbound,
            vec![AarTypeId::new()],
            1,
            Utc::now(),
        )
        .expect("valid order");

        repo.insert(&order).await.expect("insert succeeds");
        let found = repo.find(order.id()).await.expect("find succeeds");
        assert_eq!(found, Some(order));
    }

    #[tokio::test]
    async fn clear_removes_every_order() {
        let repo = InMemoryCarOrderRepository::new(Arc::new(InMemoryStore::new()));
        let order = CarOrder::new(
            IndustryId::new(),
            AarTypeId::new(),
            "lumber",
            Direction::Inbound,
            vec![AarTypeId::new()],
            1,
            Utc::now(),
        )
        .expect("valid order");
        repo.insert(&order).await.expect("insert succeeds");

        let removed = repo.clear().await.expect("clear succeeds");
        assert_eq!(removed, 1);
        assert!(repo.list().await.expect("list succeeds").is_empty());
    }
}
