//! [`TrainRepository`] backed by the generic in-memory [`DocumentStore`].
//!
//! [`DocumentStore`]: crate::store::DocumentStore

use crate::store::{Collection, DocumentStore};
use crate::train::domain::{Train, TrainId};
use crate::train::ports::{TrainRepository, TrainRepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory train repository over the `trains` collection.
#[derive(Clone)]
pub struct InMemoryTrainRepository {
    trains: Collection<Train>,
}

impl InMemoryTrainRepository {
    /// Builds a train repository over `store`'s `trains` collection.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            trains: Collection::new(store, "trains"),
        }
    }
}

#[async_trait]
impl TrainRepository for InMemoryTrainRepository {
    async fn list(&self) -> TrainRepositoryResult<Vec<Train>> {
        Ok(self.trains.list().await?)
    }

    async fn find(&self, id: TrainId) -> TrainRepositoryResult<Option<Train>> {
        Ok(self.trains.get(&id.to_string()).await?)
    }

    async fn insert(&self, train: &Train) -> TrainRepositoryResult<()> {
        self.trains.insert(train).await?;
        Ok(())
    }

    async fn replace(&self, train: &Train) -> TrainRepositoryResult<()> {
        self.trains.replace(&train.id().to_string(), train).await?;
        Ok(())
    }

    async fn remove(&self, id: TrainId) -> TrainRepositoryResult<bool> {
        Ok(self.trains.remove(&id.to_string()).await?)
    }

    async fn clear(&self) -> TrainRepositoryResult<usize> {
        Ok(self.trains.clear().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::domain::{LocomotiveId, RouteId};
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = InMemoryTrainRepository::new(Arc::new(InMemoryStore::new()));
        let train = Train::new("Local Turn", RouteId::new(), 1, vec![LocomotiveId::new()], 10, Utc::now())
            .expect("valid train");

        repo.insert(&train).await.expect("insert succeeds");
        let found = repo.find(train.id()).await.expect("find succeeds");
        assert_eq!(found, Some(train));
    }
}
