//! [`SessionRepository`] backed by the generic in-memory [`DocumentStore`].
//!
//! [`DocumentStore`]: crate::store::DocumentStore

use crate::session::domain::OperatingSession;
use crate::session::ports::{SessionRepository, SessionRepositoryResult};
use crate::store::{Collection, DocumentStore};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory session repository over the `operatingSessions` collection.
///
/// The collection holds at most one record; [`Self::load`] reads via
/// `findAll` and takes the first, treating the singleton as a degenerate
/// table rather than special-casing it.
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Collection<OperatingSession>,
}

impl InMemorySessionRepository {
    /// Builds a session repository over `store`'s `operatingSessions`
    /// collection.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            sessions: Collection::new(store, "operatingSessions"),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load(&self) -> SessionRepositoryResult<Option<OperatingSession>> {
        Ok(self.sessions.list().await?.into_iter().next())
    }

    async fn create(&self, session: &OperatingSession) -> SessionRepositoryResult<()> {
        self.sessions.insert(session).await?;
        Ok(())
    }

    async fn save(&self, session: &OperatingSession) -> SessionRepositoryResult<()> {
        self.sessions
            .replace(&session.id().to_string(), session)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn load_returns_none_until_created() {
        let repo = InMemorySessionRepository::new(Arc::new(InMemoryStore::new()));
        assert!(repo.load().await.expect("load succeeds").is_none());

        let session = OperatingSession::first(Utc::now());
        repo.create(&session).await.expect("create succeeds");
        let loaded = repo.load().await.expect("load succeeds").expect("session exists");
        assert_eq!(loaded.id(), session.id());
    }

    #[tokio::test]
    async fn save_replaces_the_singleton() {
        let repo = InMemorySessionRepository::new(Arc::new(InMemoryStore::new()));
        let mut session = OperatingSession::first(Utc::now());
        repo.create(&session).await.expect("create succeeds");

        session.advance(
            crate::session::domain::Snapshot::new(1, Vec::new(), Vec::new(), Vec::new())
                .expect("valid snapshot"),
            Utc::now(),
            None,
        );
        repo.save(&session).await.expect("save succeeds");

        let loaded = repo.load().await.expect("load succeeds").expect("session exists");
        assert_eq!(loaded.current_session_number(), 2);
    }
}
