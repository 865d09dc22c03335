//! Generic document-store contract.
//!
//! The core depends on an opaque, collection-oriented record store (see the
//! crate-level documentation for the layering this supports). Records are
//! [`serde_json::Value`] objects keyed by string id; every bounded context
//! builds typed repositories on top of [`Collection`] rather than talking to
//! [`DocumentStore`] directly.

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Result type for document-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a [`DocumentStore`] implementation can report.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store's internal lock was poisoned by a panicking holder.
    #[error("store lock poisoned for collection '{0}'")]
    LockPoisoned(String),

    /// A record could not be (de)serialized to the expected shape.
    #[error("malformed record in collection '{collection}': {reason}")]
    MalformedRecord {
        /// Collection the malformed record was read from or written to.
        collection: String,
        /// Human-readable description of what was wrong with the record.
        reason: String,
    },

    /// A caller-supplied id collided with an existing record on create.
    #[error("id '{id}' already exists in collection '{collection}'")]
    DuplicateId {
        /// Collection the duplicate id was detected in.
        collection: String,
        /// The id that already existed.
        id: String,
    },
}

/// Named-collection document store.
///
/// Mirrors the store contract the core depends on: a set of named
/// collections, each supporting create / `find_by_id` / `find_by_query` /
/// `find_all` / update / delete on opaque records keyed by a stable string
/// id. All operations are per-operation atomic; composing several of them
/// into a multi-record operation (advance, rollback, switch-list generation,
/// train completion) is the caller's responsibility.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every record in `collection`.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Returns the record with the given id, or `None` if absent.
    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Returns every record in `collection` whose fields equality-match every
    /// key in `query`.
    async fn find_by_query(
        &self,
        collection: &str,
        query: &Map<String, Value>,
    ) -> StoreResult<Vec<Value>>;

    /// Creates `record` in `collection`.
    ///
    /// Assigns a new id when the record carries none; preserves a
    /// caller-supplied id verbatim, failing with
    /// [`StoreError::DuplicateId`] if it collides with an existing record.
    async fn create(&self, collection: &str, record: Value) -> StoreResult<Value>;

    /// Merges `patch`'s fields into the record with id `id`, returning the
    /// post-write record, or `None` if no such record exists.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> StoreResult<Option<Value>>;

    /// Deletes the record with id `id`, returning whether a record was
    /// removed.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Removes every record from `collection`, returning the count removed.
    async fn clear_collection(&self, collection: &str) -> StoreResult<usize>;
}

/// Typed view over one named collection of a [`DocumentStore`].
///
/// Every bounded-context repository is built from one or more of these; the
/// (de)serialization boundary between a context's domain types and the
/// store's opaque JSON records lives here, and only here.
#[derive(Clone)]
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
{
    /// Creates a typed handle onto `name` within `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _marker: std::marker::PhantomData,
        }
    }

    fn decode(&self, value: Value) -> StoreResult<T> {
        serde_json::from_value(value).map_err(|err| StoreError::MalformedRecord {
            collection: self.name.to_owned(),
            reason: err.to_string(),
        })
    }

    fn encode(&self, record: &T) -> StoreResult<Value> {
        serde_json::to_value(record).map_err(|err| StoreError::MalformedRecord {
            collection: self.name.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Returns every record in the collection.
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        self.store
            .find_all(self.name)
            .await?
            .into_iter()
            .map(|value| self.decode(value))
            .collect()
    }

    /// Returns the record with the given id.
    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        match self.store.find_by_id(self.name, id).await? {
            Some(value) => Ok(Some(self.decode(value)?)),
            None => Ok(None),
        }
    }

    /// Returns every record matching `query` (equality on each key).
    pub async fn query(&self, query: &Map<String, Value>) -> StoreResult<Vec<T>> {
        self.store
            .find_by_query(self.name, query)
            .await?
            .into_iter()
            .map(|value| self.decode(value))
            .collect()
    }

    /// Inserts a new record, returning the (possibly id-assigned) result.
    pub async fn insert(&self, record: &T) -> StoreResult<T> {
        let value = self.encode(record)?;
        let created = self.store.create(self.name, value).await?;
        self.decode(created)
    }

    /// Replaces the record with id `id` in full.
    ///
    /// Returns `None` if no record with that id exists.
    pub async fn replace(&self, id: &str, record: &T) -> StoreResult<Option<T>> {
        let value = self.encode(record)?;
        let Value::Object(patch) = value else {
            return Err(StoreError::MalformedRecord {
                collection: self.name.to_owned(),
                reason: "record does not serialize to a JSON object".to_owned(),
            });
        };
        match self.store.update(self.name, id, Value::Object(patch)).await? {
            Some(updated) => Ok(Some(self.decode(updated)?)),
            None => Ok(None),
        }
    }

    /// Removes the record with id `id`, returning whether one was removed.
    pub async fn remove(&self, id: &str) -> StoreResult<bool> {
        self.store.delete(self.name, id).await
    }

    /// Removes every record in the collection, returning the count removed.
    pub async fn clear(&self) -> StoreResult<usize> {
        self.store.clear_collection(self.name).await
    }
}

/// Builds a single-key equality query map, the common case for repository
/// lookups (`industryId`, `status`, and so on).
#[must_use]
pub fn query_eq(key: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_owned(), value.into());
    map
}
