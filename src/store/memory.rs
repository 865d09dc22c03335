//! In-memory [`DocumentStore`] reference implementation.
//!
//! This is the only concrete store this crate ships: the real persistence
//! engine is an external collaborator (see the crate-level documentation).
//! Every service test, and any embedded deployment that does not need
//! durability across restarts, runs against this adapter.

use super::{DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl InMemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned(collection: &str) -> StoreError {
        StoreError::LockPoisoned(collection.to_owned())
    }
}

fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(Value::as_str).map(str::to_owned)
}

fn matches_query(record: &Value, query: &Map<String, Value>) -> bool {
    let Some(object) = record.as_object() else {
        return false;
    };
    query
        .iter()
        .all(|(key, expected)| object.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let guard = self
            .collections
            .read()
            .map_err(|_| Self::lock_poisoned(collection))?;
        Ok(guard
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let guard = self
            .collections
            .read()
            .map_err(|_| Self::lock_poisoned(collection))?;
        Ok(guard.get(collection).and_then(|records| records.get(id)).cloned())
    }

    async fn find_by_query(
        &self,
        collection: &str,
        query: &Map<String, Value>,
    ) -> StoreResult<Vec<Value>> {
        let guard = self
            .collections
            .read()
            .map_err(|_| Self::lock_poisoned(collection))?;
        Ok(guard
            .get(collection)
            .map(|records| {
                records
                    .values()
                    .filter(|record| matches_query(record, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, mut record: Value) -> StoreResult<Value> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| Self::lock_poisoned(collection))?;
        let table = guard.entry(collection.to_owned()).or_default();

        let id = match record_id(&record) {
            Some(existing) if table.contains_key(&existing) => {
                return Err(StoreError::DuplicateId {
                    collection: collection.to_owned(),
                    id: existing,
                });
            }
            Some(existing) => existing,
            None => {
                let generated = Uuid::new_v4().to_string();
                if let Value::Object(object) = &mut record {
                    object.insert("id".to_owned(), Value::String(generated.clone()));
                }
                generated
            }
        };

        table.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> StoreResult<Option<Value>> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| Self::lock_poisoned(collection))?;
        let Some(table) = guard.get_mut(collection) else {
            return Ok(None);
        };
        let Some(existing) = table.get_mut(id) else {
            return Ok(None);
        };
        let Value::Object(patch_fields) = patch else {
            return Err(StoreError::MalformedRecord {
                collection: collection.to_owned(),
                reason: "patch must be a JSON object".to_owned(),
            });
        };
        let Value::Object(existing_fields) = existing else {
            return Err(StoreError::MalformedRecord {
                collection: collection.to_owned(),
                reason: "stored record is not a JSON object".to_owned(),
            });
        };
        for (key, value) in patch_fields {
            existing_fields.insert(key, value);
        }
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| Self::lock_poisoned(collection))?;
        Ok(guard
            .get_mut(collection)
            .map(|table| table.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn clear_collection(&self, collection: &str) -> StoreResult<usize> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| Self::lock_poisoned(collection))?;
        Ok(guard.get_mut(collection).map(HashMap::len).map_or(0, |count| {
            guard.remove(collection);
            count
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_id_when_absent() {
        let store = InMemoryStore::new();
        let created = store
            .create("cars", json!({"reportingMarks": "ATSF"}))
            .await
            .expect("create succeeds");
        assert!(created.get("id").and_then(Value::as_str).is_some());
    }

    #[tokio::test]
    async fn create_preserves_supplied_id() {
        let store = InMemoryStore::new();
        let created = store
            .create("cars", json!({"id": "seed-1", "reportingMarks": "ATSF"}))
            .await
            .expect("create succeeds");
        assert_eq!(created.get("id").and_then(Value::as_str), Some("seed-1"));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_supplied_id() {
        let store = InMemoryStore::new();
        store
            .create("cars", json!({"id": "seed-1"}))
            .await
            .expect("create succeeds");
        let err = store
            .create("cars", json!({"id": "seed-1"}))
            .await
            .expect_err("duplicate id rejected");
        assert!(matches!(err, StoreError::DuplicateId { .. }));
    }

    #[tokio::test]
    async fn update_merges_fields_and_returns_none_when_missing() {
        let store = InMemoryStore::new();
        let created = store
            .create("cars", json!({"id": "seed-1", "color": "red"}))
            .await
            .expect("create succeeds");
        let id = created.get("id").and_then(Value::as_str).expect("id").to_owned();

        let updated = store
            .update("cars", &id, json!({"color": "blue"}))
            .await
            .expect("update succeeds")
            .expect("record exists");
        assert_eq!(updated.get("color").and_then(Value::as_str), Some("blue"));

        let missing = store
            .update("cars", "does-not-exist", json!({"color": "green"}))
            .await
            .expect("update succeeds");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_by_query_matches_all_keys() {
        let store = InMemoryStore::new();
        store
            .create("orders", json!({"id": "o1", "status": "pending", "industryId": "i1"}))
            .await
            .expect("create succeeds");
        store
            .create("orders", json!({"id": "o2", "status": "pending", "industryId": "i2"}))
            .await
            .expect("create succeeds");

        let mut query = Map::new();
        query.insert("status".to_owned(), json!("pending"));
        query.insert("industryId".to_owned(), json!("i1"));
        let matches = store.find_by_query("orders", &query).await.expect("query succeeds");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].get("id").and_then(Value::as_str), Some("o1"));
    }

    #[tokio::test]
    async fn clear_collection_removes_all_records_and_reports_count() {
        let store = InMemoryStore::new();
        store.create("cars", json!({"id": "a"})).await.expect("create succeeds");
        store.create("cars", json!({"id": "b"})).await.expect("create succeeds");

        let removed = store.clear_collection("cars").await.expect("clear succeeds");
        assert_eq!(removed, 2);
        assert!(store.find_all("cars").await.expect("list succeeds").is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = InMemoryStore::new();
        store.create("cars", json!({"id": "a"})).await.expect("create succeeds");

        assert!(store.delete("cars", "a").await.expect("delete succeeds"));
        assert!(!store.delete("cars", "a").await.expect("delete succeeds"));
    }
}
