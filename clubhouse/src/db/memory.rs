//! In-memory document store.
//!
//! Used for local development, demos and the test suite. Collections keep insertion order
//! and are guarded by [`DashMap`] shard locks, so every operation on a single collection is
//! atomic (including the unique key checks on insert and replace).

use crate::db::errors::{DbError, Result};
use crate::db::filter::{Filter, FindOptions, lookup_field};
use crate::db::store::{CollectionSpec, DocumentStore};
use dashmap::DashMap;
use serde_json::Value;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document_id(document: &Value) -> Option<&str> {
    document.get("id").and_then(Value::as_str)
}

/// Find a stored document (other than `skip_id`) colliding with `candidate` on a unique key set.
fn unique_conflict(spec: &CollectionSpec, documents: &[Value], candidate: &Value, skip_id: Option<&str>) -> Option<DbError> {
    for key_set in spec.unique {
        let candidate_key: Vec<Option<&Value>> = key_set.iter().map(|f| lookup_field(candidate, f)).collect();
        let collides = documents.iter().any(|existing| {
            document_id(existing) != skip_id
                && key_set
                    .iter()
                    .zip(&candidate_key)
                    .all(|(field, value)| lookup_field(existing, field).unwrap_or(&Value::Null) == value.unwrap_or(&Value::Null))
        });
        if collides {
            return Some(DbError::UniqueViolation {
                collection: spec.name.to_string(),
                fields: key_set.iter().map(|f| f.to_string()).collect(),
                message: format!("duplicate key in {} on ({})", spec.name, key_set.join(", ")),
            });
        }
    }
    None
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()> {
        self.collections.entry(spec.name.to_string()).or_default();
        Ok(())
    }

    #[instrument(skip(self, spec, document), fields(collection = spec.name), err)]
    async fn insert(&self, spec: &CollectionSpec, document: Value) -> Result<()> {
        let id = document_id(&document)
            .ok_or_else(|| DbError::Other(anyhow::anyhow!("document has no string id")))?
            .to_string();
        let mut documents = self.collections.entry(spec.name.to_string()).or_default();

        if documents.iter().any(|existing| document_id(existing) == Some(id.as_str())) {
            return Err(DbError::UniqueViolation {
                collection: spec.name.to_string(),
                fields: vec!["id".to_string()],
                message: format!("duplicate id {id} in {}", spec.name),
            });
        }
        if let Some(conflict) = unique_conflict(spec, &documents, &document, None) {
            return Err(conflict);
        }

        documents.push(document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| document_id(d) == Some(id)).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter, options: &FindOptions) -> Result<Vec<Value>> {
        let Some(documents) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<Value> = documents.iter().filter(|d| filter.matches(d)).cloned().collect();
        drop(documents);

        // Stable sort keeps insertion order between equal keys
        matching.sort_by(|a, b| options.compare(a, b));

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let count = self
            .collections
            .get(collection)
            .map(|documents| documents.iter().filter(|d| filter.matches(d)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    #[instrument(skip(self, spec, document), fields(collection = spec.name), err)]
    async fn replace(&self, spec: &CollectionSpec, id: &str, document: Value) -> Result<bool> {
        let Some(mut documents) = self.collections.get_mut(spec.name) else {
            return Ok(false);
        };
        let Some(position) = documents.iter().position(|d| document_id(d) == Some(id)) else {
            return Ok(false);
        };
        if let Some(conflict) = unique_conflict(spec, &documents, &document, Some(id)) {
            return Err(conflict);
        }

        documents[position] = document;
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let Some(mut documents) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|d| document_id(d) != Some(id));
        Ok(documents.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::filter::{Comparison, Direction};
    use mongodb::bson::Document;
    use serde_json::json;

    const STADIUMS: CollectionSpec = CollectionSpec {
        name: "stadiums",
        unique: &[&["name"]],
        validator: Document::new,
    };

    async fn store_with_stadiums() -> MemoryStore {
        let store = MemoryStore::new();
        store.ensure_collection(&STADIUMS).await.unwrap();
        for (id, name, capacity) in [("s1", "Anfield", 61276), ("s2", "Goodison Park", 39414), ("s3", "Melwood", 500)] {
            store
                .insert(&STADIUMS, json!({"id": id, "name": name, "capacity": capacity}))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = store_with_stadiums().await;
        let stadium = store.get("stadiums", "s1").await.unwrap().unwrap();
        assert_eq!(stadium["name"], "Anfield");
        assert!(store.get("stadiums", "missing").await.unwrap().is_none());
        assert!(store.get("unknown_collection", "s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_keys_are_enforced() {
        let store = store_with_stadiums().await;

        let err = store
            .insert(&STADIUMS, json!({"id": "s4", "name": "Anfield", "capacity": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref fields, .. } if fields == &vec!["name".to_string()]));

        let err = store
            .insert(&STADIUMS, json!({"id": "s1", "name": "New", "capacity": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Replacing a document with its own unique value is fine, colliding with another is not
        assert!(
            store
                .replace(&STADIUMS, "s1", json!({"id": "s1", "name": "Anfield", "capacity": 61000}))
                .await
                .unwrap()
        );
        let err = store
            .replace(&STADIUMS, "s2", json!({"id": "s2", "name": "Anfield", "capacity": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_find_filters_sorts_and_pages() {
        let store = store_with_stadiums().await;

        let big = Filter::new().with("capacity", Comparison::Gt(json!(1000)));
        let found = store.find("stadiums", &big, &FindOptions::default()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(store.count("stadiums", &big).await.unwrap(), 2);

        let options = FindOptions::page(1, 1).sorted_by("capacity", Direction::Descending);
        let page = store.find("stadiums", &Filter::new(), &options).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["id"], "s2");
    }

    #[tokio::test]
    async fn test_replace_and_delete_missing() {
        let store = store_with_stadiums().await;
        assert!(!store.replace(&STADIUMS, "missing", json!({"id": "missing"})).await.unwrap());
        assert!(store.delete("stadiums", "s3").await.unwrap());
        assert!(!store.delete("stadiums", "s3").await.unwrap());
        assert_eq!(store.count("stadiums", &Filter::new()).await.unwrap(), 2);
    }
}
