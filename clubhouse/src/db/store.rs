//! The document store abstraction shared by the MongoDB and in-memory backends.

use crate::db::errors::Result;
use crate::db::filter::{Filter, FindOptions};
use mongodb::bson::Document;
use serde_json::Value;
use std::sync::Arc;

/// Static description of a collection: its name, unique key sets and schema validator.
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    pub name: &'static str,
    /// Each entry is a set of fields that must be unique together
    pub unique: &'static [&'static [&'static str]],
    /// `$jsonSchema` validator installed on the MongoDB collection
    pub validator: fn() -> Document,
}

/// A store of JSON documents grouped into collections.
///
/// Every document is a JSON object with a string `id` field that identifies it within
/// its collection.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the collection and its indexes/validators if needed
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()>;

    /// Insert a new document
    async fn insert(&self, spec: &CollectionSpec, document: Value) -> Result<()>;

    /// Fetch a document by ID
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Fetch all documents matching a filter
    async fn find(&self, collection: &str, filter: &Filter, options: &FindOptions) -> Result<Vec<Value>>;

    /// Count documents matching a filter
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Replace a document by ID, returning false if it did not exist
    async fn replace(&self, spec: &CollectionSpec, id: &str, document: Value) -> Result<bool>;

    /// Delete a document by ID, returning false if it did not exist
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;
}

/// Shared handle to the configured store.
pub type Store = Arc<dyn DocumentStore>;
