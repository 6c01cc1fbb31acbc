//! The data access contract every collection repository implements.

use crate::db::errors::Result;
use std::collections::HashMap;

/// CRUD over one document collection.
///
/// Writes go through the repository rather than the store so that field rules, reference
/// checks and derived fields are applied on every path. Methods take `&mut self` so a
/// repository can cache related documents it loaded while checking references.
#[async_trait::async_trait]
pub trait Repository {
    /// Body of a create request
    type CreateRequest;

    /// Body of a partial update; absent fields keep their stored value
    type UpdateRequest;

    /// Stored document as returned to callers
    type Response;

    type Id: Send + Sync;

    /// Conditions, sort and paging for list queries
    type Filter: Send + Sync;

    /// Validate, check references and insert
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// Fetch several documents at once. Missing IDs are absent from the map.
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>>;

    /// One page of matching documents
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Total matching documents; skip and limit are ignored
    async fn count(&mut self, filter: &Self::Filter) -> Result<u64>;

    /// Returns `false` when no document had the ID
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;

    /// Apply a patch, re-run every check and replace the stored document
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}
