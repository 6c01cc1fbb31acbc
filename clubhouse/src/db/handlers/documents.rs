//! Generic repository over one document collection.
//!
//! Each stored entity implements [`Entity`], which tells [`Documents`] where it lives, how to
//! build it from a create request, how to apply a partial update, and which checks must pass
//! before it is written. The write path is always:
//!
//! ```text
//! build / patch -> validate fields -> prepare (references, derived fields) -> insert / replace
//! ```

use crate::db::errors::{DbError, Result};
use crate::db::filter::{Comparison, Direction, Filter, FindOptions};
use crate::db::handlers::repository::Repository;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::types::abbrev_uuid;
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::instrument;
use uuid::Uuid;

/// A document type stored in its own collection.
#[async_trait::async_trait]
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type CreateRequest: Send + Sync;
    type UpdateRequest: Send + Sync;

    const COLLECTION: CollectionSpec;

    /// Fields that list operations may sort by
    const SORTABLE: &'static [&'static str];

    fn from_create(id: Uuid, request: &Self::CreateRequest, now: DateTime<Utc>) -> Self;

    fn apply_update(&mut self, request: &Self::UpdateRequest);

    fn id(&self) -> Uuid;

    fn touch(&mut self, now: DateTime<Utc>);

    /// Field-level schema rules
    fn validate(&self, _errors: &mut FieldErrors) {}

    /// Cross-document checks and derived fields, run after validation on every write
    async fn prepare(&mut self, _store: &dyn DocumentStore) -> Result<()> {
        Ok(())
    }
}

/// Filter, sort and pagination for list operations
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    pub skip: u64,
    pub limit: u64,
    pub conditions: Filter,
    pub sort: Option<(String, Direction)>,
}

impl DocumentFilter {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit,
            conditions: Filter::new(),
            sort: None,
        }
    }

    pub fn with_conditions(mut self, conditions: Filter) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn sorted_by(mut self, sort: Option<(String, Direction)>) -> Self {
        self.sort = sort;
        self
    }
}

pub struct Documents<'a, E> {
    store: &'a dyn DocumentStore,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> Documents<'a, E> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &'a dyn DocumentStore {
        self.store
    }

    /// Every document matching `conditions`, in default order.
    pub async fn find_all(&self, conditions: &Filter) -> Result<Vec<E>> {
        let documents = self.store.find(E::COLLECTION.name, conditions, &FindOptions::default()).await?;
        documents.into_iter().map(decode).collect()
    }

    /// One page of matching documents plus the total number of matches.
    pub async fn page(&mut self, filter: &DocumentFilter) -> Result<(Vec<E>, u64)> {
        let total = self.count(filter).await?;
        let items = self.list(filter).await?;
        Ok((items, total))
    }

    async fn checked(&self, mut entity: E) -> Result<E> {
        let mut errors = FieldErrors::new();
        entity.validate(&mut errors);
        if !errors.is_empty() {
            return Err(DbError::SchemaViolation {
                collection: E::COLLECTION.name.to_string(),
                errors: errors.into_vec(),
            });
        }
        entity.prepare(self.store).await?;
        Ok(entity)
    }

    fn find_options(filter: &DocumentFilter) -> Result<FindOptions> {
        let mut options = FindOptions::page(filter.skip, filter.limit);
        if let Some((field, direction)) = &filter.sort {
            if !E::SORTABLE.contains(&field.as_str()) {
                return Err(DbError::check(
                    E::COLLECTION.name,
                    format!("cannot sort {} by '{field}'", E::COLLECTION.name),
                ));
            }
            options = options.sorted_by(field.clone(), *direction);
        }
        Ok(options)
    }
}

pub fn decode<E: DeserializeOwned>(document: Value) -> Result<E> {
    Ok(serde_json::from_value(document)?)
}

fn encode<E: Serialize>(entity: &E) -> Result<Value> {
    Ok(serde_json::to_value(entity)?)
}

/// Load a referenced document, failing with a reference violation if it does not exist.
pub async fn require<R: Entity>(store: &dyn DocumentStore, collection: &str, field: &str, id: Uuid) -> Result<R> {
    match store.get(R::COLLECTION.name, &id.to_string()).await? {
        Some(document) => decode(document),
        None => Err(DbError::missing_reference(collection, field, id)),
    }
}

#[async_trait::async_trait]
impl<'a, E: Entity> Repository for Documents<'a, E> {
    type CreateRequest = E::CreateRequest;
    type UpdateRequest = E::UpdateRequest;
    type Response = E;
    type Id = Uuid;
    type Filter = DocumentFilter;

    #[instrument(skip(self, request), fields(collection = E::COLLECTION.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let entity = E::from_create(Uuid::new_v4(), request, Utc::now());
        let entity = self.checked(entity).await?;
        self.store.insert(&E::COLLECTION, encode(&entity)?).await?;
        Ok(entity)
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION.name, id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        self.store
            .get(E::COLLECTION.name, &id.to_string())
            .await?
            .map(decode)
            .transpose()
    }

    #[instrument(skip(self, ids), fields(collection = E::COLLECTION.name, count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conditions = Filter::new().with(
            "id",
            Comparison::In(ids.iter().map(|id| Value::String(id.to_string())).collect()),
        );
        let entities = self.find_all(&conditions).await?;
        Ok(entities.into_iter().map(|e| (e.id(), e)).collect())
    }

    #[instrument(skip(self, filter), fields(collection = E::COLLECTION.name, limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let options = Self::find_options(filter)?;
        let documents = self.store.find(E::COLLECTION.name, &filter.conditions, &options).await?;
        documents.into_iter().map(decode).collect()
    }

    #[instrument(skip(self, filter), fields(collection = E::COLLECTION.name), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<u64> {
        self.store.count(E::COLLECTION.name, &filter.conditions).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION.name, id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        self.store.delete(E::COLLECTION.name, &id.to_string()).await
    }

    #[instrument(skip(self, request), fields(collection = E::COLLECTION.name, id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut entity: E = self.get_by_id(id).await?.ok_or(DbError::NotFound)?;
        entity.apply_update(request);
        entity.touch(Utc::now());

        let entity = self.checked(entity).await?;
        if !self.store.replace(&E::COLLECTION, &id.to_string(), encode(&entity)?).await? {
            // Deleted between read and write
            return Err(DbError::NotFound);
        }
        Ok(entity)
    }
}
