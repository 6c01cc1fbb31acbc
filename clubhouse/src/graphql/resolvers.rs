//! Generic resolver bodies shared by every entity's queries, mutations and relationship
//! fields. They go through the same repositories as the REST handlers, so validation and
//! consistency checks are identical on both front ends.

use super::inputs::SortInput;
use crate::api::models::pagination::Pagination;
use crate::config::PaginationConfig;
use crate::db::filter::Filter;
use crate::db::handlers::{DocumentFilter, Documents, Entity, Repository};
use crate::db::store::{DocumentStore, Store};
use crate::errors::Error;
use crate::types::Resource;
use async_graphql::{Context, ErrorExtensions, Result};
use uuid::Uuid;

/// Convert any application error into a GraphQL error with `extensions.code`.
pub fn gql(err: impl Into<Error>) -> async_graphql::Error {
    err.into().extend()
}

pub fn store<'a>(ctx: &Context<'a>) -> Result<&'a dyn DocumentStore> {
    Ok(ctx.data::<Store>()?.as_ref())
}

/// Arguments shared by every list query.
#[derive(Debug, Default)]
pub struct ListArgs {
    pub sort: Option<SortInput>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListArgs {
    pub fn new(sort: Option<SortInput>, skip: Option<i64>, limit: Option<i64>) -> Self {
        Self { sort, skip, limit }
    }

    fn page(self, config: &PaginationConfig, conditions: Filter) -> DocumentFilter {
        let pagination = Pagination {
            skip: self.skip,
            limit: self.limit,
            sort: None,
        };
        pagination
            .filter(config, conditions)
            .sorted_by(self.sort.as_ref().map(SortInput::key))
    }
}

pub async fn fetch<E, R>(ctx: &Context<'_>, id: Uuid) -> Result<Option<R>>
where
    E: Entity,
    R: From<E>,
{
    let found = Documents::<E>::new(store(ctx)?).get_by_id(id).await.map_err(gql)?;
    Ok(found.map(R::from))
}

/// Fetch an optional reference, yielding `None` when unset or no longer present.
pub async fn fetch_optional<E, R>(ctx: &Context<'_>, id: Option<Uuid>) -> Result<Option<R>>
where
    E: Entity,
    R: From<E>,
{
    match id {
        Some(id) => fetch::<E, R>(ctx, id).await,
        None => Ok(None),
    }
}

/// Fetch documents by ID in the order given, skipping any that no longer exist.
pub async fn fetch_many<E, R>(ctx: &Context<'_>, ids: &[Uuid]) -> Result<Vec<R>>
where
    E: Entity,
    R: From<E>,
{
    let mut found = Documents::<E>::new(store(ctx)?).get_bulk(ids.to_vec()).await.map_err(gql)?;
    Ok(ids.iter().filter_map(|id| found.remove(id)).map(R::from).collect())
}

pub async fn list<E, R>(ctx: &Context<'_>, conditions: Filter, args: ListArgs) -> Result<Vec<R>>
where
    E: Entity,
    R: From<E>,
{
    let filter = args.page(ctx.data::<PaginationConfig>()?, conditions);
    let items = Documents::<E>::new(store(ctx)?).list(&filter).await.map_err(gql)?;
    Ok(items.into_iter().map(R::from).collect())
}

/// Every matching document in default order, for relationship fields.
pub async fn find_all<E, R>(ctx: &Context<'_>, conditions: Filter) -> Result<Vec<R>>
where
    E: Entity,
    R: From<E>,
{
    let items = Documents::<E>::new(store(ctx)?).find_all(&conditions).await.map_err(gql)?;
    Ok(items.into_iter().map(R::from).collect())
}

pub async fn count<E: Entity>(ctx: &Context<'_>, conditions: Filter) -> Result<u64> {
    let filter = DocumentFilter::new(0, 0).with_conditions(conditions);
    Documents::<E>::new(store(ctx)?).count(&filter).await.map_err(gql)
}

pub async fn create<E, R>(ctx: &Context<'_>, input: &E::CreateRequest) -> Result<R>
where
    E: Entity,
    R: From<E>,
{
    let created = Documents::<E>::new(store(ctx)?).create(input).await.map_err(gql)?;
    Ok(R::from(created))
}

pub async fn update<E, R>(ctx: &Context<'_>, resource: Resource, id: Uuid, input: &E::UpdateRequest) -> Result<R>
where
    E: Entity,
    R: From<E>,
{
    let updated = Documents::<E>::new(store(ctx)?)
        .update(id, input)
        .await
        .map_err(|err| Error::in_resource(resource, id)(err).extend())?;
    Ok(R::from(updated))
}

/// Delete by ID. Returns false when nothing was deleted.
pub async fn delete<E: Entity>(ctx: &Context<'_>, id: Uuid) -> Result<bool> {
    Documents::<E>::new(store(ctx)?).delete(id).await.map_err(gql)
}
