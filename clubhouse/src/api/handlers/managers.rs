use crate::api::models::managers::{ListManagersQuery, ManagerCreate, ManagerResponse, ManagerUpdate};
use crate::api::models::pagination::PaginatedResponse;
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{Managers, Repository};
use crate::errors::{Error, Result};
use crate::types::{ManagerId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/managers",
    tag = "managers",
    summary = "List managers",
    params(ListManagersQuery),
    responses(
        (status = 200, description = "Paginated list of managers", body = PaginatedResponse<ManagerResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_managers(
    State(state): State<AppState>,
    Query(query): Query<ListManagersQuery>,
) -> Result<Json<PaginatedResponse<ManagerResponse>>> {
    let mut conditions = Filter::new();
    if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
        conditions.push("name", Comparison::Like(search.trim().to_string()));
    }
    if let Some(nationality) = query.nationality {
        conditions = conditions.eq("nationality", nationality);
    }
    if let Some(active) = query.active {
        conditions = conditions.eq("active", active);
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (managers, total) = Managers::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        managers.into_iter().map(ManagerResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/managers",
    tag = "managers",
    summary = "Create manager",
    request_body = ManagerCreate,
    responses(
        (status = 201, description = "Manager created successfully", body = ManagerResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_manager(
    State(state): State<AppState>,
    Json(create): Json<ManagerCreate>,
) -> Result<(StatusCode, Json<ManagerResponse>)> {
    let manager = Managers::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(ManagerResponse::from(manager))))
}

#[utoipa::path(
    get,
    path = "/managers/{id}",
    tag = "managers",
    summary = "Get manager",
    params(("id" = uuid::Uuid, Path, description = "Manager ID")),
    responses(
        (status = 200, description = "Manager details", body = ManagerResponse),
        (status = 404, description = "Manager not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_manager(State(state): State<AppState>, Path(id): Path<ManagerId>) -> Result<Json<ManagerResponse>> {
    match Managers::new(state.store.as_ref()).get_by_id(id).await? {
        Some(manager) => Ok(Json(ManagerResponse::from(manager))),
        None => Err(Error::not_found(Resource::Managers, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/managers/{id}",
    tag = "managers",
    summary = "Update manager",
    params(("id" = uuid::Uuid, Path, description = "Manager ID")),
    request_body = ManagerUpdate,
    responses(
        (status = 200, description = "Manager updated successfully", body = ManagerResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Manager not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_manager(
    State(state): State<AppState>,
    Path(id): Path<ManagerId>,
    Json(update): Json<ManagerUpdate>,
) -> Result<Json<ManagerResponse>> {
    let manager = Managers::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Managers, id))?;
    Ok(Json(ManagerResponse::from(manager)))
}

#[utoipa::path(
    delete,
    path = "/managers/{id}",
    tag = "managers",
    summary = "Delete manager",
    params(("id" = uuid::Uuid, Path, description = "Manager ID")),
    responses(
        (status = 204, description = "Manager deleted successfully"),
        (status = 404, description = "Manager not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_manager(State(state): State<AppState>, Path(id): Path<ManagerId>) -> Result<StatusCode> {
    if Managers::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Managers, id))
    }
}
