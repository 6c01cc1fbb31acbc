use crate::api::models::pagination::PaginatedResponse;
use crate::api::models::stadiums::{ListStadiumsQuery, StadiumCreate, StadiumResponse, StadiumUpdate};
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{Repository, Stadiums};
use crate::errors::{Error, Result};
use crate::types::{Resource, StadiumId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/stadiums",
    tag = "stadiums",
    summary = "List stadiums",
    params(ListStadiumsQuery),
    responses(
        (status = 200, description = "Paginated list of stadiums", body = PaginatedResponse<StadiumResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_stadiums(
    State(state): State<AppState>,
    Query(query): Query<ListStadiumsQuery>,
) -> Result<Json<PaginatedResponse<StadiumResponse>>> {
    let mut conditions = Filter::new();
    if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
        conditions.push("name", Comparison::Like(search.trim().to_string()));
    }
    if let Some(city) = query.city {
        conditions = conditions.eq("city", city);
    }
    if let Some(surface) = query.surface {
        conditions = conditions.eq("surface", json!(surface));
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (stadiums, total) = Stadiums::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        stadiums.into_iter().map(StadiumResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/stadiums",
    tag = "stadiums",
    summary = "Create stadium",
    request_body = StadiumCreate,
    responses(
        (status = 201, description = "Stadium created successfully", body = StadiumResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "A stadium with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_stadium(
    State(state): State<AppState>,
    Json(create): Json<StadiumCreate>,
) -> Result<(StatusCode, Json<StadiumResponse>)> {
    let stadium = Stadiums::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(StadiumResponse::from(stadium))))
}

#[utoipa::path(
    get,
    path = "/stadiums/{id}",
    tag = "stadiums",
    summary = "Get stadium",
    params(("id" = uuid::Uuid, Path, description = "Stadium ID")),
    responses(
        (status = 200, description = "Stadium details", body = StadiumResponse),
        (status = 404, description = "Stadium not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_stadium(State(state): State<AppState>, Path(id): Path<StadiumId>) -> Result<Json<StadiumResponse>> {
    match Stadiums::new(state.store.as_ref()).get_by_id(id).await? {
        Some(stadium) => Ok(Json(StadiumResponse::from(stadium))),
        None => Err(Error::not_found(Resource::Stadiums, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/stadiums/{id}",
    tag = "stadiums",
    summary = "Update stadium",
    params(("id" = uuid::Uuid, Path, description = "Stadium ID")),
    request_body = StadiumUpdate,
    responses(
        (status = 200, description = "Stadium updated successfully", body = StadiumResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Stadium not found"),
        (status = 409, description = "A stadium with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_stadium(
    State(state): State<AppState>,
    Path(id): Path<StadiumId>,
    Json(update): Json<StadiumUpdate>,
) -> Result<Json<StadiumResponse>> {
    let stadium = Stadiums::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Stadiums, id))?;
    Ok(Json(StadiumResponse::from(stadium)))
}

#[utoipa::path(
    delete,
    path = "/stadiums/{id}",
    tag = "stadiums",
    summary = "Delete stadium",
    params(("id" = uuid::Uuid, Path, description = "Stadium ID")),
    responses(
        (status = 204, description = "Stadium deleted successfully"),
        (status = 404, description = "Stadium not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_stadium(State(state): State<AppState>, Path(id): Path<StadiumId>) -> Result<StatusCode> {
    if Stadiums::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Stadiums, id))
    }
}
