use crate::api::models::matches::MatchResponse;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::seasons::{ListSeasonsQuery, SeasonCreate, SeasonResponse, SeasonUpdate};
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{Repository, Seasons};
use crate::errors::{Error, Result};
use crate::types::{Resource, SeasonId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/seasons",
    tag = "seasons",
    summary = "List seasons",
    params(ListSeasonsQuery),
    responses(
        (status = 200, description = "Paginated list of seasons", body = PaginatedResponse<SeasonResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_seasons(
    State(state): State<AppState>,
    Query(query): Query<ListSeasonsQuery>,
) -> Result<Json<PaginatedResponse<SeasonResponse>>> {
    let mut conditions = Filter::new();
    if let Some(year) = query.year {
        conditions.push("start_year", Comparison::Lte(json!(year)));
        conditions.push("end_year", Comparison::Gte(json!(year)));
    }
    if let Some(competition_id) = query.competition_id {
        conditions.push("competition_ids", Comparison::Has(json!(competition_id)));
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (seasons, total) = Seasons::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        seasons.into_iter().map(SeasonResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/seasons",
    tag = "seasons",
    summary = "Create season",
    request_body = SeasonCreate,
    responses(
        (status = 201, description = "Season created successfully", body = SeasonResponse),
        (status = 400, description = "Validation failed or unknown competition"),
        (status = 409, description = "A season with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_season(
    State(state): State<AppState>,
    Json(create): Json<SeasonCreate>,
) -> Result<(StatusCode, Json<SeasonResponse>)> {
    let season = Seasons::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(SeasonResponse::from(season))))
}

#[utoipa::path(
    get,
    path = "/seasons/{id}",
    tag = "seasons",
    summary = "Get season",
    params(("id" = uuid::Uuid, Path, description = "Season ID")),
    responses(
        (status = 200, description = "Season details", body = SeasonResponse),
        (status = 404, description = "Season not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_season(State(state): State<AppState>, Path(id): Path<SeasonId>) -> Result<Json<SeasonResponse>> {
    match Seasons::new(state.store.as_ref()).get_by_id(id).await? {
        Some(season) => Ok(Json(SeasonResponse::from(season))),
        None => Err(Error::not_found(Resource::Seasons, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/seasons/{id}",
    tag = "seasons",
    summary = "Update season",
    params(("id" = uuid::Uuid, Path, description = "Season ID")),
    request_body = SeasonUpdate,
    responses(
        (status = 200, description = "Season updated successfully", body = SeasonResponse),
        (status = 400, description = "Validation failed or unknown competition"),
        (status = 404, description = "Season not found"),
        (status = 409, description = "A season with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_season(
    State(state): State<AppState>,
    Path(id): Path<SeasonId>,
    Json(update): Json<SeasonUpdate>,
) -> Result<Json<SeasonResponse>> {
    let season = Seasons::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Seasons, id))?;
    Ok(Json(SeasonResponse::from(season)))
}

#[utoipa::path(
    delete,
    path = "/seasons/{id}",
    tag = "seasons",
    summary = "Delete season",
    params(("id" = uuid::Uuid, Path, description = "Season ID")),
    responses(
        (status = 204, description = "Season deleted successfully"),
        (status = 404, description = "Season not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_season(State(state): State<AppState>, Path(id): Path<SeasonId>) -> Result<StatusCode> {
    if Seasons::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Seasons, id))
    }
}

#[utoipa::path(
    get,
    path = "/seasons/{id}/matches",
    tag = "seasons",
    summary = "List matches played in a season",
    params(("id" = uuid::Uuid, Path, description = "Season ID"), Pagination),
    responses(
        (status = 200, description = "Paginated list of matches", body = PaginatedResponse<MatchResponse>),
        (status = 404, description = "Season not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_season_matches(
    State(state): State<AppState>,
    Path(id): Path<SeasonId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<MatchResponse>>> {
    let mut repo = Seasons::new(state.store.as_ref());
    if repo.get_by_id(id).await?.is_none() {
        return Err(Error::not_found(Resource::Seasons, id));
    }

    let page = pagination.filter(&state.config.pagination, Filter::new());
    let (skip, limit) = (page.skip, page.limit);
    let (matches, total) = repo.matches_in(id, page).await?;

    Ok(Json(PaginatedResponse::new(
        matches.into_iter().map(MatchResponse::from).collect(),
        total,
        skip,
        limit,
    )))
}
