use crate::api::models::pagination::PaginatedResponse;
use crate::api::models::trophies::{ListTrophiesQuery, TrophyCreate, TrophyResponse, TrophyUpdate};
use crate::db::filter::Filter;
use crate::db::handlers::{Repository, Trophies};
use crate::errors::{Error, Result};
use crate::types::{Resource, TrophyId};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/trophies",
    tag = "trophies",
    summary = "List trophies",
    params(ListTrophiesQuery),
    responses(
        (status = 200, description = "Paginated list of trophies", body = PaginatedResponse<TrophyResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_trophies(
    State(state): State<AppState>,
    Query(query): Query<ListTrophiesQuery>,
) -> Result<Json<PaginatedResponse<TrophyResponse>>> {
    let mut conditions = Filter::new();
    if let Some(competition_id) = query.competition_id {
        conditions = conditions.eq("competition_id", competition_id.to_string());
    }
    if let Some(season_id) = query.season_id {
        conditions = conditions.eq("season_id", season_id.to_string());
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (trophies, total) = Trophies::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        trophies.into_iter().map(TrophyResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/trophies",
    tag = "trophies",
    summary = "Create trophy",
    request_body = TrophyCreate,
    responses(
        (status = 201, description = "Trophy created successfully", body = TrophyResponse),
        (status = 400, description = "Validation failed, unknown reference or inconsistent season"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_trophy(
    State(state): State<AppState>,
    Json(create): Json<TrophyCreate>,
) -> Result<(StatusCode, Json<TrophyResponse>)> {
    let trophy = Trophies::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(TrophyResponse::from(trophy))))
}

#[utoipa::path(
    get,
    path = "/trophies/{id}",
    tag = "trophies",
    summary = "Get trophy",
    params(("id" = uuid::Uuid, Path, description = "Trophy ID")),
    responses(
        (status = 200, description = "Trophy details", body = TrophyResponse),
        (status = 404, description = "Trophy not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_trophy(State(state): State<AppState>, Path(id): Path<TrophyId>) -> Result<Json<TrophyResponse>> {
    match Trophies::new(state.store.as_ref()).get_by_id(id).await? {
        Some(trophy) => Ok(Json(TrophyResponse::from(trophy))),
        None => Err(Error::not_found(Resource::Trophies, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/trophies/{id}",
    tag = "trophies",
    summary = "Update trophy",
    params(("id" = uuid::Uuid, Path, description = "Trophy ID")),
    request_body = TrophyUpdate,
    responses(
        (status = 200, description = "Trophy updated successfully", body = TrophyResponse),
        (status = 400, description = "Validation failed, unknown reference or inconsistent season"),
        (status = 404, description = "Trophy not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_trophy(
    State(state): State<AppState>,
    Path(id): Path<TrophyId>,
    Json(update): Json<TrophyUpdate>,
) -> Result<Json<TrophyResponse>> {
    let trophy = Trophies::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Trophies, id))?;
    Ok(Json(TrophyResponse::from(trophy)))
}

#[utoipa::path(
    delete,
    path = "/trophies/{id}",
    tag = "trophies",
    summary = "Delete trophy",
    params(("id" = uuid::Uuid, Path, description = "Trophy ID")),
    responses(
        (status = 204, description = "Trophy deleted successfully"),
        (status = 404, description = "Trophy not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_trophy(State(state): State<AppState>, Path(id): Path<TrophyId>) -> Result<StatusCode> {
    if Trophies::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Trophies, id))
    }
}
