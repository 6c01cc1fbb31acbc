use crate::api::models::pagination::PaginatedResponse;
use crate::api::models::player_stats::{ListPlayerStatsQuery, PlayerStatsCreate, PlayerStatsResponse, PlayerStatsUpdate};
use crate::db::filter::Filter;
use crate::db::handlers::{PlayerStatistics, Repository};
use crate::errors::{Error, Result};
use crate::types::{PlayerStatsId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    get,
    path = "/player-stats",
    tag = "player-stats",
    summary = "List player statistics",
    params(ListPlayerStatsQuery),
    responses(
        (status = 200, description = "Paginated list of statistics lines", body = PaginatedResponse<PlayerStatsResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_player_stats(
    State(state): State<AppState>,
    Query(query): Query<ListPlayerStatsQuery>,
) -> Result<Json<PaginatedResponse<PlayerStatsResponse>>> {
    let mut conditions = Filter::new();
    if let Some(player_id) = query.player_id {
        conditions = conditions.eq("player_id", player_id.to_string());
    }
    if let Some(season_id) = query.season_id {
        conditions = conditions.eq("season_id", season_id.to_string());
    }
    if let Some(competition_id) = query.competition_id {
        conditions = conditions.eq("competition_id", competition_id.to_string());
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (stats, total) = PlayerStatistics::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        stats.into_iter().map(PlayerStatsResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/player-stats",
    tag = "player-stats",
    summary = "Create player statistics",
    request_body = PlayerStatsCreate,
    responses(
        (status = 201, description = "Statistics created successfully", body = PlayerStatsResponse),
        (status = 400, description = "Validation failed or unknown reference"),
        (status = 409, description = "Statistics already exist for this player, season and competition"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_player_stats(
    State(state): State<AppState>,
    Json(create): Json<PlayerStatsCreate>,
) -> Result<(StatusCode, Json<PlayerStatsResponse>)> {
    let stats = PlayerStatistics::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(PlayerStatsResponse::from(stats))))
}

#[utoipa::path(
    get,
    path = "/player-stats/{id}",
    tag = "player-stats",
    summary = "Get player statistics",
    params(("id" = uuid::Uuid, Path, description = "Statistics ID")),
    responses(
        (status = 200, description = "Statistics details", body = PlayerStatsResponse),
        (status = 404, description = "Statistics not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(id): Path<PlayerStatsId>,
) -> Result<Json<PlayerStatsResponse>> {
    match PlayerStatistics::new(state.store.as_ref()).get_by_id(id).await? {
        Some(stats) => Ok(Json(PlayerStatsResponse::from(stats))),
        None => Err(Error::not_found(Resource::PlayerStats, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/player-stats/{id}",
    tag = "player-stats",
    summary = "Update player statistics",
    params(("id" = uuid::Uuid, Path, description = "Statistics ID")),
    request_body = PlayerStatsUpdate,
    responses(
        (status = 200, description = "Statistics updated successfully", body = PlayerStatsResponse),
        (status = 400, description = "Validation failed or unknown reference"),
        (status = 404, description = "Statistics not found"),
        (status = 409, description = "Statistics already exist for this player, season and competition"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_player_stats(
    State(state): State<AppState>,
    Path(id): Path<PlayerStatsId>,
    Json(update): Json<PlayerStatsUpdate>,
) -> Result<Json<PlayerStatsResponse>> {
    let stats = PlayerStatistics::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::PlayerStats, id))?;
    Ok(Json(PlayerStatsResponse::from(stats)))
}

#[utoipa::path(
    delete,
    path = "/player-stats/{id}",
    tag = "player-stats",
    summary = "Delete player statistics",
    params(("id" = uuid::Uuid, Path, description = "Statistics ID")),
    responses(
        (status = 204, description = "Statistics deleted successfully"),
        (status = 404, description = "Statistics not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_player_stats(State(state): State<AppState>, Path(id): Path<PlayerStatsId>) -> Result<StatusCode> {
    if PlayerStatistics::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::PlayerStats, id))
    }
}
