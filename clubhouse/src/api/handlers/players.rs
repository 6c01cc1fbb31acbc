use crate::api::models::contracts::ContractResponse;
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::player_stats::PlayerStatsResponse;
use crate::api::models::players::{ListPlayersQuery, PlayerCreate, PlayerResponse, PlayerUpdate};
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{DocumentFilter, Players, Repository};
use crate::errors::{Error, Result};
use crate::types::{PlayerId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    summary = "List players",
    params(ListPlayersQuery),
    responses(
        (status = 200, description = "Paginated list of players", body = PaginatedResponse<PlayerResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<ListPlayersQuery>,
) -> Result<Json<PaginatedResponse<PlayerResponse>>> {
    let mut conditions = Filter::new();
    if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
        conditions.push("name", Comparison::Like(search.trim().to_string()));
    }
    if let Some(position) = query.position {
        conditions = conditions.eq("position", json!(position));
    }
    if let Some(nationality) = query.nationality {
        conditions = conditions.eq("nationality", nationality);
    }
    if let Some(active) = query.active {
        conditions = conditions.eq("active", active);
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let mut repo = Players::new(state.store.as_ref());
    let (players, total) = repo.page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        players.into_iter().map(PlayerResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    summary = "Create player",
    request_body = PlayerCreate,
    responses(
        (status = 201, description = "Player created successfully", body = PlayerResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_player(
    State(state): State<AppState>,
    Json(create): Json<PlayerCreate>,
) -> Result<(StatusCode, Json<PlayerResponse>)> {
    let mut repo = Players::new(state.store.as_ref());
    let player = repo.create(&create).await?;
    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))))
}

#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "players",
    summary = "Get player",
    params(("id" = uuid::Uuid, Path, description = "Player ID")),
    responses(
        (status = 200, description = "Player details", body = PlayerResponse),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_player(State(state): State<AppState>, Path(id): Path<PlayerId>) -> Result<Json<PlayerResponse>> {
    let mut repo = Players::new(state.store.as_ref());
    match repo.get_by_id(id).await? {
        Some(player) => Ok(Json(PlayerResponse::from(player))),
        None => Err(Error::not_found(Resource::Players, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/players/{id}",
    tag = "players",
    summary = "Update player",
    params(("id" = uuid::Uuid, Path, description = "Player ID")),
    request_body = PlayerUpdate,
    responses(
        (status = 200, description = "Player updated successfully", body = PlayerResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Json(update): Json<PlayerUpdate>,
) -> Result<Json<PlayerResponse>> {
    let mut repo = Players::new(state.store.as_ref());
    let player = repo
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Players, id))?;
    Ok(Json(PlayerResponse::from(player)))
}

#[utoipa::path(
    delete,
    path = "/players/{id}",
    tag = "players",
    summary = "Delete player",
    params(("id" = uuid::Uuid, Path, description = "Player ID")),
    responses(
        (status = 204, description = "Player deleted successfully"),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_player(State(state): State<AppState>, Path(id): Path<PlayerId>) -> Result<StatusCode> {
    let mut repo = Players::new(state.store.as_ref());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Players, id))
    }
}

/// Resolve the page for a player's sub-resource, failing if the player does not exist.
async fn player_page(state: &AppState, id: PlayerId, pagination: &Pagination) -> Result<DocumentFilter> {
    let mut repo = Players::new(state.store.as_ref());
    if repo.get_by_id(id).await?.is_none() {
        return Err(Error::not_found(Resource::Players, id));
    }
    Ok(pagination.filter(&state.config.pagination, Filter::new()))
}

#[utoipa::path(
    get,
    path = "/players/{id}/contracts",
    tag = "players",
    summary = "List a player's contracts",
    params(("id" = uuid::Uuid, Path, description = "Player ID"), Pagination),
    responses(
        (status = 200, description = "Paginated list of contracts", body = PaginatedResponse<ContractResponse>),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_player_contracts(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<ContractResponse>>> {
    let page = player_page(&state, id, &pagination).await?;
    let (skip, limit) = (page.skip, page.limit);
    let (contracts, total) = Players::new(state.store.as_ref()).contracts_for(id, page).await?;

    Ok(Json(PaginatedResponse::new(
        contracts.into_iter().map(ContractResponse::from).collect(),
        total,
        skip,
        limit,
    )))
}

#[utoipa::path(
    get,
    path = "/players/{id}/stats",
    tag = "players",
    summary = "List a player's statistics",
    params(("id" = uuid::Uuid, Path, description = "Player ID"), Pagination),
    responses(
        (status = 200, description = "Paginated list of statistics lines", body = PaginatedResponse<PlayerStatsResponse>),
        (status = 404, description = "Player not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_player_stats(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<PlayerStatsResponse>>> {
    let page = player_page(&state, id, &pagination).await?;
    let (skip, limit) = (page.skip, page.limit);
    let (stats, total) = Players::new(state.store.as_ref()).stats_for(id, page).await?;

    Ok(Json(PaginatedResponse::new(
        stats.into_iter().map(PlayerStatsResponse::from).collect(),
        total,
        skip,
        limit,
    )))
}

#[cfg(test)]
mod tests {
    use crate::api::models::contracts::ContractResponse;
    use crate::api::models::pagination::PaginatedResponse;
    use crate::api::models::players::PlayerResponse;
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn salah() -> Value {
        json!({
            "name": "Mohamed Salah",
            "position": "forward",
            "nationality": "Egypt",
            "date_of_birth": "1992-06-15",
            "shirt_number": 11
        })
    }

    #[test_log::test(tokio::test)]
    async fn test_player_crud() {
        let server = create_test_app().await;

        let response = server.post("/api/v1/players").json(&salah()).await;
        response.assert_status(StatusCode::CREATED);
        let player: PlayerResponse = response.json();
        assert!(player.active);

        let response = server.get(&format!("/api/v1/players/{}", player.id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<PlayerResponse>().name, "Mohamed Salah");

        let response = server
            .patch(&format!("/api/v1/players/{}", player.id))
            .json(&json!({"shirt_number": 10}))
            .await;
        response.assert_status_ok();
        let updated: PlayerResponse = response.json();
        assert_eq!(updated.shirt_number, Some(10));
        assert_eq!(updated.nationality, "Egypt");

        server
            .delete(&format!("/api/v1/players/{}", player.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/players/{}", player.id))
            .await
            .assert_status_not_found();
        server
            .delete(&format!("/api/v1/players/{}", player.id))
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_validation_errors_list_fields() {
        let server = create_test_app().await;

        let mut body = salah();
        body["shirt_number"] = json!(0);
        body["name"] = json!("");
        let response = server.post("/api/v1/players").json(&body).await;
        response.assert_status_bad_request();

        let error: Value = response.json();
        assert_eq!(error["message"], "Validation failed");
        assert_eq!(error["errors"][0]["field"], "name");
        assert_eq!(error["errors"][1]["field"], "shirt_number");

        let response = server
            .patch(&format!("/api/v1/players/{}", uuid::Uuid::new_v4()))
            .json(&json!({"shirt_number": 10}))
            .await;
        response.assert_status_not_found();
        assert!(response.text().starts_with("Player with ID"));
    }

    #[test_log::test(tokio::test)]
    async fn test_list_filters_sorting_and_pagination() {
        let server = create_test_app().await;
        for (name, position, active) in [
            ("Alisson", "goalkeeper", true),
            ("Salah", "forward", true),
            ("Nunez", "forward", false),
            ("Diaz", "forward", true),
        ] {
            let mut body = salah();
            body["name"] = json!(name);
            body["position"] = json!(position);
            body["active"] = json!(active);
            server.post("/api/v1/players").json(&body).await.assert_status(StatusCode::CREATED);
        }

        let page: PaginatedResponse<PlayerResponse> = server
            .get("/api/v1/players?position=forward&sort=-name&limit=2")
            .await
            .json();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.limit, 2);
        let names: Vec<&str> = page.data.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Salah", "Nunez"]);

        let page: PaginatedResponse<PlayerResponse> = server.get("/api/v1/players?active=false").await.json();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.data[0].name, "Nunez");

        let page: PaginatedResponse<PlayerResponse> = server.get("/api/v1/players?search=LIS&skip=0").await.json();
        assert_eq!(page.data.len(), 1);

        let response = server.get("/api/v1/players?sort=salary").await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["message"], "cannot sort players by 'salary'");
    }

    #[test_log::test(tokio::test)]
    async fn test_player_contracts_sub_resource() {
        let server = create_test_app().await;
        let player: PlayerResponse = server.post("/api/v1/players").json(&salah()).await.json();

        server
            .post("/api/v1/contracts")
            .json(&json!({
                "player_id": player.id,
                "start_date": "2023-07-01",
                "end_date": "2025-06-30",
                "weekly_wage": 350000.0,
                "release_clause": 150000000.0
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let page: PaginatedResponse<ContractResponse> = server
            .get(&format!("/api/v1/players/{}/contracts", player.id))
            .await
            .json();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.data[0].player_id, player.id);

        let response = server.get(&format!("/api/v1/players/{}/stats", player.id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["total_count"], 0);

        server
            .get(&format!("/api/v1/players/{}/contracts", uuid::Uuid::new_v4()))
            .await
            .assert_status_not_found();
    }
}
