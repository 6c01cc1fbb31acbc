use crate::api::models::matches::{ListMatchesQuery, MatchCreate, MatchResponse, MatchUpdate};
use crate::api::models::pagination::PaginatedResponse;
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{Matches, Repository};
use crate::errors::{Error, Result};
use crate::types::{MatchId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    summary = "List matches",
    params(ListMatchesQuery),
    responses(
        (status = 200, description = "Paginated list of matches", body = PaginatedResponse<MatchResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<PaginatedResponse<MatchResponse>>> {
    let mut conditions = Filter::new();
    if let Some(competition_id) = query.competition_id {
        conditions = conditions.eq("competition_id", competition_id.to_string());
    }
    if let Some(season_id) = query.season_id {
        conditions = conditions.eq("season_id", season_id.to_string());
    }
    if let Some(opponent) = query.opponent.filter(|s| !s.trim().is_empty()) {
        conditions.push("opponent", Comparison::Like(opponent.trim().to_string()));
    }
    if let Some(venue) = query.venue {
        conditions = conditions.eq("venue", json!(venue));
    }
    if let Some(result) = query.result {
        conditions = conditions.eq("result", json!(result));
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (matches, total) = Matches::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        matches.into_iter().map(MatchResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    summary = "Create match",
    description = "The score and result are derived from the goal list; any client-supplied score is ignored.",
    request_body = MatchCreate,
    responses(
        (status = 201, description = "Match created successfully", body = MatchResponse),
        (status = 400, description = "Validation failed, unknown reference or inconsistent match"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_match(
    State(state): State<AppState>,
    Json(create): Json<MatchCreate>,
) -> Result<(StatusCode, Json<MatchResponse>)> {
    let created = Matches::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(MatchResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    summary = "Get match",
    params(("id" = uuid::Uuid, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match details", body = MatchResponse),
        (status = 404, description = "Match not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_match(State(state): State<AppState>, Path(id): Path<MatchId>) -> Result<Json<MatchResponse>> {
    match Matches::new(state.store.as_ref()).get_by_id(id).await? {
        Some(found) => Ok(Json(MatchResponse::from(found))),
        None => Err(Error::not_found(Resource::Matches, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/matches/{id}",
    tag = "matches",
    summary = "Update match",
    description = "Every consistency check runs again against the patched match, and the score is re-derived.",
    params(("id" = uuid::Uuid, Path, description = "Match ID")),
    request_body = MatchUpdate,
    responses(
        (status = 200, description = "Match updated successfully", body = MatchResponse),
        (status = 400, description = "Validation failed, unknown reference or inconsistent match"),
        (status = 404, description = "Match not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
    Json(update): Json<MatchUpdate>,
) -> Result<Json<MatchResponse>> {
    let updated = Matches::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Matches, id))?;
    Ok(Json(MatchResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/matches/{id}",
    tag = "matches",
    summary = "Delete match",
    params(("id" = uuid::Uuid, Path, description = "Match ID")),
    responses(
        (status = 204, description = "Match deleted successfully"),
        (status = 404, description = "Match not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_match(State(state): State<AppState>, Path(id): Path<MatchId>) -> Result<StatusCode> {
    if Matches::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Matches, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    struct Setup {
        league: Value,
        season: Value,
        players: Vec<Value>,
    }

    async fn setup(server: &TestServer) -> Setup {
        let league: Value = server
            .post("/api/v1/competitions")
            .json(&json!({"name": "Premier League", "kind": "league"}))
            .await
            .json();
        let season: Value = server
            .post("/api/v1/seasons")
            .json(&json!({
                "name": "2024/25",
                "start_year": 2024,
                "end_year": 2025,
                "competition_ids": [league["id"]]
            }))
            .await
            .json();

        let mut players = Vec::new();
        for name in ["Alisson", "Van Dijk", "Salah"] {
            let player: Value = server
                .post("/api/v1/players")
                .json(&json!({
                    "name": name,
                    "position": "forward",
                    "nationality": "Egypt",
                    "date_of_birth": "1992-06-15"
                }))
                .await
                .json();
            players.push(player["id"].clone());
        }

        Setup { league, season, players }
    }

    fn match_body(setup: &Setup) -> Value {
        json!({
            "competition_id": setup.league["id"],
            "season_id": setup.season["id"],
            "opponent": "Manchester City",
            "kickoff": "2024-12-01T16:00:00Z",
            "venue": "home",
            "lineup": [setup.players[0], setup.players[1]],
            "substitutes": [setup.players[2]],
            "goals": [
                {"minute": 12, "side": "club", "scorer_id": setup.players[2], "assist_id": setup.players[1]},
                {"minute": 78, "side": "club", "scorer_id": setup.players[1]}
            ],
            // Ignored: the score always comes from the goals
            "score": {"club": 0, "opponent": 5}
        })
    }

    #[test_log::test(tokio::test)]
    async fn test_match_score_is_derived() {
        let server = create_test_app().await;
        let setup = setup(&server).await;

        let response = server.post("/api/v1/matches").json(&match_body(&setup)).await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["score"], json!({"club": 2, "opponent": 0}));
        assert_eq!(created["result"], "win");

        let path = format!("/api/v1/matches/{}", created["id"].as_str().unwrap());
        let response = server
            .patch(&path)
            .json(&json!({"goals": [{"minute": 90, "side": "opponent"}]}))
            .await;
        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["result"], "loss");
        assert_eq!(updated["opponent"], "Manchester City");

        let page: Value = server.get("/api/v1/matches?result=loss&venue=home").await.json();
        assert_eq!(page["total_count"], 1);

        let path = format!("/api/v1/seasons/{}/matches", setup.season["id"].as_str().unwrap());
        let page: Value = server.get(&path).await.json();
        assert_eq!(page["data"][0]["id"], created["id"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_inconsistent_matches_are_rejected() {
        let server = create_test_app().await;
        let setup = setup(&server).await;

        let mut body = match_body(&setup);
        body["kickoff"] = json!("2027-01-01T15:00:00Z");
        let response = server.post("/api/v1/matches").json(&body).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["message"],
            "kickoff year 2027 is outside season years 2024-2025"
        );

        let mut body = match_body(&setup);
        body["substitutes"] = json!([setup.players[0]]);
        let response = server.post("/api/v1/matches").json(&body).await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["message"].as_str().unwrap().contains("more than once"));

        let mut body = match_body(&setup);
        body["goals"] = json!([{"minute": 5, "side": "opponent", "scorer_id": setup.players[0]}]);
        server.post("/api/v1/matches").json(&body).await.assert_status_bad_request();

        let mut body = match_body(&setup);
        body["lineup"] = json!([]);
        let response = server.post("/api/v1/matches").json(&body).await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["errors"][0]["field"], "lineup");

        assert_eq!(
            server.get("/api/v1/matches").await.json::<Value>()["total_count"],
            0
        );
    }
}
