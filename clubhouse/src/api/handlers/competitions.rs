use crate::api::models::competitions::{CompetitionCreate, CompetitionResponse, CompetitionUpdate, ListCompetitionsQuery};
use crate::api::models::pagination::{PaginatedResponse, Pagination};
use crate::api::models::trophies::TrophyResponse;
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::{Competitions, Repository};
use crate::errors::{Error, Result};
use crate::types::{CompetitionId, Resource};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/competitions",
    tag = "competitions",
    summary = "List competitions",
    params(ListCompetitionsQuery),
    responses(
        (status = 200, description = "Paginated list of competitions", body = PaginatedResponse<CompetitionResponse>),
        (status = 400, description = "Unknown sort field"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(query): Query<ListCompetitionsQuery>,
) -> Result<Json<PaginatedResponse<CompetitionResponse>>> {
    let mut conditions = Filter::new();
    if let Some(search) = query.search.filter(|s| !s.trim().is_empty()) {
        conditions.push("name", Comparison::Like(search.trim().to_string()));
    }
    if let Some(kind) = query.kind {
        conditions = conditions.eq("kind", json!(kind));
    }
    if let Some(country) = query.country {
        conditions = conditions.eq("country", country);
    }

    let filter = query.pagination.filter(&state.config.pagination, conditions);
    let (competitions, total) = Competitions::new(state.store.as_ref()).page(&filter).await?;

    Ok(Json(PaginatedResponse::new(
        competitions.into_iter().map(CompetitionResponse::from).collect(),
        total,
        filter.skip,
        filter.limit,
    )))
}

#[utoipa::path(
    post,
    path = "/competitions",
    tag = "competitions",
    summary = "Create competition",
    request_body = CompetitionCreate,
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "A competition with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_competition(
    State(state): State<AppState>,
    Json(create): Json<CompetitionCreate>,
) -> Result<(StatusCode, Json<CompetitionResponse>)> {
    let competition = Competitions::new(state.store.as_ref()).create(&create).await?;
    Ok((StatusCode::CREATED, Json(CompetitionResponse::from(competition))))
}

#[utoipa::path(
    get,
    path = "/competitions/{id}",
    tag = "competitions",
    summary = "Get competition",
    params(("id" = uuid::Uuid, Path, description = "Competition ID")),
    responses(
        (status = 200, description = "Competition details", body = CompetitionResponse),
        (status = 404, description = "Competition not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_competition(
    State(state): State<AppState>,
    Path(id): Path<CompetitionId>,
) -> Result<Json<CompetitionResponse>> {
    match Competitions::new(state.store.as_ref()).get_by_id(id).await? {
        Some(competition) => Ok(Json(CompetitionResponse::from(competition))),
        None => Err(Error::not_found(Resource::Competitions, id)),
    }
}

#[utoipa::path(
    patch,
    path = "/competitions/{id}",
    tag = "competitions",
    summary = "Update competition",
    params(("id" = uuid::Uuid, Path, description = "Competition ID")),
    request_body = CompetitionUpdate,
    responses(
        (status = 200, description = "Competition updated successfully", body = CompetitionResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "A competition with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_competition(
    State(state): State<AppState>,
    Path(id): Path<CompetitionId>,
    Json(update): Json<CompetitionUpdate>,
) -> Result<Json<CompetitionResponse>> {
    let competition = Competitions::new(state.store.as_ref())
        .update(id, &update)
        .await
        .map_err(Error::in_resource(Resource::Competitions, id))?;
    Ok(Json(CompetitionResponse::from(competition)))
}

#[utoipa::path(
    delete,
    path = "/competitions/{id}",
    tag = "competitions",
    summary = "Delete competition",
    params(("id" = uuid::Uuid, Path, description = "Competition ID")),
    responses(
        (status = 204, description = "Competition deleted successfully"),
        (status = 404, description = "Competition not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_competition(State(state): State<AppState>, Path(id): Path<CompetitionId>) -> Result<StatusCode> {
    if Competitions::new(state.store.as_ref()).delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Resource::Competitions, id))
    }
}

#[utoipa::path(
    get,
    path = "/competitions/{id}/trophies",
    tag = "competitions",
    summary = "List trophies won in a competition",
    params(("id" = uuid::Uuid, Path, description = "Competition ID"), Pagination),
    responses(
        (status = 200, description = "Paginated list of trophies", body = PaginatedResponse<TrophyResponse>),
        (status = 404, description = "Competition not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_competition_trophies(
    State(state): State<AppState>,
    Path(id): Path<CompetitionId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<TrophyResponse>>> {
    let mut repo = Competitions::new(state.store.as_ref());
    if repo.get_by_id(id).await?.is_none() {
        return Err(Error::not_found(Resource::Competitions, id));
    }

    let page = pagination.filter(&state.config.pagination, Filter::new());
    let (skip, limit) = (page.skip, page.limit);
    let (trophies, total) = repo.trophies_for(id, page).await?;

    Ok(Json(PaginatedResponse::new(
        trophies.into_iter().map(TrophyResponse::from).collect(),
        total,
        skip,
        limit,
    )))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_competition_trophies() {
        let server = create_test_app().await;

        let league: Value = server
            .post("/api/v1/competitions")
            .json(&json!({"name": "Premier League", "kind": "league", "country": "England"}))
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

        let response = server
            .post("/api/v1/trophies")
            .json(&json!({
                "name": "Premier League Trophy",
                "competition_id": league["id"],
                "season_id": season["id"],
                "won_on": "2025-05-25"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let path = format!("/api/v1/competitions/{}/trophies", league["id"].as_str().unwrap());
        let page: Value = server.get(&path).await.json();
        assert_eq!(page["total_count"], 1);
        assert_eq!(page["data"][0]["name"], "Premier League Trophy");

        let page: Value = server.get("/api/v1/competitions?kind=domestic_cup").await.json();
        assert_eq!(page["total_count"], 0);
    }
}
