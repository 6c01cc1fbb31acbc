//! OpenAPI documentation for the REST API at `/api/v1/*`.
//!
//! The document is served as JSON at `/api-docs/openapi.json` and rendered by Scalar at
//! `/docs`. Paths are declared relative to the API base; [`ServerAddon`] adds the base as
//! the document's server so "try it" requests land on the right prefix.

use utoipa::{
    Modify, OpenApi,
    openapi::{Server, ServerBuilder},
};

use crate::api::{handlers, models};
use crate::validation::FieldError;

pub const API_BASE: &str = "/api/v1";

struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let server: Server = ServerBuilder::new()
            .url(API_BASE)
            .description(Some("This server"))
            .build();
        openapi.servers = Some(vec![server]);
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ServerAddon),
    paths(
        handlers::players::list_players,
        handlers::players::create_player,
        handlers::players::get_player,
        handlers::players::update_player,
        handlers::players::delete_player,
        handlers::players::list_player_contracts,
        handlers::players::list_player_stats,
        handlers::managers::list_managers,
        handlers::managers::create_manager,
        handlers::managers::get_manager,
        handlers::managers::update_manager,
        handlers::managers::delete_manager,
        handlers::stadiums::list_stadiums,
        handlers::stadiums::create_stadium,
        handlers::stadiums::get_stadium,
        handlers::stadiums::update_stadium,
        handlers::stadiums::delete_stadium,
        handlers::competitions::list_competitions,
        handlers::competitions::create_competition,
        handlers::competitions::get_competition,
        handlers::competitions::update_competition,
        handlers::competitions::delete_competition,
        handlers::competitions::list_competition_trophies,
        handlers::seasons::list_seasons,
        handlers::seasons::create_season,
        handlers::seasons::get_season,
        handlers::seasons::update_season,
        handlers::seasons::delete_season,
        handlers::seasons::list_season_matches,
        handlers::contracts::list_contracts,
        handlers::contracts::create_contract,
        handlers::contracts::get_contract,
        handlers::contracts::update_contract,
        handlers::contracts::delete_contract,
        handlers::trophies::list_trophies,
        handlers::trophies::create_trophy,
        handlers::trophies::get_trophy,
        handlers::trophies::update_trophy,
        handlers::trophies::delete_trophy,
        handlers::player_stats::list_player_stats,
        handlers::player_stats::create_player_stats,
        handlers::player_stats::get_player_stats,
        handlers::player_stats::update_player_stats,
        handlers::player_stats::delete_player_stats,
        handlers::matches::list_matches,
        handlers::matches::create_match,
        handlers::matches::get_match,
        handlers::matches::update_match,
        handlers::matches::delete_match,
    ),
    components(schemas(
        models::players::Position,
        models::players::PlayerCreate,
        models::players::PlayerUpdate,
        models::players::PlayerResponse,
        models::managers::ManagerCreate,
        models::managers::ManagerUpdate,
        models::managers::ManagerResponse,
        models::stadiums::Surface,
        models::stadiums::StadiumCreate,
        models::stadiums::StadiumUpdate,
        models::stadiums::StadiumResponse,
        models::competitions::CompetitionKind,
        models::competitions::CompetitionCreate,
        models::competitions::CompetitionUpdate,
        models::competitions::CompetitionResponse,
        models::seasons::SeasonCreate,
        models::seasons::SeasonUpdate,
        models::seasons::SeasonResponse,
        models::contracts::ContractCreate,
        models::contracts::ContractUpdate,
        models::contracts::ContractResponse,
        models::trophies::TrophyCreate,
        models::trophies::TrophyUpdate,
        models::trophies::TrophyResponse,
        models::player_stats::PlayerStatsCreate,
        models::player_stats::PlayerStatsUpdate,
        models::player_stats::PlayerStatsResponse,
        models::matches::Venue,
        models::matches::Side,
        models::matches::MatchResult,
        models::matches::Goal,
        models::matches::Score,
        models::matches::MatchCreate,
        models::matches::MatchUpdate,
        models::matches::MatchResponse,
        FieldError,
    )),
    tags(
        (name = "players", description = "Squad members, with their contracts and season statistics as sub-resources."),
        (name = "managers", description = "Current and former managers."),
        (name = "stadiums", description = "Grounds where matches are played."),
        (name = "competitions", description = "Leagues and cups the club enters, with trophies won as a sub-resource."),
        (name = "seasons", description = "Seasons and the competitions contested in them, with matches as a sub-resource."),
        (name = "contracts", description = "Player contracts. Wages and release clauses are decimal amounts."),
        (name = "trophies", description = "Trophies won, each tied to a competition and season."),
        (name = "player-stats", description = "Per-season statistics, either for one competition or totals across the season."),
        (name = "matches", description = "Fixtures with lineups and goals.

The `score` and `result` of a match are derived from its goals and are read-only."),
    ),
    info(
        title = "Clubhouse API",
        version = "1.0.0",
        description = "REST API for a football club's players, staff, competitions and results.

## Pagination

List endpoints take `skip` and `limit` and return `{data, total_count, skip, limit}`. Sort with
`sort=field` or `sort=-field` for descending order.

## Errors

Field validation failures return `400` with a `message` and the failed rules in `errors`:

```json
{
  \"message\": \"Validation failed\",
  \"errors\": [{\"field\": \"name\", \"message\": \"must be between 1 and 100 characters\"}]
}
```

Unique violations return `409` with the conflicting `resource`.",
    ),
)]
pub struct ApiDoc;
