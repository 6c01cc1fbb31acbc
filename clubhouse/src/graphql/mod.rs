//! GraphQL front end.
//!
//! `POST /graphql` executes queries against [`ClubSchema`]; `GET /graphql` serves the
//! GraphiQL playground when it is enabled in configuration. Resolvers share the REST
//! layer's models and repositories, so both front ends accept and return the same shapes
//! and enforce the same rules.
//!
//! - [`query`]: `player(id)`, `players(filter, sort, skip, limit)`, `playerCount(filter)` and
//!   the same trio for every other entity
//! - [`mutation`]: `createX`, `updateX` and `deleteX` for every entity
//! - [`objects`]: relationship fields such as `Match.lineupPlayers`
//! - [`filters`] and [`inputs`]: operator inputs and per-entity filters
//!
//! Errors carry `extensions.code` (`BAD_REQUEST`, `NOT_FOUND`, `CONFLICT`,
//! `VALIDATION_FAILED` or `INTERNAL`); field validation failures also carry
//! `extensions.fields`.

pub mod filters;
pub mod inputs;
pub mod mutation;
pub mod objects;
pub mod query;
pub mod resolvers;

use crate::config::Config;
use crate::db::store::Store;
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema, extensions::Tracing};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type ClubSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the schema with the store and pagination limits injected as context data.
pub fn build_schema(store: Store, config: &Config) -> ClubSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(config.pagination.clone())
        .limit_depth(config.graphql.max_depth)
        .limit_complexity(config.graphql.max_complexity)
        .extension(Tracing)
        .finish()
}

pub async fn graphql_handler(State(schema): State<ClubSchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Routes for `/graphql`, or `None` when GraphQL is disabled.
pub fn router(store: Store, config: &Config) -> Option<Router> {
    if !config.graphql.enabled {
        return None;
    }

    let schema = build_schema(store, config);
    let route = if config.graphql.playground {
        get(graphiql).post(graphql_handler)
    } else {
        post(graphql_handler)
    };
    Some(Router::new().route(GRAPHQL_PATH, route).with_state(schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, create_test_app_with_config, create_test_config, memory_store};
    use async_graphql::{Request, Variables};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    async fn schema() -> ClubSchema {
        build_schema(memory_store().await, &create_test_config())
    }

    async fn run(schema: &ClubSchema, query: &str, variables: Value) -> Value {
        let request = Request::new(query).variables(Variables::from_json(variables));
        serde_json::to_value(schema.execute(request).await).unwrap()
    }

    async fn create_competition(schema: &ClubSchema, name: &str) -> String {
        let response = run(
            schema,
            "mutation($input: CreateCompetitionInput!) { createCompetition(input: $input) { id } }",
            json!({"input": {"name": name, "kind": "LEAGUE"}}),
        )
        .await;
        response["data"]["createCompetition"]["id"].as_str().unwrap().to_string()
    }

    async fn create_player(schema: &ClubSchema, name: &str, position: &str, shirt: u32) -> String {
        let response = run(
            schema,
            "mutation($input: CreatePlayerInput!) { createPlayer(input: $input) { id active } }",
            json!({"input": {
                "name": name,
                "position": position,
                "nationality": "Brazil",
                "dateOfBirth": "1992-10-02",
                "shirtNumber": shirt
            }}),
        )
        .await;
        assert_eq!(response["data"]["createPlayer"]["active"], true, "{response}");
        response["data"]["createPlayer"]["id"].as_str().unwrap().to_string()
    }

    #[test_log::test(tokio::test)]
    async fn test_player_filters_sort_and_count() {
        let schema = schema().await;
        create_player(&schema, "Alisson Becker", "GOALKEEPER", 1).await;
        create_player(&schema, "Virgil van Dijk", "DEFENDER", 4).await;
        create_player(&schema, "Ibrahima Konate", "DEFENDER", 5).await;
        create_player(&schema, "Mohamed Salah", "FORWARD", 11).await;

        let response = run(
            &schema,
            r#"query($filter: PlayerFilter) {
                players(filter: $filter, sort: {field: "shirt_number", direction: DESC}) { name shirtNumber }
                playerCount(filter: $filter)
            }"#,
            json!({"filter": {
                "position": {"in": ["DEFENDER", "GOALKEEPER"]},
                "shirtNumber": {"gte": 2}
            }}),
        )
        .await;

        assert_eq!(response["data"]["playerCount"], 2, "{response}");
        assert_eq!(response["data"]["players"][0]["name"], "Ibrahima Konate");
        assert_eq!(response["data"]["players"][1]["name"], "Virgil van Dijk");

        let response = run(
            &schema,
            r#"{ players(filter: {name: {contains: "SALAH"}}, limit: 1) { shirtNumber } }"#,
            json!({}),
        )
        .await;
        assert_eq!(response["data"]["players"], json!([{"shirtNumber": 11}]));
    }

    #[test_log::test(tokio::test)]
    async fn test_range_filters() {
        let schema = schema().await;
        let keeper = create_player(&schema, "Alisson Becker", "GOALKEEPER", 1).await;
        create_player(&schema, "Darwin Nunez", "FORWARD", 19).await;
        let response = run(
            &schema,
            "mutation($input: CreatePlayerInput!) { createPlayer(input: $input) { id } }",
            json!({"input": {
                "name": "Ryan Gravenberch",
                "position": "MIDFIELDER",
                "nationality": "Netherlands",
                "dateOfBirth": "2002-05-16",
                "shirtNumber": 8
            }}),
        )
        .await;
        assert!(response["errors"].is_null(), "{response}");

        let response = run(
            &schema,
            r#"{ players(filter: {dateOfBirth: {lt: "2000-01-01"}, shirtNumber: {gte: 1, lte: 11}}) { name } }"#,
            json!({}),
        )
        .await;
        assert_eq!(response["data"]["players"], json!([{"name": "Alisson Becker"}]), "{response}");

        let response = run(
            &schema,
            "mutation($input: CreateContractInput!) { createContract(input: $input) { id } }",
            json!({"input": {
                "playerId": keeper,
                "startDate": "2023-07-01",
                "endDate": "2027-06-30",
                "weeklyWage": "350000"
            }}),
        )
        .await;
        assert!(response["errors"].is_null(), "{response}");

        let response = run(
            &schema,
            "{ rich: contractCount(filter: {weeklyWage: {gte: 300000.5}}) cheap: contractCount(filter: {weeklyWage: {lt: 1000.0}}) }",
            json!({}),
        )
        .await;
        assert_eq!(response["data"], json!({"rich": 1, "cheap": 0}), "{response}");

        let league = create_competition(&schema, "Premier League").await;
        let response = run(
            &schema,
            "mutation($input: CreateSeasonInput!) { createSeason(input: $input) { id } }",
            json!({"input": {"name": "2024/25", "startYear": 2024, "endYear": 2025, "competitionIds": [league]}}),
        )
        .await;
        let season = response["data"]["createSeason"]["id"].as_str().unwrap().to_string();

        for (opponent, kickoff) in [("Wolves", "2025-02-12T19:30:00.500Z"), ("Everton", "2025-02-12T19:30:00Z")] {
            let response = run(
                &schema,
                "mutation($input: CreateMatchInput!) { createMatch(input: $input) { id } }",
                json!({"input": {
                    "competitionId": league,
                    "seasonId": season,
                    "opponent": opponent,
                    "kickoff": kickoff,
                    "venue": "HOME",
                    "lineup": [keeper],
                    "substitutes": [],
                    "goals": []
                }}),
            )
            .await;
            assert!(response["errors"].is_null(), "{response}");
        }

        // Half a second after the whole-second kickoff still counts as later
        let response = run(
            &schema,
            r#"{
                later: matches(filter: {kickoff: {gt: "2025-02-12T19:30:00Z"}}) { opponent }
                upTo: matchCount(filter: {kickoff: {lte: "2025-02-12T19:30:00Z"}})
                ordered: matches(sort: {field: "kickoff"}) { opponent }
            }"#,
            json!({}),
        )
        .await;
        assert_eq!(response["data"]["later"], json!([{"opponent": "Wolves"}]), "{response}");
        assert_eq!(response["data"]["upTo"], 1);
        assert_eq!(
            response["data"]["ordered"],
            json!([{"opponent": "Everton"}, {"opponent": "Wolves"}])
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_errors_carry_codes() {
        let schema = schema().await;
        create_competition(&schema, "Premier League").await;

        let response = run(
            &schema,
            r#"mutation { createCompetition(input: {name: "Premier League", kind: LEAGUE}) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "CONFLICT");

        let response = run(
            &schema,
            r#"mutation { createPlayer(input: {name: "", position: FORWARD, nationality: "Egypt", dateOfBirth: "1992-06-15"}) { id } }"#,
            json!({}),
        )
        .await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "VALIDATION_FAILED");
        assert_eq!(response["errors"][0]["extensions"]["fields"][0]["field"], "name");

        let response = run(
            &schema,
            "mutation($id: UUID!) { updateStadium(id: $id, input: {capacity: 100}) { id } }",
            json!({"id": uuid::Uuid::new_v4()}),
        )
        .await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");

        let response = run(&schema, r#"{ players(sort: {field: "secret"}) { id } }"#, json!({})).await;
        assert_eq!(response["errors"][0]["extensions"]["code"], "BAD_REQUEST");

        let response = run(
            &schema,
            "mutation($id: UUID!) { deleteManager(id: $id) }",
            json!({"id": uuid::Uuid::new_v4()}),
        )
        .await;
        assert_eq!(response["data"]["deleteManager"], false);
    }

    #[test_log::test(tokio::test)]
    async fn test_match_relationships() {
        let schema = schema().await;
        let league = create_competition(&schema, "Premier League").await;
        let keeper = create_player(&schema, "Alisson Becker", "GOALKEEPER", 1).await;
        let striker = create_player(&schema, "Darwin Nunez", "FORWARD", 9).await;

        let response = run(
            &schema,
            "mutation($input: CreateSeasonInput!) { createSeason(input: $input) { id competitions { name } } }",
            json!({"input": {"name": "2024/25", "startYear": 2024, "endYear": 2025, "competitionIds": [league]}}),
        )
        .await;
        assert_eq!(response["data"]["createSeason"]["competitions"][0]["name"], "Premier League");
        let season = response["data"]["createSeason"]["id"].as_str().unwrap().to_string();

        let response = run(
            &schema,
            r#"mutation($input: CreateMatchInput!) {
                createMatch(input: $input) {
                    result
                    score { club opponent }
                    season { name }
                    stadium { name }
                    lineupPlayers { name }
                    substitutePlayers { name }
                }
            }"#,
            json!({"input": {
                "competitionId": league,
                "seasonId": season,
                "opponent": "Brentford",
                "kickoff": "2025-01-18T15:00:00Z",
                "venue": "AWAY",
                "lineup": [keeper],
                "substitutes": [striker],
                "goals": [
                    {"minute": 91, "side": "CLUB", "scorerId": striker},
                    {"minute": 94, "side": "CLUB", "scorerId": striker}
                ]
            }}),
        )
        .await;

        let created = &response["data"]["createMatch"];
        assert_eq!(created["result"], "WIN", "{response}");
        assert_eq!(created["score"], json!({"club": 2, "opponent": 0}));
        assert_eq!(created["season"]["name"], "2024/25");
        assert_eq!(created["stadium"], Value::Null);
        assert_eq!(created["lineupPlayers"], json!([{"name": "Alisson Becker"}]));
        assert_eq!(created["substitutePlayers"], json!([{"name": "Darwin Nunez"}]));

        let response = run(
            &schema,
            r#"query($player: UUID!) {
                matchCount(filter: {substitutes: {eq: $player}, clubScore: {gte: 2}})
                competitions { seasons { matches { opponent } } }
            }"#,
            json!({"player": striker}),
        )
        .await;
        assert_eq!(response["data"]["matchCount"], 1);
        assert_eq!(
            response["data"]["competitions"][0]["seasons"][0]["matches"][0]["opponent"],
            "Brentford"
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_depth_limit() {
        let config = Config {
            graphql: crate::config::GraphqlConfig {
                max_depth: 3,
                ..Default::default()
            },
            ..create_test_config()
        };
        let schema = build_schema(memory_store().await, &config);

        let response = run(
            &schema,
            "{ contracts { player { contracts { player { name } } } } }",
            json!({}),
        )
        .await;
        assert!(response["errors"][0]["message"].as_str().unwrap().contains("too deep"));
    }

    #[test_log::test(tokio::test)]
    async fn test_http_endpoint() {
        let server = create_test_app().await;

        let response = server
            .post("/graphql")
            .json(&json!({"query": "{ stadiumCount }"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["stadiumCount"], 0);

        let playground = server.get("/graphql").await;
        playground.assert_status_ok();
        assert!(playground.text().contains("graphiql"));

        let config = Config {
            graphql: crate::config::GraphqlConfig {
                enabled: false,
                ..Default::default()
            },
            ..create_test_config()
        };
        let server = create_test_app_with_config(config).await;
        let response = server
            .post("/graphql")
            .json(&json!({"query": "{ stadiumCount }"}))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
