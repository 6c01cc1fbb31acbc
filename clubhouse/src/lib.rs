//! # clubhouse: data API for a football club
//!
//! `clubhouse` serves a football club's records (players, managers, stadiums, competitions,
//! seasons, contracts, trophies, per-season player statistics and matches) over two front
//! ends that share one set of rules: a REST API under `/api/v1` and a GraphQL endpoint at
//! `/graphql`.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! [async-graphql](https://github.com/async-graphql/async-graphql) for the GraphQL schema. Data
//! lives in a [`DocumentStore`](db::store::DocumentStore): MongoDB in production, or an
//! in-process memory store for development and tests.
//!
//! ### Request Flow
//!
//! REST handlers in [`api`] and GraphQL resolvers in [`graphql`] both go through the
//! repositories in [`db::handlers`]. A repository validates every field of a document, checks
//! the documents it references, derives computed fields (a match's score and result) and only
//! then writes to the store. Neither front end writes to the store directly, so a document
//! rejected over REST is rejected over GraphQL with the same field errors.
//!
//! ### Core Components
//!
//! - [`api`]: REST handlers and request/response models
//! - [`graphql`]: schema, filter inputs and relationship resolvers
//! - [`db`]: the store abstraction, both backends and the repositories
//! - [`validation`]: field rules and the match consistency checks
//! - [`seed`]: fixture data for development stores
//! - [`config`]: YAML and environment configuration
//! - [`telemetry`]: structured logging and optional OTLP export
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use clubhouse::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = clubhouse::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     clubhouse::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod graphql;
mod openapi;
pub mod seed;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::db::store::Store;
use crate::openapi::{API_BASE, ApiDoc};
use api::handlers;
use axum::{
    Json, Router,
    extract::State,
    http::{self, HeaderValue, Method, StatusCode},
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{CompetitionId, ContractId, ManagerId, MatchId, PlayerId, PlayerStatsId, SeasonId, StadiumId, TrophyId};

/// Application state shared across all REST handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .store(store)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
}

/// Connect to the configured store and seed it when enabled.
#[instrument(skip_all)]
async fn setup_store(config: &Config) -> anyhow::Result<Store> {
    let store = db::connect(&config.database).await?;

    if config.seed.enabled {
        match seed::seed_store(store.as_ref()).await? {
            Some(report) => info!(players = report.players, "Seeded fixture data"),
            None => debug!("Seeding skipped"),
        }
    }

    Ok(store)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let allow_origin = if cors_config
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard))
    {
        if cors_config.allow_credentials {
            anyhow::bail!("CORS credentials cannot be combined with a wildcard origin");
        }
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Url serialises bare origins with a trailing slash browsers never send
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(cors_config.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Liveness and store reachability.
async fn healthz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "store unavailable")
        }
    }
}

fn api_routes(state: &AppState) -> Router {
    Router::new()
        // Players, with contracts and statistics as sub-resources
        .route(
            "/players",
            get(handlers::players::list_players).post(handlers::players::create_player),
        )
        .route(
            "/players/{id}",
            get(handlers::players::get_player)
                .patch(handlers::players::update_player)
                .delete(handlers::players::delete_player),
        )
        .route("/players/{id}/contracts", get(handlers::players::list_player_contracts))
        .route("/players/{id}/stats", get(handlers::players::list_player_stats))
        .route(
            "/managers",
            get(handlers::managers::list_managers).post(handlers::managers::create_manager),
        )
        .route(
            "/managers/{id}",
            get(handlers::managers::get_manager)
                .patch(handlers::managers::update_manager)
                .delete(handlers::managers::delete_manager),
        )
        .route(
            "/stadiums",
            get(handlers::stadiums::list_stadiums).post(handlers::stadiums::create_stadium),
        )
        .route(
            "/stadiums/{id}",
            get(handlers::stadiums::get_stadium)
                .patch(handlers::stadiums::update_stadium)
                .delete(handlers::stadiums::delete_stadium),
        )
        .route(
            "/competitions",
            get(handlers::competitions::list_competitions).post(handlers::competitions::create_competition),
        )
        .route(
            "/competitions/{id}",
            get(handlers::competitions::get_competition)
                .patch(handlers::competitions::update_competition)
                .delete(handlers::competitions::delete_competition),
        )
        .route(
            "/competitions/{id}/trophies",
            get(handlers::competitions::list_competition_trophies),
        )
        .route(
            "/seasons",
            get(handlers::seasons::list_seasons).post(handlers::seasons::create_season),
        )
        .route(
            "/seasons/{id}",
            get(handlers::seasons::get_season)
                .patch(handlers::seasons::update_season)
                .delete(handlers::seasons::delete_season),
        )
        .route("/seasons/{id}/matches", get(handlers::seasons::list_season_matches))
        .route(
            "/contracts",
            get(handlers::contracts::list_contracts).post(handlers::contracts::create_contract),
        )
        .route(
            "/contracts/{id}",
            get(handlers::contracts::get_contract)
                .patch(handlers::contracts::update_contract)
                .delete(handlers::contracts::delete_contract),
        )
        .route(
            "/trophies",
            get(handlers::trophies::list_trophies).post(handlers::trophies::create_trophy),
        )
        .route(
            "/trophies/{id}",
            get(handlers::trophies::get_trophy)
                .patch(handlers::trophies::update_trophy)
                .delete(handlers::trophies::delete_trophy),
        )
        .route(
            "/player-stats",
            get(handlers::player_stats::list_player_stats).post(handlers::player_stats::create_player_stats),
        )
        .route(
            "/player-stats/{id}",
            get(handlers::player_stats::get_player_stats)
                .patch(handlers::player_stats::update_player_stats)
                .delete(handlers::player_stats::delete_player_stats),
        )
        .route(
            "/matches",
            get(handlers::matches::list_matches).post(handlers::matches::create_match),
        )
        .route(
            "/matches/{id}",
            get(handlers::matches::get_match)
                .patch(handlers::matches::update_match)
                .delete(handlers::matches::delete_match),
        )
        .with_state(state.clone())
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - REST routes under `/api/v1`
/// - The GraphQL endpoint, when enabled
/// - `/healthz`, the OpenAPI document and the Scalar UI
/// - Optional Prometheus metrics
/// - CORS configuration
/// - Tracing middleware
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .with_state(state.clone())
        .nest(API_BASE, api_routes(state))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    match graphql::router(state.store.clone(), &state.config) {
        Some(graphql_router) => router = router.merge(graphql_router),
        None => info!("GraphQL endpoint disabled"),
    }

    let cors_layer = create_cors_layer(&state.config)?;
    let mut router = router.layer(cors_layer);

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: a connected store and the router over it.
///
/// # Lifecycle
///
/// 1. **Initialization** ([`new`](Application::new)): connects the store, creates collections
///    and seeds fixture data when enabled
/// 2. **Serving** ([`serve`](Application::serve)): binds the configured address and serves until
///    the shutdown future resolves
/// 3. **Shutdown**: stops accepting connections and flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting clubhouse with configuration: {:#?}", config);

        let store = setup_store(&config).await?;
        let app_state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Clubhouse listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
