//! Test utilities: an in-memory application, fresh stores and request builders.

use crate::api::models::{
    competitions::{CompetitionCreate, CompetitionKind},
    contracts::ContractCreate,
    managers::ManagerCreate,
    players::{PlayerCreate, Position},
    seasons::SeasonCreate,
    stadiums::{StadiumCreate, Surface},
};
use crate::config::{Config, DatabaseConfig, SeedConfig};
use crate::db::store::Store;
use crate::types::{CompetitionId, PlayerId};
use axum_test::TestServer;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// An empty in-memory store with every collection created.
pub async fn memory_store() -> Store {
    crate::db::connect(&DatabaseConfig::Memory)
        .await
        .expect("Failed to create memory store")
}

pub fn create_test_config() -> Config {
    Config {
        database: DatabaseConfig::Memory,
        seed: SeedConfig { enabled: false },
        enable_metrics: false,
        ..Default::default()
    }
}

/// The full router over an empty in-memory store.
pub async fn create_test_app() -> TestServer {
    create_test_app_with_config(create_test_config()).await
}

pub async fn create_test_app_with_config(config: Config) -> TestServer {
    crate::Application::new(config)
        .await
        .expect("Failed to create application")
        .into_test_server()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn player_create(name: &str, position: Position) -> PlayerCreate {
    PlayerCreate {
        name: name.to_string(),
        position,
        nationality: "England".to_string(),
        date_of_birth: date(1998, 10, 7),
        shirt_number: None,
        height_cm: Some(180),
        active: true,
    }
}

pub fn manager_create(name: &str) -> ManagerCreate {
    ManagerCreate {
        name: name.to_string(),
        nationality: "Netherlands".to_string(),
        date_of_birth: date(1978, 9, 1),
        appointed_on: date(2024, 6, 1),
        departed_on: None,
        active: true,
    }
}

pub fn stadium_create(name: &str) -> StadiumCreate {
    StadiumCreate {
        name: name.to_string(),
        city: "Liverpool".to_string(),
        capacity: 61_276,
        opened_year: Some(1884),
        surface: Surface::Grass,
    }
}

pub fn competition_create(name: &str, kind: CompetitionKind) -> CompetitionCreate {
    CompetitionCreate {
        name: name.to_string(),
        kind,
        country: Some("England".to_string()),
    }
}

/// A season spanning `start_year` and the following year.
pub fn season_create(name: &str, start_year: i32, competition_ids: Vec<CompetitionId>) -> SeasonCreate {
    SeasonCreate {
        name: name.to_string(),
        start_year,
        end_year: start_year + 1,
        competition_ids,
    }
}

pub fn contract_create(player_id: PlayerId) -> ContractCreate {
    ContractCreate {
        player_id,
        start_date: date(2023, 7, 1),
        end_date: date(2027, 6, 30),
        weekly_wage: Decimal::from(350_000),
        release_clause: None,
    }
}
