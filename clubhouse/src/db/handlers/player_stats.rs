//! Database repository for player statistics.

use crate::api::models::player_stats::{PlayerStatsCreate, PlayerStatsUpdate};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::documents::{Documents, Entity, require};
use crate::db::models::competitions::CompetitionDBResponse;
use crate::db::models::player_stats::PlayerStatsDBResponse;
use crate::db::models::players::PlayerDBResponse;
use crate::db::models::seasons::SeasonDBResponse;
use crate::db::schema;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Upper bound on minutes a player can log in one appearance, extra time included
const MAX_MINUTES_PER_APPEARANCE: u32 = 130;

pub type PlayerStatistics<'a> = Documents<'a, PlayerStatsDBResponse>;

#[async_trait::async_trait]
impl Entity for PlayerStatsDBResponse {
    type CreateRequest = PlayerStatsCreate;
    type UpdateRequest = PlayerStatsUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "player_stats",
        unique: &[&["player_id", "season_id", "competition_id"]],
        validator: schema::player_stats,
    };

    const SORTABLE: &'static [&'static str] = &[
        "appearances",
        "goals",
        "assists",
        "yellow_cards",
        "red_cards",
        "minutes_played",
        "created_at",
        "updated_at",
    ];

    fn from_create(id: Uuid, request: &PlayerStatsCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            player_id: request.player_id,
            season_id: request.season_id,
            competition_id: request.competition_id,
            appearances: request.appearances,
            goals: request.goals,
            assists: request.assists,
            yellow_cards: request.yellow_cards,
            red_cards: request.red_cards,
            minutes_played: request.minutes_played,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &PlayerStatsUpdate) {
        if let Some(player_id) = request.player_id {
            self.player_id = player_id;
        }
        if let Some(season_id) = request.season_id {
            self.season_id = season_id;
        }
        if request.competition_id.is_some() {
            self.competition_id = request.competition_id;
        }
        let counters = [
            (&mut self.appearances, request.appearances),
            (&mut self.goals, request.goals),
            (&mut self.assists, request.assists),
            (&mut self.yellow_cards, request.yellow_cards),
            (&mut self.red_cards, request.red_cards),
            (&mut self.minutes_played, request.minutes_played),
        ];
        for (field, value) in counters {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self, errors: &mut FieldErrors) {
        errors.check(
            self.minutes_played <= self.appearances.saturating_mul(MAX_MINUTES_PER_APPEARANCE),
            "minutes_played",
            format!("must not exceed {MAX_MINUTES_PER_APPEARANCE} minutes per appearance"),
        );
        errors.check(
            self.red_cards <= self.appearances,
            "red_cards",
            "must not exceed appearances",
        );
    }

    async fn prepare(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let collection = Self::COLLECTION.name;
        require::<PlayerDBResponse>(store, collection, "player_id", self.player_id).await?;
        let season: SeasonDBResponse = require(store, collection, "season_id", self.season_id).await?;

        if let Some(competition_id) = self.competition_id {
            let competition: CompetitionDBResponse = require(store, collection, "competition_id", competition_id).await?;
            if !season.includes(competition.id) {
                return Err(DbError::check(
                    collection,
                    format!("season '{}' does not include competition '{}'", season.name, competition.name),
                ));
            }
        }
        Ok(())
    }
}
