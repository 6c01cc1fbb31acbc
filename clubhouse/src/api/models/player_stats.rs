//! API request/response models for per-season player statistics.

use super::pagination::Pagination;
use crate::db::models::player_stats::PlayerStatsDBResponse;
use crate::types::{CompetitionId, PlayerId, PlayerStatsId, SeasonId};
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing statistics lines
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPlayerStatsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub player_id: Option<PlayerId>,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub season_id: Option<SeasonId>,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub competition_id: Option<CompetitionId>,
}

/// One statistics line per player, season and (optionally) competition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreatePlayerStatsInput")]
pub struct PlayerStatsCreate {
    #[schema(value_type = String, format = "uuid")]
    pub player_id: PlayerId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    /// Omit for totals across all competitions in the season
    #[schema(value_type = Option<String>, format = "uuid")]
    pub competition_id: Option<CompetitionId>,
    #[serde(default)]
    #[graphql(default)]
    pub appearances: u32,
    #[serde(default)]
    #[graphql(default)]
    pub goals: u32,
    #[serde(default)]
    #[graphql(default)]
    pub assists: u32,
    #[serde(default)]
    #[graphql(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    #[graphql(default)]
    pub red_cards: u32,
    #[serde(default)]
    #[graphql(default)]
    pub minutes_played: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdatePlayerStatsInput")]
pub struct PlayerStatsUpdate {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub player_id: Option<PlayerId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub season_id: Option<SeasonId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub competition_id: Option<CompetitionId>,
    pub appearances: Option<u32>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub minutes_played: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "PlayerStats", complex)]
pub struct PlayerStatsResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PlayerStatsId,
    #[schema(value_type = String, format = "uuid")]
    pub player_id: PlayerId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub competition_id: Option<CompetitionId>,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes_played: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlayerStatsDBResponse> for PlayerStatsResponse {
    fn from(db: PlayerStatsDBResponse) -> Self {
        Self {
            id: db.id,
            player_id: db.player_id,
            season_id: db.season_id,
            competition_id: db.competition_id,
            appearances: db.appearances,
            goals: db.goals,
            assists: db.assists,
            yellow_cards: db.yellow_cards,
            red_cards: db.red_cards,
            minutes_played: db.minutes_played,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
