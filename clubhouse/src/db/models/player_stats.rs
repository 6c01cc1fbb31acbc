use crate::types::{CompetitionId, PlayerId, PlayerStatsId, SeasonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Player statistics document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatsDBResponse {
    pub id: PlayerStatsId,
    pub player_id: PlayerId,
    pub season_id: SeasonId,
    pub competition_id: Option<CompetitionId>,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes_played: u32,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
