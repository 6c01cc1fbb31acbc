use crate::api::models::matches::{Goal, MatchResult, Score, Venue};
use crate::types::{CompetitionId, MatchId, PlayerId, SeasonId, StadiumId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match document as stored, including the derived score and result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDBResponse {
    pub id: MatchId,
    pub competition_id: CompetitionId,
    pub season_id: SeasonId,
    pub stadium_id: Option<StadiumId>,
    pub opponent: String,
    #[serde(with = "crate::types::timestamp")]
    pub kickoff: DateTime<Utc>,
    pub venue: Venue,
    pub lineup: Vec<PlayerId>,
    pub substitutes: Vec<PlayerId>,
    pub goals: Vec<Goal>,
    pub score: Score,
    pub result: MatchResult,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl MatchDBResponse {
    /// Lineup followed by substitutes
    pub fn squad(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.lineup.iter().chain(&self.substitutes).copied()
    }
}
