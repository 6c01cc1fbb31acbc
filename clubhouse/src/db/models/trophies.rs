use crate::types::{CompetitionId, SeasonId, TrophyId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Trophy document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrophyDBResponse {
    pub id: TrophyId,
    pub name: String,
    pub competition_id: CompetitionId,
    pub season_id: SeasonId,
    pub won_on: Option<NaiveDate>,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
