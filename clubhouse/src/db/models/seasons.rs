use crate::types::{CompetitionId, SeasonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Season document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDBResponse {
    pub id: SeasonId,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub competition_ids: Vec<CompetitionId>,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl SeasonDBResponse {
    pub fn includes(&self, competition_id: CompetitionId) -> bool {
        self.competition_ids.contains(&competition_id)
    }

    pub fn covers_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}
