use crate::api::models::players::Position;
use crate::types::PlayerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Player document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDBResponse {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub shirt_number: Option<u32>,
    pub height_cm: Option<u32>,
    pub active: bool,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
