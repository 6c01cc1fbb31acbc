use crate::api::models::stadiums::Surface;
use crate::types::StadiumId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stadium document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StadiumDBResponse {
    pub id: StadiumId,
    pub name: String,
    pub city: String,
    pub capacity: u32,
    pub opened_year: Option<i32>,
    pub surface: Surface,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
