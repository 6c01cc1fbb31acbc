use crate::types::ManagerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Manager document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerDBResponse {
    pub id: ManagerId,
    pub name: String,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub appointed_on: NaiveDate,
    pub departed_on: Option<NaiveDate>,
    pub active: bool,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
