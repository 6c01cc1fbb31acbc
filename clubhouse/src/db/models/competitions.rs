use crate::api::models::competitions::CompetitionKind;
use crate::types::CompetitionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Competition document as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionDBResponse {
    pub id: CompetitionId,
    pub name: String,
    pub kind: CompetitionKind,
    pub country: Option<String>,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
