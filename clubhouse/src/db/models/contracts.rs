use crate::types::{ContractId, PlayerId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contract document as stored. Money is stored as a JSON number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDBResponse {
    pub id: ContractId,
    pub player_id: PlayerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_wage: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub release_clause: Option<Decimal>,
    #[serde(with = "crate::types::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::types::timestamp")]
    pub updated_at: DateTime<Utc>,
}
