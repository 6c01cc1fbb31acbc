//! API request/response models for player contracts.

use super::pagination::Pagination;
use crate::db::models::contracts::ContractDBResponse;
use crate::types::{ContractId, PlayerId};
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing contracts
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListContractsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub player_id: Option<PlayerId>,

    /// Only contracts running on this date
    #[param(value_type = Option<String>, format = "date")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub active_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateContractInput")]
pub struct ContractCreate {
    #[schema(value_type = String, format = "uuid")]
    pub player_id: PlayerId,
    #[schema(example = "2023-07-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2027-06-30")]
    pub end_date: NaiveDate,
    /// Weekly wage in the club's currency
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 350000.0)]
    pub weekly_wage: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub release_clause: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateContractInput")]
pub struct ContractUpdate {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub player_id: Option<PlayerId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub weekly_wage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub release_clause: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Contract", complex)]
pub struct ContractResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ContractId,
    #[schema(value_type = String, format = "uuid")]
    pub player_id: PlayerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weekly_wage: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub release_clause: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContractDBResponse> for ContractResponse {
    fn from(db: ContractDBResponse) -> Self {
        Self {
            id: db.id,
            player_id: db.player_id,
            start_date: db.start_date,
            end_date: db.end_date,
            weekly_wage: db.weekly_wage,
            release_clause: db.release_clause,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
