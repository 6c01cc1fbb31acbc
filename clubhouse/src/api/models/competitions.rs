//! API request/response models for competitions.

use super::pagination::Pagination;
use crate::db::models::competitions::CompetitionDBResponse;
use crate::types::CompetitionId;
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionKind {
    League,
    DomesticCup,
    Continental,
    Friendly,
}

/// Query parameters for listing competitions
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCompetitionsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on the competition name
    pub search: Option<String>,

    pub kind: Option<CompetitionKind>,

    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateCompetitionInput")]
pub struct CompetitionCreate {
    /// Competition name (must be unique)
    #[schema(example = "Premier League")]
    pub name: String,
    pub kind: CompetitionKind,
    #[schema(example = "England")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateCompetitionInput")]
pub struct CompetitionUpdate {
    pub name: Option<String>,
    pub kind: Option<CompetitionKind>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Competition", complex)]
pub struct CompetitionResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CompetitionId,
    pub name: String,
    pub kind: CompetitionKind,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompetitionDBResponse> for CompetitionResponse {
    fn from(db: CompetitionDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            kind: db.kind,
            country: db.country,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
