//! API request/response models for seasons.

use super::pagination::Pagination;
use crate::db::models::seasons::SeasonDBResponse;
use crate::types::{CompetitionId, SeasonId};
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing seasons
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSeasonsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Seasons running in this calendar year
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub year: Option<i32>,

    /// Seasons including this competition
    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub competition_id: Option<CompetitionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateSeasonInput")]
pub struct SeasonCreate {
    /// Season name (must be unique)
    #[schema(example = "2024/25")]
    pub name: String,
    #[schema(example = 2024)]
    pub start_year: i32,
    #[schema(example = 2025)]
    pub end_year: i32,
    /// Competitions played during the season (at least one)
    #[schema(value_type = Vec<String>)]
    pub competition_ids: Vec<CompetitionId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateSeasonInput")]
pub struct SeasonUpdate {
    pub name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    #[schema(value_type = Option<Vec<String>>)]
    pub competition_ids: Option<Vec<CompetitionId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Season", complex)]
pub struct SeasonResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: SeasonId,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    #[schema(value_type = Vec<String>)]
    pub competition_ids: Vec<CompetitionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SeasonDBResponse> for SeasonResponse {
    fn from(db: SeasonDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            start_year: db.start_year,
            end_year: db.end_year,
            competition_ids: db.competition_ids,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
