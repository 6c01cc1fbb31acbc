//! API request/response models for trophies.

use super::pagination::Pagination;
use crate::db::models::trophies::TrophyDBResponse;
use crate::types::{CompetitionId, SeasonId, TrophyId};
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing trophies
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTrophiesQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub competition_id: Option<CompetitionId>,

    #[param(value_type = Option<String>, format = "uuid")]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub season_id: Option<SeasonId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateTrophyInput")]
pub struct TrophyCreate {
    #[schema(example = "Premier League Trophy")]
    pub name: String,
    #[schema(value_type = String, format = "uuid")]
    pub competition_id: CompetitionId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    /// Date the trophy was won; must fall within the season's years
    #[schema(example = "2025-05-25")]
    pub won_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateTrophyInput")]
pub struct TrophyUpdate {
    pub name: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub competition_id: Option<CompetitionId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub season_id: Option<SeasonId>,
    pub won_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Trophy", complex)]
pub struct TrophyResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: TrophyId,
    pub name: String,
    #[schema(value_type = String, format = "uuid")]
    pub competition_id: CompetitionId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    pub won_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrophyDBResponse> for TrophyResponse {
    fn from(db: TrophyDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            competition_id: db.competition_id,
            season_id: db.season_id,
            won_on: db.won_on,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
