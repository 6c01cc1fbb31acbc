//! API request/response models for stadiums.

use super::pagination::Pagination;
use crate::db::models::stadiums::StadiumDBResponse;
use crate::types::StadiumId;
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Pitch surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Grass,
    Hybrid,
    Artificial,
}

/// Query parameters for listing stadiums
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStadiumsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on the stadium name
    pub search: Option<String>,

    pub city: Option<String>,

    pub surface: Option<Surface>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateStadiumInput")]
pub struct StadiumCreate {
    /// Stadium name (must be unique)
    #[schema(example = "Anfield")]
    pub name: String,
    #[schema(example = "Liverpool")]
    pub city: String,
    #[schema(example = 61276)]
    pub capacity: u32,
    #[schema(example = 1884)]
    pub opened_year: Option<i32>,
    /// Pitch surface (default: grass)
    #[serde(default)]
    #[graphql(default)]
    pub surface: Surface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateStadiumInput")]
pub struct StadiumUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u32>,
    pub opened_year: Option<i32>,
    pub surface: Option<Surface>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Stadium")]
pub struct StadiumResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: StadiumId,
    pub name: String,
    pub city: String,
    pub capacity: u32,
    pub opened_year: Option<i32>,
    pub surface: Surface,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StadiumDBResponse> for StadiumResponse {
    fn from(db: StadiumDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            city: db.city,
            capacity: db.capacity,
            opened_year: db.opened_year,
            surface: db.surface,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
