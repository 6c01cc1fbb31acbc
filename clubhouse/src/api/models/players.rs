//! API request/response models for players.

use super::pagination::Pagination;
use crate::db::models::players::PlayerDBResponse;
use crate::types::PlayerId;
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Playing position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

pub(crate) fn default_true() -> bool {
    true
}

/// Query parameters for listing players
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPlayersQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on the player name
    pub search: Option<String>,

    /// Only players in this position
    pub position: Option<Position>,

    /// Only players of this nationality
    pub nationality: Option<String>,

    /// Only active (or inactive) players
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub active: Option<bool>,
}

/// Request body for creating a new player.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreatePlayerInput")]
pub struct PlayerCreate {
    #[schema(example = "Mohamed Salah")]
    pub name: String,
    pub position: Position,
    #[schema(example = "Egypt")]
    pub nationality: String,
    #[schema(example = "1992-06-15")]
    pub date_of_birth: NaiveDate,
    #[schema(example = 11)]
    pub shirt_number: Option<u32>,
    #[schema(example = 175)]
    pub height_cm: Option<u32>,
    /// Whether the player is currently available for selection (default: true)
    #[serde(default = "default_true")]
    #[graphql(default = true)]
    pub active: bool,
}

/// Request body for updating an existing player. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdatePlayerInput")]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub shirt_number: Option<u32>,
    pub height_cm: Option<u32>,
    pub active: Option<bool>,
}

/// Full player details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Player", complex)]
pub struct PlayerResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub shirt_number: Option<u32>,
    pub height_cm: Option<u32>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlayerDBResponse> for PlayerResponse {
    fn from(db: PlayerDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            position: db.position,
            nationality: db.nationality,
            date_of_birth: db.date_of_birth,
            shirt_number: db.shirt_number,
            height_cm: db.height_cm,
            active: db.active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
