//! API request/response models for managers.

use super::pagination::Pagination;
use super::players::default_true;
use crate::db::models::managers::ManagerDBResponse;
use crate::types::ManagerId;
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing managers
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListManagersQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Case-insensitive substring match on the manager name
    pub search: Option<String>,

    pub nationality: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub active: Option<bool>,
}

/// Request body for creating a new manager.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateManagerInput")]
pub struct ManagerCreate {
    #[schema(example = "Arne Slot")]
    pub name: String,
    #[schema(example = "Netherlands")]
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub appointed_on: NaiveDate,
    pub departed_on: Option<NaiveDate>,
    #[serde(default = "default_true")]
    #[graphql(default = true)]
    pub active: bool,
}

/// Request body for updating an existing manager. Only provided fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateManagerInput")]
pub struct ManagerUpdate {
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub appointed_on: Option<NaiveDate>,
    pub departed_on: Option<NaiveDate>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Manager")]
pub struct ManagerResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ManagerId,
    pub name: String,
    pub nationality: String,
    pub date_of_birth: NaiveDate,
    pub appointed_on: NaiveDate,
    pub departed_on: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ManagerDBResponse> for ManagerResponse {
    fn from(db: ManagerDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            nationality: db.nationality,
            date_of_birth: db.date_of_birth,
            appointed_on: db.appointed_on,
            departed_on: db.departed_on,
            active: db.active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
