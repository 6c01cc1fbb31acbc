//! API request/response models for matches.
//!
//! The score and result of a match are always derived from its goals; clients never send
//! them.

use super::pagination::Pagination;
use crate::db::models::matches::MatchDBResponse;
use crate::types::{CompetitionId, MatchId, PlayerId, SeasonId, StadiumId};
use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Where the club played the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    Home,
    Away,
    Neutral,
}

/// Which team a goal counts for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Club,
    Opponent,
}

/// Outcome from the club's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Enum)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, SimpleObject, InputObject)]
#[graphql(input_name = "GoalInput")]
pub struct Goal {
    /// Match minute, 1 to 130
    #[schema(example = 67)]
    pub minute: u32,
    pub side: Side,
    /// Required for club goals, absent for opponent goals
    #[schema(value_type = Option<String>, format = "uuid")]
    pub scorer_id: Option<PlayerId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub assist_id: Option<PlayerId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct Score {
    pub club: u32,
    pub opponent: u32,
}

/// Query parameters for listing matches
#[serde_as]
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMatchesQuery {
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

    /// Case-insensitive substring match on the opponent name
    pub opponent: Option<String>,

    pub venue: Option<Venue>,

    pub result: Option<MatchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "CreateMatchInput")]
pub struct MatchCreate {
    #[schema(value_type = String, format = "uuid")]
    pub competition_id: CompetitionId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub stadium_id: Option<StadiumId>,
    #[schema(example = "Everton")]
    pub opponent: String,
    pub kickoff: DateTime<Utc>,
    pub venue: Venue,
    /// Starting eleven (1 to 11 players)
    #[schema(value_type = Vec<String>)]
    pub lineup: Vec<PlayerId>,
    #[serde(default)]
    #[graphql(default)]
    #[schema(value_type = Vec<String>)]
    pub substitutes: Vec<PlayerId>,
    #[serde(default)]
    #[graphql(default)]
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, InputObject)]
#[graphql(name = "UpdateMatchInput")]
pub struct MatchUpdate {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub competition_id: Option<CompetitionId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub season_id: Option<SeasonId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub stadium_id: Option<StadiumId>,
    pub opponent: Option<String>,
    pub kickoff: Option<DateTime<Utc>>,
    pub venue: Option<Venue>,
    #[schema(value_type = Option<Vec<String>>)]
    pub lineup: Option<Vec<PlayerId>>,
    #[schema(value_type = Option<Vec<String>>)]
    pub substitutes: Option<Vec<PlayerId>>,
    pub goals: Option<Vec<Goal>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, SimpleObject)]
#[graphql(name = "Match", complex)]
pub struct MatchResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MatchId,
    #[schema(value_type = String, format = "uuid")]
    pub competition_id: CompetitionId,
    #[schema(value_type = String, format = "uuid")]
    pub season_id: SeasonId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub stadium_id: Option<StadiumId>,
    pub opponent: String,
    pub kickoff: DateTime<Utc>,
    pub venue: Venue,
    #[schema(value_type = Vec<String>)]
    pub lineup: Vec<PlayerId>,
    #[schema(value_type = Vec<String>)]
    pub substitutes: Vec<PlayerId>,
    pub goals: Vec<Goal>,
    pub score: Score,
    pub result: MatchResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchDBResponse> for MatchResponse {
    fn from(db: MatchDBResponse) -> Self {
        Self {
            id: db.id,
            competition_id: db.competition_id,
            season_id: db.season_id,
            stadium_id: db.stadium_id,
            opponent: db.opponent,
            kickoff: db.kickoff,
            venue: db.venue,
            lineup: db.lineup,
            substitutes: db.substitutes,
            goals: db.goals,
            score: db.score,
            result: db.result,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
