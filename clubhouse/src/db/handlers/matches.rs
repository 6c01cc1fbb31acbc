//! Database repository for matches.
//!
//! Every write loads the referenced competition, season, stadium and squad, runs the
//! consistency checks from [`crate::validation::matches`] and then derives the score and
//! result from the goal list.

use crate::api::models::matches::{MatchCreate, MatchResult, MatchUpdate, Score};
use crate::db::errors::{DbError, Result};
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::documents::{Documents, Entity, require};
use crate::db::models::competitions::CompetitionDBResponse;
use crate::db::models::matches::MatchDBResponse;
use crate::db::models::players::PlayerDBResponse;
use crate::db::models::seasons::SeasonDBResponse;
use crate::db::models::stadiums::StadiumDBResponse;
use crate::db::schema;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::validation::FieldErrors;
use crate::validation::matches::{
    MatchInconsistency, derive_score, goals_consistent, kickoff_within_season, no_duplicate_players, players_active,
    season_includes_competition,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

pub const MAX_LINEUP: usize = 11;
pub const MAX_SUBSTITUTES: usize = 12;
pub const MAX_MINUTE: u32 = 130;

pub type Matches<'a> = Documents<'a, MatchDBResponse>;

fn inconsistent(err: MatchInconsistency) -> DbError {
    DbError::check(MatchDBResponse::COLLECTION.name, err.to_string())
}

#[async_trait::async_trait]
impl Entity for MatchDBResponse {
    type CreateRequest = MatchCreate;
    type UpdateRequest = MatchUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "matches",
        unique: &[],
        validator: schema::matches,
    };

    const SORTABLE: &'static [&'static str] = &["kickoff", "opponent", "venue", "result", "created_at", "updated_at"];

    fn from_create(id: Uuid, request: &MatchCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            competition_id: request.competition_id,
            season_id: request.season_id,
            stadium_id: request.stadium_id,
            opponent: request.opponent.trim().to_string(),
            kickoff: request.kickoff,
            venue: request.venue,
            lineup: request.lineup.clone(),
            substitutes: request.substitutes.clone(),
            goals: request.goals.clone(),
            // Derived in prepare
            score: Score::default(),
            result: MatchResult::Draw,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &MatchUpdate) {
        if let Some(competition_id) = request.competition_id {
            self.competition_id = competition_id;
        }
        if let Some(season_id) = request.season_id {
            self.season_id = season_id;
        }
        if request.stadium_id.is_some() {
            self.stadium_id = request.stadium_id;
        }
        if let Some(opponent) = &request.opponent {
            self.opponent = opponent.trim().to_string();
        }
        if let Some(kickoff) = request.kickoff {
            self.kickoff = kickoff;
        }
        if let Some(venue) = request.venue {
            self.venue = venue;
        }
        if let Some(lineup) = &request.lineup {
            self.lineup = lineup.clone();
        }
        if let Some(substitutes) = &request.substitutes {
            self.substitutes = substitutes.clone();
        }
        if let Some(goals) = &request.goals {
            self.goals = goals.clone();
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self, errors: &mut FieldErrors) {
        errors.length("opponent", &self.opponent, 1, 100);
        errors.check(
            (1..=MAX_LINEUP).contains(&self.lineup.len()),
            "lineup",
            format!("must contain between 1 and {MAX_LINEUP} players"),
        );
        errors.check(
            self.substitutes.len() <= MAX_SUBSTITUTES,
            "substitutes",
            format!("must contain at most {MAX_SUBSTITUTES} players"),
        );
        for (index, goal) in self.goals.iter().enumerate() {
            errors.range(&format!("goals[{index}].minute"), goal.minute, 1, MAX_MINUTE);
        }
    }

    async fn prepare(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let collection = Self::COLLECTION.name;

        let competition: CompetitionDBResponse = require(store, collection, "competition_id", self.competition_id).await?;
        let season: SeasonDBResponse = require(store, collection, "season_id", self.season_id).await?;
        if let Some(stadium_id) = self.stadium_id {
            require::<StadiumDBResponse>(store, collection, "stadium_id", stadium_id).await?;
        }

        season_includes_competition(season.id, &season.competition_ids, competition.id).map_err(inconsistent)?;
        kickoff_within_season(self.kickoff, season.start_year, season.end_year).map_err(inconsistent)?;
        no_duplicate_players(&self.lineup, &self.substitutes).map_err(inconsistent)?;

        let squad = self.load_squad(store).await?;
        players_active(self.squad().map(|id| (id, squad.get(&id).is_some_and(|p| p.active)))).map_err(inconsistent)?;

        goals_consistent(&self.goals, &self.lineup, &self.substitutes).map_err(inconsistent)?;

        let (score, result) = derive_score(&self.goals);
        self.score = score;
        self.result = result;
        Ok(())
    }
}

impl MatchDBResponse {
    /// Load every squad player, failing on the first one that does not exist.
    async fn load_squad(&self, store: &dyn DocumentStore) -> Result<HashMap<Uuid, PlayerDBResponse>> {
        let ids = self.squad().map(|id| Value::String(id.to_string())).collect();
        let players: HashMap<Uuid, PlayerDBResponse> = Documents::<PlayerDBResponse>::new(store)
            .find_all(&Filter::new().with("id", Comparison::In(ids)))
            .await?
            .into_iter()
            .map(|player| (player.id, player))
            .collect();

        let missing = self
            .lineup
            .iter()
            .map(|id| ("lineup", id))
            .chain(self.substitutes.iter().map(|id| ("substitutes", id)))
            .find(|(_, id)| !players.contains_key(id));
        match missing {
            Some((field, id)) => Err(DbError::missing_reference(Self::COLLECTION.name, field, id)),
            None => Ok(players),
        }
    }
}
