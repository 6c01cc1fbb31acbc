//! Database repository for trophies.

use crate::api::models::trophies::{TrophyCreate, TrophyUpdate};
use crate::db::errors::{DbError, Result};
use crate::db::handlers::documents::{Documents, Entity, require};
use crate::db::models::competitions::CompetitionDBResponse;
use crate::db::models::seasons::SeasonDBResponse;
use crate::db::models::trophies::TrophyDBResponse;
use crate::db::schema;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::validation::FieldErrors;
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

pub type Trophies<'a> = Documents<'a, TrophyDBResponse>;

#[async_trait::async_trait]
impl Entity for TrophyDBResponse {
    type CreateRequest = TrophyCreate;
    type UpdateRequest = TrophyUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "trophies",
        unique: &[],
        validator: schema::trophies,
    };

    const SORTABLE: &'static [&'static str] = &["name", "won_on", "created_at", "updated_at"];

    fn from_create(id: Uuid, request: &TrophyCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            competition_id: request.competition_id,
            season_id: request.season_id,
            won_on: request.won_on,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &TrophyUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(competition_id) = request.competition_id {
            self.competition_id = competition_id;
        }
        if let Some(season_id) = request.season_id {
            self.season_id = season_id;
        }
        if request.won_on.is_some() {
            self.won_on = request.won_on;
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self, errors: &mut FieldErrors) {
        errors.length("name", &self.name, 1, 100);
    }

    async fn prepare(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let collection = Self::COLLECTION.name;
        let competition: CompetitionDBResponse = require(store, collection, "competition_id", self.competition_id).await?;
        let season: SeasonDBResponse = require(store, collection, "season_id", self.season_id).await?;

        if !season.includes(competition.id) {
            return Err(DbError::check(
                collection,
                format!("season '{}' does not include competition '{}'", season.name, competition.name),
            ));
        }
        if let Some(won_on) = self.won_on
            && !season.covers_year(won_on.year())
        {
            return Err(DbError::check(
                collection,
                format!(
                    "won_on {won_on} falls outside season {}-{}",
                    season.start_year, season.end_year
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::competitions::CompetitionKind;
    use crate::db::handlers::documents::DocumentFilter;
    use crate::db::handlers::{Competitions, Repository, Seasons};
    use crate::test_utils::{competition_create, memory_store, season_create};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_trophy_consistency_rules() {
        let store = memory_store().await;
        let mut competitions = Competitions::new(store.as_ref());
        let league = competitions
            .create(&competition_create("Premier League", CompetitionKind::League))
            .await
            .unwrap();
        let cup = competitions
            .create(&competition_create("FA Cup", CompetitionKind::DomesticCup))
            .await
            .unwrap();
        let season = Seasons::new(store.as_ref())
            .create(&season_create("2024/25", 2024, vec![league.id]))
            .await
            .unwrap();
        let mut repo = Trophies::new(store.as_ref());

        let won = TrophyCreate {
            name: "Premier League Trophy".to_string(),
            competition_id: league.id,
            season_id: season.id,
            won_on: NaiveDate::from_ymd_opt(2025, 5, 25),
        };
        let trophy = repo.create(&won).await.unwrap();

        let wrong_competition = TrophyCreate {
            competition_id: cup.id,
            ..won.clone()
        };
        match repo.create(&wrong_competition).await.unwrap_err() {
            DbError::CheckViolation { message, .. } => assert!(message.contains("does not include")),
            other => panic!("expected check violation, got {other:?}"),
        }

        let too_late = TrophyUpdate {
            won_on: NaiveDate::from_ymd_opt(2026, 5, 1),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(trophy.id, &too_late).await,
            Err(DbError::CheckViolation { .. })
        ));

        let missing = TrophyCreate {
            season_id: Uuid::new_v4(),
            ..won
        };
        assert!(matches!(
            repo.create(&missing).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));

        let (trophies, total) = competitions
            .trophies_for(league.id, DocumentFilter::new(0, 10))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(trophies[0].won_on, NaiveDate::from_ymd_opt(2025, 5, 25));
    }
}
