//! Database repository for seasons.

use crate::api::models::seasons::{SeasonCreate, SeasonUpdate};
use crate::db::errors::Result;
use crate::db::filter::Filter;
use crate::db::handlers::documents::{DocumentFilter, Documents, Entity, require};
use crate::db::handlers::matches::Matches;
use crate::db::models::competitions::CompetitionDBResponse;
use crate::db::models::matches::MatchDBResponse;
use crate::db::models::seasons::SeasonDBResponse;
use crate::db::schema;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::types::SeasonId;
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::instrument;
use uuid::Uuid;

pub type Seasons<'a> = Documents<'a, SeasonDBResponse>;

#[async_trait::async_trait]
impl Entity for SeasonDBResponse {
    type CreateRequest = SeasonCreate;
    type UpdateRequest = SeasonUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "seasons",
        unique: &[&["name"]],
        validator: schema::seasons,
    };

    const SORTABLE: &'static [&'static str] = &["name", "start_year", "end_year", "created_at", "updated_at"];

    fn from_create(id: Uuid, request: &SeasonCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            start_year: request.start_year,
            end_year: request.end_year,
            competition_ids: request.competition_ids.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &SeasonUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(start_year) = request.start_year {
            self.start_year = start_year;
        }
        if let Some(end_year) = request.end_year {
            self.end_year = end_year;
        }
        if let Some(competition_ids) = &request.competition_ids {
            self.competition_ids = competition_ids.clone();
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self, errors: &mut FieldErrors) {
        errors.length("name", &self.name, 1, 20);
        errors.range("start_year", self.start_year, 1850, 2200);
        errors.check(
            self.end_year == self.start_year || self.start_year.checked_add(1) == Some(self.end_year),
            "end_year",
            "must equal start_year or start_year + 1",
        );
        errors.check(!self.competition_ids.is_empty(), "competition_ids", "must include at least one competition");
        let unique: HashSet<_> = self.competition_ids.iter().collect();
        errors.check(
            unique.len() == self.competition_ids.len(),
            "competition_ids",
            "must not contain duplicates",
        );
    }

    async fn prepare(&mut self, store: &dyn DocumentStore) -> Result<()> {
        for competition_id in &self.competition_ids {
            require::<CompetitionDBResponse>(store, Self::COLLECTION.name, "competition_ids", *competition_id).await?;
        }
        Ok(())
    }
}

impl<'a> Seasons<'a> {
    /// Matches played in a season, one page at a time.
    #[instrument(skip(self, page), err)]
    pub async fn matches_in(&self, season_id: SeasonId, page: DocumentFilter) -> Result<(Vec<MatchDBResponse>, u64)> {
        let filter = page.with_conditions(Filter::new().eq("season_id", season_id.to_string()));
        Matches::new(self.store()).page(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::competitions::CompetitionKind;
    use crate::db::errors::DbError;
    use crate::db::handlers::{Competitions, Repository};
    use crate::test_utils::{competition_create, memory_store, season_create};

    #[tokio::test]
    async fn test_season_requires_existing_competitions() {
        let store = memory_store().await;
        let league = Competitions::new(store.as_ref())
            .create(&competition_create("Premier League", CompetitionKind::League))
            .await
            .unwrap();
        let mut repo = Seasons::new(store.as_ref());

        let season = repo.create(&season_create("2024/25", 2024, vec![league.id])).await.unwrap();
        assert!(season.includes(league.id));
        assert!(season.covers_year(2025));
        assert!(!season.covers_year(2026));

        let missing = Uuid::new_v4();
        match repo.create(&season_create("2025/26", 2025, vec![league.id, missing])).await {
            Err(DbError::ForeignKeyViolation { field, message, .. }) => {
                assert_eq!(field, "competition_ids");
                assert!(message.contains(&missing.to_string()));
            }
            other => panic!("expected reference violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_season_year_rules() {
        let store = memory_store().await;
        let league = Competitions::new(store.as_ref())
            .create(&competition_create("Premier League", CompetitionKind::League))
            .await
            .unwrap();
        let mut repo = Seasons::new(store.as_ref());

        let request = SeasonCreate {
            end_year: 2026,
            ..season_create("2024/26", 2024, vec![league.id])
        };
        match repo.create(&request).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => assert_eq!(errors[0].field, "end_year"),
            other => panic!("expected schema violation, got {other:?}"),
        }

        // Calendar-year seasons are allowed
        let request = SeasonCreate {
            end_year: 2024,
            ..season_create("2024", 2024, vec![league.id])
        };
        assert!(repo.create(&request).await.is_ok());

        let empty = season_create("Empty", 2024, vec![]);
        assert!(matches!(repo.create(&empty).await, Err(DbError::SchemaViolation { .. })));
    }

    #[tokio::test]
    async fn test_extreme_start_year_is_rejected() {
        let store = memory_store().await;
        let league = Competitions::new(store.as_ref())
            .create(&competition_create("Premier League", CompetitionKind::League))
            .await
            .unwrap();
        let mut repo = Seasons::new(store.as_ref());

        let request = SeasonCreate {
            name: "Forever".to_string(),
            start_year: i32::MAX,
            end_year: 0,
            competition_ids: vec![league.id],
        };
        match repo.create(&request).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["start_year", "end_year"]);
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }
}
