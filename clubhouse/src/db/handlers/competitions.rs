//! Database repository for competitions.

use crate::api::models::competitions::{CompetitionCreate, CompetitionUpdate};
use crate::db::errors::Result;
use crate::db::filter::Filter;
use crate::db::handlers::documents::{DocumentFilter, Documents, Entity};
use crate::db::handlers::trophies::Trophies;
use crate::db::models::competitions::CompetitionDBResponse;
use crate::db::models::trophies::TrophyDBResponse;
use crate::db::schema;
use crate::db::store::CollectionSpec;
use crate::types::CompetitionId;
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

pub type Competitions<'a> = Documents<'a, CompetitionDBResponse>;

#[async_trait::async_trait]
impl Entity for CompetitionDBResponse {
    type CreateRequest = CompetitionCreate;
    type UpdateRequest = CompetitionUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "competitions",
        unique: &[&["name"]],
        validator: schema::competitions,
    };

    const SORTABLE: &'static [&'static str] = &["name", "kind", "country", "created_at", "updated_at"];

    fn from_create(id: Uuid, request: &CompetitionCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            kind: request.kind,
            country: request.country.as_deref().map(|c| c.trim().to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &CompetitionUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(kind) = request.kind {
            self.kind = kind;
        }
        if let Some(country) = &request.country {
            self.country = Some(country.trim().to_string());
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
        errors.optional_length("country", self.country.as_deref(), 2, 60);
    }
}

impl<'a> Competitions<'a> {
    /// Trophies won in a competition, one page at a time.
    #[instrument(skip(self, page), err)]
    pub async fn trophies_for(
        &self,
        competition_id: CompetitionId,
        page: DocumentFilter,
    ) -> Result<(Vec<TrophyDBResponse>, u64)> {
        let filter = page.with_conditions(Filter::new().eq("competition_id", competition_id.to_string()));
        Trophies::new(self.store()).page(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::competitions::CompetitionKind;
    use crate::db::errors::DbError;
    use crate::db::handlers::Repository;
    use crate::test_utils::{competition_create, memory_store};

    #[tokio::test]
    async fn test_competition_rules() {
        let store = memory_store().await;
        let mut repo = Competitions::new(store.as_ref());

        let league = repo
            .create(&competition_create("Premier League", CompetitionKind::League))
            .await
            .unwrap();
        assert_eq!(league.country.as_deref(), Some("England"));

        assert!(matches!(
            repo.create(&competition_create("Premier League", CompetitionKind::DomesticCup))
                .await,
            Err(DbError::UniqueViolation { .. })
        ));

        let request = CompetitionCreate {
            country: Some("X".to_string()),
            ..competition_create("FA Cup", CompetitionKind::DomesticCup)
        };
        assert!(matches!(
            repo.create(&request).await,
            Err(DbError::SchemaViolation { .. })
        ));
    }
}
