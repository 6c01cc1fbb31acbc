//! Database repository for players.

use crate::api::models::players::{PlayerCreate, PlayerUpdate};
use crate::db::errors::Result;
use crate::db::filter::Filter;
use crate::db::handlers::contracts::Contracts;
use crate::db::handlers::documents::{DocumentFilter, Documents, Entity};
use crate::db::handlers::player_stats::PlayerStatistics;
use crate::db::models::contracts::ContractDBResponse;
use crate::db::models::player_stats::PlayerStatsDBResponse;
use crate::db::models::players::PlayerDBResponse;
use crate::db::schema;
use crate::db::store::CollectionSpec;
use crate::types::PlayerId;
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

pub type Players<'a> = Documents<'a, PlayerDBResponse>;

#[async_trait::async_trait]
impl Entity for PlayerDBResponse {
    type CreateRequest = PlayerCreate;
    type UpdateRequest = PlayerUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "players",
        unique: &[],
        validator: schema::players,
    };

    const SORTABLE: &'static [&'static str] = &[
        "name",
        "position",
        "nationality",
        "date_of_birth",
        "shirt_number",
        "height_cm",
        "created_at",
        "updated_at",
    ];

    fn from_create(id: Uuid, request: &PlayerCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            position: request.position,
            nationality: request.nationality.trim().to_string(),
            date_of_birth: request.date_of_birth,
            shirt_number: request.shirt_number,
            height_cm: request.height_cm,
            active: request.active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &PlayerUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(position) = request.position {
            self.position = position;
        }
        if let Some(nationality) = &request.nationality {
            self.nationality = nationality.trim().to_string();
        }
        if let Some(date_of_birth) = request.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if request.shirt_number.is_some() {
            self.shirt_number = request.shirt_number;
        }
        if request.height_cm.is_some() {
            self.height_cm = request.height_cm;
        }
        if let Some(active) = request.active {
            self.active = active;
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
        errors.length("nationality", &self.nationality, 2, 60);
        errors.birth_date("date_of_birth", self.date_of_birth);
        errors.optional_range("shirt_number", self.shirt_number, 1, 99);
        errors.optional_range("height_cm", self.height_cm, 120, 230);
    }
}

impl<'a> Players<'a> {
    /// Contracts signed by a player, one page at a time.
    #[instrument(skip(self, page), err)]
    pub async fn contracts_for(&self, player_id: PlayerId, page: DocumentFilter) -> Result<(Vec<ContractDBResponse>, u64)> {
        let filter = page.with_conditions(Filter::new().eq("player_id", player_id.to_string()));
        Contracts::new(self.store()).page(&filter).await
    }

    /// Statistics lines recorded for a player, one page at a time.
    #[instrument(skip(self, page), err)]
    pub async fn stats_for(&self, player_id: PlayerId, page: DocumentFilter) -> Result<(Vec<PlayerStatsDBResponse>, u64)> {
        let filter = page.with_conditions(Filter::new().eq("player_id", player_id.to_string()));
        PlayerStatistics::new(self.store()).page(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::players::Position;
    use crate::db::errors::DbError;
    use crate::db::handlers::Repository;
    use crate::db::filter::{Comparison, Direction};
    use crate::test_utils::{memory_store, player_create};
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_player() {
        let store = memory_store().await;
        let mut repo = Players::new(store.as_ref());

        let player = repo.create(&player_create("  Virgil van Dijk ", Position::Defender)).await.unwrap();
        assert_eq!(player.name, "Virgil van Dijk");
        assert!(player.active);
        assert_eq!(player.created_at, player.updated_at);

        let fetched = repo.get_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Virgil van Dijk");
        assert_eq!(fetched.position, Position::Defender);
    }

    #[tokio::test]
    async fn test_field_validation_collects_every_error() {
        let store = memory_store().await;
        let mut repo = Players::new(store.as_ref());

        let request = PlayerCreate {
            name: "".to_string(),
            shirt_number: Some(100),
            height_cm: Some(80),
            date_of_birth: NaiveDate::from_ymd_opt(1890, 1, 1).unwrap(),
            ..player_create("x", Position::Forward)
        };
        let err = repo.create(&request).await.unwrap_err();
        match err {
            DbError::SchemaViolation { errors, .. } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "date_of_birth", "shirt_number", "height_cm"]);
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
        assert_eq!(repo.count(&DocumentFilter::new(0, 10)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = memory_store().await;
        let mut repo = Players::new(store.as_ref());
        let player = repo.create(&player_create("Trent", Position::Defender)).await.unwrap();

        let update = PlayerUpdate {
            shirt_number: Some(66),
            active: Some(false),
            ..Default::default()
        };
        let updated = repo.update(player.id, &update).await.unwrap();
        assert_eq!(updated.shirt_number, Some(66));
        assert!(!updated.active);
        assert_eq!(updated.name, "Trent");
        assert!(updated.updated_at >= player.updated_at);

        let invalid = PlayerUpdate {
            shirt_number: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(player.id, &invalid).await,
            Err(DbError::SchemaViolation { .. })
        ));
        assert!(matches!(
            repo.update(Uuid::new_v4(), &update).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_rejects_unknown_sort() {
        let store = memory_store().await;
        let mut repo = Players::new(store.as_ref());
        for (name, position) in [
            ("Alisson", Position::Goalkeeper),
            ("Salah", Position::Forward),
            ("Nunez", Position::Forward),
        ] {
            repo.create(&player_create(name, position)).await.unwrap();
        }

        let forwards = DocumentFilter::new(0, 10)
            .with_conditions(Filter::new().eq("position", json!("forward")))
            .sorted_by(Some(("name".to_string(), Direction::Ascending)));
        let found = repo.list(&forwards).await.unwrap();
        assert_eq!(found.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["Nunez", "Salah"]);
        assert_eq!(repo.count(&forwards).await.unwrap(), 2);

        let search = DocumentFilter::new(0, 10).with_conditions(Filter::new().with("name", Comparison::Like("ali".into())));
        assert_eq!(repo.list(&search).await.unwrap().len(), 1);

        let bad_sort = DocumentFilter::new(0, 10).sorted_by(Some(("password".to_string(), Direction::Ascending)));
        assert!(matches!(repo.list(&bad_sort).await, Err(DbError::CheckViolation { .. })));
    }

    #[tokio::test]
    async fn test_get_bulk_and_delete() {
        let store = memory_store().await;
        let mut repo = Players::new(store.as_ref());
        let a = repo.create(&player_create("Robertson", Position::Defender)).await.unwrap();
        let b = repo.create(&player_create("Gakpo", Position::Forward)).await.unwrap();

        let bulk = repo.get_bulk(vec![a.id, b.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(bulk.len(), 2);
        assert_eq!(bulk[&b.id].name, "Gakpo");

        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        assert!(repo.get_by_id(a.id).await.unwrap().is_none());
    }
}
