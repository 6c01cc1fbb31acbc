//! Database repository for stadiums.

use crate::api::models::stadiums::{StadiumCreate, StadiumUpdate};
use crate::db::handlers::documents::{Documents, Entity};
use crate::db::models::stadiums::StadiumDBResponse;
use crate::db::schema;
use crate::db::store::CollectionSpec;
use crate::validation::{FieldErrors, current_year};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type Stadiums<'a> = Documents<'a, StadiumDBResponse>;

#[async_trait::async_trait]
impl Entity for StadiumDBResponse {
    type CreateRequest = StadiumCreate;
    type UpdateRequest = StadiumUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "stadiums",
        unique: &[&["name"]],
        validator: schema::stadiums,
    };

    const SORTABLE: &'static [&'static str] = &["name", "city", "capacity", "opened_year", "created_at", "updated_at"];

    fn from_create(id: Uuid, request: &StadiumCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            city: request.city.trim().to_string(),
            capacity: request.capacity,
            opened_year: request.opened_year,
            surface: request.surface,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &StadiumUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(city) = &request.city {
            self.city = city.trim().to_string();
        }
        if let Some(capacity) = request.capacity {
            self.capacity = capacity;
        }
        if request.opened_year.is_some() {
            self.opened_year = request.opened_year;
        }
        if let Some(surface) = request.surface {
            self.surface = surface;
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
        errors.length("city", &self.city, 1, 100);
        errors.range("capacity", self.capacity, 1, 200_000);
        errors.optional_range("opened_year", self.opened_year, 1850, current_year());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::stadiums::Surface;
    use crate::db::errors::DbError;
    use crate::db::handlers::Repository;
    use crate::test_utils::{memory_store, stadium_create};

    #[tokio::test]
    async fn test_stadium_names_are_unique() {
        let store = memory_store().await;
        let mut repo = Stadiums::new(store.as_ref());

        let anfield = repo.create(&stadium_create("Anfield")).await.unwrap();
        assert_eq!(anfield.surface, Surface::Grass);

        let err = repo.create(&stadium_create("Anfield")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref collection, .. } if collection == "stadiums"));

        // Renaming onto another stadium's name is also a conflict
        let other = repo.create(&stadium_create("Goodison Park")).await.unwrap();
        let rename = StadiumUpdate {
            name: Some("Anfield".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(other.id, &rename).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_capacity_and_opening_year_limits() {
        let store = memory_store().await;
        let mut repo = Stadiums::new(store.as_ref());

        let request = StadiumCreate {
            capacity: 250_000,
            opened_year: Some(1700),
            ..stadium_create("Too Big")
        };
        match repo.create(&request).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["capacity", "opened_year"]);
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }
}
