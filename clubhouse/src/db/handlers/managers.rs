//! Database repository for managers.

use crate::api::models::managers::{ManagerCreate, ManagerUpdate};
use crate::db::handlers::documents::{Documents, Entity};
use crate::db::models::managers::ManagerDBResponse;
use crate::db::schema;
use crate::db::store::CollectionSpec;
use crate::validation::FieldErrors;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type Managers<'a> = Documents<'a, ManagerDBResponse>;

#[async_trait::async_trait]
impl Entity for ManagerDBResponse {
    type CreateRequest = ManagerCreate;
    type UpdateRequest = ManagerUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "managers",
        unique: &[],
        validator: schema::managers,
    };

    const SORTABLE: &'static [&'static str] = &[
        "name",
        "nationality",
        "date_of_birth",
        "appointed_on",
        "departed_on",
        "created_at",
        "updated_at",
    ];

    fn from_create(id: Uuid, request: &ManagerCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name.trim().to_string(),
            nationality: request.nationality.trim().to_string(),
            date_of_birth: request.date_of_birth,
            appointed_on: request.appointed_on,
            departed_on: request.departed_on,
            active: request.active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &ManagerUpdate) {
        if let Some(name) = &request.name {
            self.name = name.trim().to_string();
        }
        if let Some(nationality) = &request.nationality {
            self.nationality = nationality.trim().to_string();
        }
        if let Some(date_of_birth) = request.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(appointed_on) = request.appointed_on {
            self.appointed_on = appointed_on;
        }
        if request.departed_on.is_some() {
            self.departed_on = request.departed_on;
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
        errors.check(
            self.appointed_on >= self.date_of_birth,
            "appointed_on",
            "must not be before date_of_birth",
        );
        if let Some(departed_on) = self.departed_on {
            errors.check(departed_on >= self.appointed_on, "departed_on", "must not be before appointed_on");
            errors.check(!self.active, "active", "an active manager cannot have a departure date");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::errors::DbError;
    use crate::db::handlers::Repository;
    use crate::test_utils::{manager_create, memory_store};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_manager_date_rules() {
        let store = memory_store().await;
        let mut repo = Managers::new(store.as_ref());

        let manager = repo.create(&manager_create("Arne Slot")).await.unwrap();
        assert!(manager.active);
        assert!(manager.departed_on.is_none());

        // Departure while still marked active
        let update = ManagerUpdate {
            departed_on: Some(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()),
            ..Default::default()
        };
        match repo.update(manager.id, &update).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "active");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }

        let update = ManagerUpdate {
            departed_on: Some(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()),
            active: Some(false),
            ..Default::default()
        };
        let departed = repo.update(manager.id, &update).await.unwrap();
        assert!(!departed.active);

        let before_appointment = ManagerUpdate {
            departed_on: Some(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(manager.id, &before_appointment).await,
            Err(DbError::SchemaViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_appointment_before_birth_rejected() {
        let store = memory_store().await;
        let mut repo = Managers::new(store.as_ref());

        let request = ManagerCreate {
            appointed_on: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            ..manager_create("Too Early")
        };
        match repo.create(&request).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => assert_eq!(errors[0].field, "appointed_on"),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }
}
