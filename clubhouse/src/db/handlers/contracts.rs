//! Database repository for player contracts.

use crate::api::models::contracts::{ContractCreate, ContractUpdate};
use crate::db::errors::Result;
use crate::db::filter::{Comparison, Filter};
use crate::db::handlers::documents::{Documents, Entity, require};
use crate::db::models::contracts::ContractDBResponse;
use crate::db::models::players::PlayerDBResponse;
use crate::db::schema;
use crate::db::store::{CollectionSpec, DocumentStore};
use crate::validation::FieldErrors;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

pub type Contracts<'a> = Documents<'a, ContractDBResponse>;

#[async_trait::async_trait]
impl Entity for ContractDBResponse {
    type CreateRequest = ContractCreate;
    type UpdateRequest = ContractUpdate;

    const COLLECTION: CollectionSpec = CollectionSpec {
        name: "contracts",
        unique: &[],
        validator: schema::contracts,
    };

    const SORTABLE: &'static [&'static str] = &[
        "start_date",
        "end_date",
        "weekly_wage",
        "release_clause",
        "created_at",
        "updated_at",
    ];

    fn from_create(id: Uuid, request: &ContractCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            player_id: request.player_id,
            start_date: request.start_date,
            end_date: request.end_date,
            weekly_wage: request.weekly_wage,
            release_clause: request.release_clause,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, request: &ContractUpdate) {
        if let Some(player_id) = request.player_id {
            self.player_id = player_id;
        }
        if let Some(start_date) = request.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            self.end_date = end_date;
        }
        if let Some(weekly_wage) = request.weekly_wage {
            self.weekly_wage = weekly_wage;
        }
        if request.release_clause.is_some() {
            self.release_clause = request.release_clause;
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn validate(&self, errors: &mut FieldErrors) {
        errors.check(self.end_date > self.start_date, "end_date", "must be after start_date");
        errors.check(self.weekly_wage >= Decimal::ZERO, "weekly_wage", "must not be negative");
        if let Some(release_clause) = self.release_clause {
            errors.check(release_clause >= Decimal::ZERO, "release_clause", "must not be negative");
        }
    }

    async fn prepare(&mut self, store: &dyn DocumentStore) -> Result<()> {
        require::<PlayerDBResponse>(store, Self::COLLECTION.name, "player_id", self.player_id).await?;
        Ok(())
    }
}

/// Narrow `conditions` to contracts running on `date`, both ends inclusive.
pub fn active_on(conditions: Filter, date: NaiveDate) -> Filter {
    // ISO dates order lexically
    conditions
        .with("start_date", Comparison::Lte(json!(date)))
        .with("end_date", Comparison::Gte(json!(date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::players::Position;
    use crate::db::errors::DbError;
    use crate::db::handlers::documents::DocumentFilter;
    use crate::db::handlers::{Players, Repository};
    use crate::test_utils::{contract_create, memory_store, player_create};

    #[tokio::test]
    async fn test_contract_requires_player() {
        let store = memory_store().await;
        let mut repo = Contracts::new(store.as_ref());

        match repo.create(&contract_create(Uuid::new_v4())).await {
            Err(DbError::ForeignKeyViolation { collection, field, .. }) => {
                assert_eq!(collection, "contracts");
                assert_eq!(field, "player_id");
            }
            other => panic!("expected reference violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_contract_dates_and_money() {
        let store = memory_store().await;
        let player = Players::new(store.as_ref())
            .create(&player_create("Alisson", Position::Goalkeeper))
            .await
            .unwrap();
        let mut repo = Contracts::new(store.as_ref());

        let contract = repo.create(&contract_create(player.id)).await.unwrap();
        let running = |y, m, d| active_on(Filter::new(), NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(repo.find_all(&running(2025, 1, 1)).await.unwrap().len(), 1);
        assert_eq!(repo.find_all(&running(2027, 6, 30)).await.unwrap().len(), 1);
        assert!(repo.find_all(&running(2040, 1, 1)).await.unwrap().is_empty());

        let backwards = ContractCreate {
            end_date: contract.start_date,
            weekly_wage: Decimal::from(-1),
            ..contract_create(player.id)
        };
        match repo.create(&backwards).await.unwrap_err() {
            DbError::SchemaViolation { errors, .. } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["end_date", "weekly_wage"]);
            }
            other => panic!("expected schema violation, got {other:?}"),
        }

        let raise = ContractUpdate {
            weekly_wage: Some(Decimal::new(25000050, 2)),
            ..Default::default()
        };
        let updated = repo.update(contract.id, &raise).await.unwrap();
        assert_eq!(updated.weekly_wage, Decimal::new(2500005, 1));
        assert_eq!(updated.player_id, player.id);

        let (contracts, total) = Players::new(store.as_ref())
            .contracts_for(player.id, DocumentFilter::new(0, 10))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(contracts[0].id, contract.id);
    }
}
