//! MongoDB-backed document store.
//!
//! Documents are stored with `_id` equal to their string `id`, so lookups by ID hit the
//! primary key index. Each collection is created with a `$jsonSchema` validator and a unique
//! index per unique key set; existing collections get their validator refreshed via
//! `collMod`.

use crate::config::MongoSettings;
use crate::db::errors::{DbError, Result};
use crate::db::filter::{Filter, FindOptions};
use crate::db::store::{CollectionSpec, DocumentStore};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Bson, Document, doc},
    options::{ClientOptions, IndexOptions},
};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect using the configured URI and database name.
    pub async fn connect(settings: &MongoSettings) -> Result<Self> {
        let mut options = ClientOptions::parse(&settings.url).await?;
        options.app_name = Some("clubhouse".to_string());
        options.connect_timeout = Some(settings.connect_timeout);
        options.server_selection_timeout = Some(settings.connect_timeout);
        options.max_pool_size = Some(settings.max_pool_size);

        let client = Client::with_options(options)?;
        let store = Self {
            db: client.database(&settings.database),
        };
        store.ping().await?;
        info!("Connected to MongoDB database '{}'", settings.database);
        Ok(store)
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

/// JSON document to BSON, keyed by `_id`.
fn to_stored(document: Value) -> Result<Document> {
    let mut stored = mongodb::bson::to_document(&document)?;
    if let Some(id) = stored.get("id").cloned() {
        stored.insert("_id", id);
    }
    Ok(stored)
}

/// BSON back to the JSON shape the repositories expect.
fn from_stored(mut stored: Document) -> Result<Value> {
    stored.remove("_id");
    Ok(mongodb::bson::from_document::<Value>(stored)?)
}

/// Attach the collection name to errors raised by the driver.
fn in_collection(err: mongodb::error::Error, collection: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { fields, message, .. } => DbError::UniqueViolation {
            collection: collection.to_string(),
            fields,
            message,
        },
        DbError::CheckViolation { message, .. } => DbError::CheckViolation {
            collection: collection.to_string(),
            message,
        },
        other => other,
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    #[instrument(skip(self, spec), fields(collection = spec.name), err)]
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<()> {
        let existing = self.db.list_collection_names().await?;
        let validator = (spec.validator)();

        if existing.iter().any(|name| name == spec.name) {
            self.db
                .run_command(doc! { "collMod": spec.name, "validator": validator, "validationLevel": "strict" })
                .await?;
            debug!("Refreshed validator for {}", spec.name);
        } else {
            self.db.create_collection(spec.name).validator(validator).await?;
            debug!("Created collection {}", spec.name);
        }

        for key_set in spec.unique {
            let keys: Document = key_set.iter().map(|field| (field.to_string(), Bson::Int32(1))).collect();
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection(spec.name).create_index(index).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, spec, document), fields(collection = spec.name), err)]
    async fn insert(&self, spec: &CollectionSpec, document: Value) -> Result<()> {
        let stored = to_stored(document)?;
        self.collection(spec.name)
            .insert_one(stored)
            .await
            .map_err(|e| in_collection(e, spec.name))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.collection(collection)
            .find_one(doc! { "_id": id })
            .await?
            .map(from_stored)
            .transpose()
    }

    #[instrument(skip(self, filter, options), err)]
    async fn find(&self, collection: &str, filter: &Filter, options: &FindOptions) -> Result<Vec<Value>> {
        let coll = self.collection(collection);
        let mut query = coll
            .find(filter.to_document())
            .sort(options.sort_document())
            .skip(options.skip);
        if let Some(limit) = options.limit {
            query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let documents: Vec<Document> = query.await?.try_collect().await?;
        documents.into_iter().map(from_stored).collect()
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        Ok(self.collection(collection).count_documents(filter.to_document()).await?)
    }

    #[instrument(skip(self, spec, document), fields(collection = spec.name), err)]
    async fn replace(&self, spec: &CollectionSpec, id: &str, document: Value) -> Result<bool> {
        let stored = to_stored(document)?;
        let result = self
            .collection(spec.name)
            .replace_one(doc! { "_id": id }, stored)
            .await
            .map_err(|e| in_collection(e, spec.name))?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let result = self.collection(collection).delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_documents_use_id_as_primary_key() {
        let stored = to_stored(json!({"id": "p1", "name": "Mo Salah", "shirt_number": 11})).unwrap();
        assert_eq!(stored.get_str("_id").unwrap(), "p1");
        assert_eq!(stored.get_str("id").unwrap(), "p1");

        let value = from_stored(stored).unwrap();
        assert_eq!(value, json!({"id": "p1", "name": "Mo Salah", "shirt_number": 11}));
    }

    #[test_log::test(tokio::test)]
    async fn test_find_reports_unreachable_server() {
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:1").await.unwrap();
        options.server_selection_timeout = Some(std::time::Duration::from_millis(200));
        let store = MongoStore::from_database(Client::with_options(options).unwrap().database("clubhouse"));

        let options = FindOptions::page(5, 10).sorted_by("kickoff", crate::db::filter::Direction::Descending);
        let result = store.find("matches", &Filter::new().eq("venue", "home"), &options).await;
        assert!(matches!(result, Err(DbError::Other(_))));
    }
}
