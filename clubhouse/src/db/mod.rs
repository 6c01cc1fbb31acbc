//! Database layer for data persistence and access.
//!
//! Documents live in a [`DocumentStore`](store::DocumentStore), either MongoDB or an
//! in-process memory store. Repositories in [`handlers`] sit on top of the store and own
//! every rule a document must satisfy before it is written.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ REST / GraphQL       │  (api::handlers, graphql)
//! └──────────┬───────────┘
//!            │
//!            ↓
//! ┌──────────────────────┐
//! │ Repositories         │  (db::handlers - validation, references, derived fields)
//! └──────────┬───────────┘
//!            │
//!            ↓
//! ┌──────────────────────┐
//! │ DocumentStore        │  (db::mongo / db::memory)
//! └──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Stored document structures
//! - [`filter`]: Query predicates understood by both backends
//! - [`schema`]: `$jsonSchema` validators installed in MongoDB
//! - [`errors`]: Database-specific error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use clubhouse::db::handlers::{Players, Repository};
//!
//! async fn example(store: &clubhouse::db::store::Store) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut players = Players::new(store.as_ref());
//!     let player = players.create(&create_request).await?;
//!     println!("Created {}", player.name);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod filter;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod schema;
pub mod store;

use crate::config::DatabaseConfig;
use crate::db::handlers::all_collections;
use crate::db::memory::MemoryStore;
use crate::db::mongo::MongoStore;
use crate::db::store::Store;
use std::sync::Arc;
use tracing::info;

/// Connect to the configured backend and make sure every collection exists.
pub async fn connect(config: &DatabaseConfig) -> errors::Result<Store> {
    let store: Store = match config {
        DatabaseConfig::Memory => {
            info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        DatabaseConfig::Mongo(settings) => Arc::new(MongoStore::connect(settings).await?),
    };
    ensure_collections(&store).await?;
    Ok(store)
}

pub async fn ensure_collections(store: &Store) -> errors::Result<()> {
    for spec in all_collections() {
        store.ensure_collection(&spec).await?;
    }
    Ok(())
}
