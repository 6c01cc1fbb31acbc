//! Repository implementations for document access.
//!
//! Every collection is served by the generic [`Documents`] repository, specialised by the
//! stored model's [`Entity`] implementation. The aliases below name one repository per
//! collection and carry the extra relationship queries.
//!
//! # Common Pattern
//!
//! ```ignore
//! use clubhouse::db::handlers::{Players, Repository, DocumentFilter};
//!
//! async fn example(store: &dyn clubhouse::db::store::DocumentStore) -> clubhouse::db::errors::Result<()> {
//!     let mut repo = Players::new(store);
//!     let (players, total) = repo.page(&DocumentFilter::new(0, 10)).await?;
//!     Ok(())
//! }
//! ```

pub mod competitions;
pub mod contracts;
pub mod documents;
pub mod managers;
pub mod matches;
pub mod player_stats;
pub mod players;
pub mod repository;
pub mod seasons;
pub mod stadiums;
pub mod trophies;

pub use competitions::Competitions;
pub use contracts::Contracts;
pub use documents::{DocumentFilter, Documents, Entity};
pub use managers::Managers;
pub use matches::Matches;
pub use player_stats::PlayerStatistics;
pub use players::Players;
pub use repository::Repository;
pub use seasons::Seasons;
pub use stadiums::Stadiums;
pub use trophies::Trophies;

use crate::db::models::{
    competitions::CompetitionDBResponse, contracts::ContractDBResponse, managers::ManagerDBResponse, matches::MatchDBResponse,
    player_stats::PlayerStatsDBResponse, players::PlayerDBResponse, seasons::SeasonDBResponse, stadiums::StadiumDBResponse,
    trophies::TrophyDBResponse,
};
use crate::db::store::CollectionSpec;

/// Every collection the application stores, in dependency order.
pub fn all_collections() -> [CollectionSpec; 9] {
    [
        PlayerDBResponse::COLLECTION,
        ManagerDBResponse::COLLECTION,
        StadiumDBResponse::COLLECTION,
        CompetitionDBResponse::COLLECTION,
        SeasonDBResponse::COLLECTION,
        ContractDBResponse::COLLECTION,
        TrophyDBResponse::COLLECTION,
        PlayerStatsDBResponse::COLLECTION,
        MatchDBResponse::COLLECTION,
    ]
}
