//! Stored document models.
//!
//! Each struct here is the exact JSON shape of a document in its collection. Stored
//! models are distinct from the API models in [`crate::api::models`], which convert from
//! them with `From`:
//!
//! ```ignore
//! use clubhouse::api::models::players::PlayerResponse;
//!
//! let response: PlayerResponse = stored_player.into();
//! ```

pub mod competitions;
pub mod contracts;
pub mod managers;
pub mod matches;
pub mod player_stats;
pub mod players;
pub mod seasons;
pub mod stadiums;
pub mod trophies;
