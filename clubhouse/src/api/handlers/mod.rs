//! HTTP request handlers for the REST surface under `/api/v1`.
//!
//! One module per resource. Each exposes list, create, get, update and delete handlers;
//! some add nested listings (a player's contracts, a season's matches). Handlers hand
//! the request to the matching repository in [`crate::db::handlers`] and return
//! [`crate::errors::Error`], which renders the status code and JSON error body.

pub mod competitions;
pub mod contracts;
pub mod managers;
pub mod matches;
pub mod player_stats;
pub mod players;
pub mod seasons;
pub mod stadiums;
pub mod trophies;
