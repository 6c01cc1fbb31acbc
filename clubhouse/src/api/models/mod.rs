//! API request and response data models.
//!
//! These types define the public contract of both front ends: every create and update
//! struct is a REST request body and a GraphQL input object, and every response struct is
//! a REST response body and a GraphQL object. All models carry `utoipa` annotations for
//! the generated OpenAPI document.
//!
//! - [`players`], [`managers`], [`stadiums`], [`competitions`], [`seasons`]
//! - [`contracts`], [`trophies`], [`player_stats`], [`matches`]
//! - [`pagination`]: shared list parameters and the paginated envelope

pub mod competitions;
pub mod contracts;
pub mod managers;
pub mod matches;
pub mod pagination;
pub mod player_stats;
pub mod players;
pub mod seasons;
pub mod stadiums;
pub mod trophies;
