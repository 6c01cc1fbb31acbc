//! Common type definitions.
//!
//! # ID Types
//!
//! All entity IDs are UUIDs wrapped in type aliases for readability:
//!
//! - [`PlayerId`], [`ManagerId`], [`StadiumId`], [`CompetitionId`], [`SeasonId`]
//! - [`ContractId`], [`TrophyId`], [`PlayerStatsId`], [`MatchId`]
//!
//! Documents store their IDs as hyphenated strings, so filters built against ID
//! fields compare strings.
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging
//!
//! # Timestamps
//!
//! Stored timestamps always carry nine fractional digits (see [`timestamp`]) so that string
//! comparison in either store orders them by time.

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type PlayerId = Uuid;
pub type ManagerId = Uuid;
pub type StadiumId = Uuid;
pub type CompetitionId = Uuid;
pub type SeasonId = Uuid;
pub type ContractId = Uuid;
pub type TrophyId = Uuid;
pub type PlayerStatsId = Uuid;
pub type MatchId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Resources exposed by the API, used for error messages and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Players,
    Managers,
    Stadiums,
    Competitions,
    Seasons,
    Contracts,
    Trophies,
    PlayerStats,
    Matches,
}

impl Resource {
    /// Singular human-readable name, e.g. "Player"
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Players => "Player",
            Resource::Managers => "Manager",
            Resource::Stadiums => "Stadium",
            Resource::Competitions => "Competition",
            Resource::Seasons => "Season",
            Resource::Contracts => "Contract",
            Resource::Trophies => "Trophy",
            Resource::PlayerStats => "Player stats",
            Resource::Matches => "Match",
        }
    }
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Players,
        Resource::Managers,
        Resource::Stadiums,
        Resource::Competitions,
        Resource::Seasons,
        Resource::Contracts,
        Resource::Trophies,
        Resource::PlayerStats,
        Resource::Matches,
    ];

    /// Look up a resource by its collection name
    pub fn from_collection(name: &str) -> Option<Resource> {
        Resource::ALL.into_iter().find(|r| r.to_string() == name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Players => "players",
            Resource::Managers => "managers",
            Resource::Stadiums => "stadiums",
            Resource::Competitions => "competitions",
            Resource::Seasons => "seasons",
            Resource::Contracts => "contracts",
            Resource::Trophies => "trophies",
            Resource::PlayerStats => "player_stats",
            Resource::Matches => "matches",
        };
        f.write_str(name)
    }
}

/// Serde adapter for stored `DateTime<Utc>` fields: RFC 3339, UTC `Z`, nanosecond precision.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_abbrev_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }

    #[test]
    fn test_resource_names_match_collections() {
        assert_eq!(Resource::PlayerStats.to_string(), "player_stats");
        assert_eq!(Resource::Matches.singular(), "Match");
        assert_eq!(Resource::from_collection("trophies"), Some(Resource::Trophies));
        assert_eq!(Resource::from_collection("users"), None);
    }

    #[test]
    fn test_timestamps_sort_as_strings() {
        let whole = Utc.with_ymd_and_hms(2025, 2, 12, 19, 30, 0).unwrap();
        let later = whole + chrono::Duration::milliseconds(500);
        assert_eq!(timestamp::format(&whole), "2025-02-12T19:30:00.000000000Z");
        assert_eq!(timestamp::format(&later), "2025-02-12T19:30:00.500000000Z");
        assert!(timestamp::format(&whole) < timestamp::format(&later));
    }
}
