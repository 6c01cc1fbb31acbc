//! Fixture data for development stores.
//!
//! [`seed_store`] inserts a small, consistent data set through the repositories, so every
//! field rule and cross-document check applies to the fixtures exactly as it would to
//! client writes. Seeding runs only when the competitions collection is empty, which
//! makes it safe to call on every startup.

use crate::api::models::{
    competitions::{CompetitionCreate, CompetitionKind},
    contracts::ContractCreate,
    managers::ManagerCreate,
    matches::{Goal, MatchCreate, Side, Venue},
    player_stats::PlayerStatsCreate,
    players::{PlayerCreate, Position},
    seasons::SeasonCreate,
    stadiums::{StadiumCreate, Surface},
    trophies::TrophyCreate,
};
use crate::db::handlers::{
    Competitions, Contracts, DocumentFilter, Managers, Matches, PlayerStatistics, Players, Repository, Seasons, Stadiums,
    Trophies,
};
use crate::db::store::DocumentStore;
use anyhow::Context;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

struct SquadMember {
    name: &'static str,
    position: Position,
    nationality: &'static str,
    born: (i32, u32, u32),
    shirt: u32,
    height_cm: u32,
}

const SQUAD: &[SquadMember] = &[
    SquadMember {
        name: "Alisson Becker",
        position: Position::Goalkeeper,
        nationality: "Brazil",
        born: (1992, 10, 2),
        shirt: 1,
        height_cm: 193,
    },
    SquadMember {
        name: "Trent Alexander-Arnold",
        position: Position::Defender,
        nationality: "England",
        born: (1998, 10, 7),
        shirt: 66,
        height_cm: 180,
    },
    SquadMember {
        name: "Virgil van Dijk",
        position: Position::Defender,
        nationality: "Netherlands",
        born: (1991, 7, 8),
        shirt: 4,
        height_cm: 193,
    },
    SquadMember {
        name: "Ibrahima Konate",
        position: Position::Defender,
        nationality: "France",
        born: (1999, 5, 25),
        shirt: 5,
        height_cm: 194,
    },
    SquadMember {
        name: "Andrew Robertson",
        position: Position::Defender,
        nationality: "Scotland",
        born: (1994, 3, 11),
        shirt: 26,
        height_cm: 178,
    },
    SquadMember {
        name: "Ryan Gravenberch",
        position: Position::Midfielder,
        nationality: "Netherlands",
        born: (2002, 5, 16),
        shirt: 38,
        height_cm: 190,
    },
    SquadMember {
        name: "Alexis Mac Allister",
        position: Position::Midfielder,
        nationality: "Argentina",
        born: (1998, 12, 24),
        shirt: 10,
        height_cm: 174,
    },
    SquadMember {
        name: "Dominik Szoboszlai",
        position: Position::Midfielder,
        nationality: "Hungary",
        born: (2000, 10, 25),
        shirt: 8,
        height_cm: 186,
    },
    SquadMember {
        name: "Mohamed Salah",
        position: Position::Forward,
        nationality: "Egypt",
        born: (1992, 6, 15),
        shirt: 11,
        height_cm: 175,
    },
    SquadMember {
        name: "Luis Diaz",
        position: Position::Forward,
        nationality: "Colombia",
        born: (1997, 1, 13),
        shirt: 7,
        height_cm: 180,
    },
    SquadMember {
        name: "Cody Gakpo",
        position: Position::Forward,
        nationality: "Netherlands",
        born: (1999, 5, 7),
        shirt: 18,
        height_cm: 193,
    },
    SquadMember {
        name: "Darwin Nunez",
        position: Position::Forward,
        nationality: "Uruguay",
        born: (1999, 6, 24),
        shirt: 9,
        height_cm: 187,
    },
    SquadMember {
        name: "Curtis Jones",
        position: Position::Midfielder,
        nationality: "England",
        born: (2001, 1, 30),
        shirt: 17,
        height_cm: 185,
    },
];

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).with_context(|| format!("invalid fixture date {year}-{month}-{day}"))
}

/// Summary of a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub players: usize,
    pub matches: usize,
}

/// Insert the fixture set unless the store already holds competitions.
///
/// Returns `None` when seeding was skipped.
#[instrument(skip_all)]
pub async fn seed_store(store: &dyn DocumentStore) -> anyhow::Result<Option<SeedReport>> {
    let mut competitions = Competitions::new(store);
    if competitions.count(&DocumentFilter::new(0, 1)).await? > 0 {
        info!("Store already holds competitions, skipping seeding");
        return Ok(None);
    }

    info!("Seeding store with fixture data");

    let league = competitions
        .create(&CompetitionCreate {
            name: "Premier League".to_string(),
            kind: CompetitionKind::League,
            country: Some("England".to_string()),
        })
        .await?;
    let cup = competitions
        .create(&CompetitionCreate {
            name: "FA Cup".to_string(),
            kind: CompetitionKind::DomesticCup,
            country: Some("England".to_string()),
        })
        .await?;
    let europe = competitions
        .create(&CompetitionCreate {
            name: "UEFA Champions League".to_string(),
            kind: CompetitionKind::Continental,
            country: None,
        })
        .await?;

    let mut seasons = Seasons::new(store);
    let previous = seasons
        .create(&SeasonCreate {
            name: "2023/24".to_string(),
            start_year: 2023,
            end_year: 2024,
            competition_ids: vec![league.id, cup.id],
        })
        .await?;
    let current = seasons
        .create(&SeasonCreate {
            name: "2024/25".to_string(),
            start_year: 2024,
            end_year: 2025,
            competition_ids: vec![league.id, cup.id, europe.id],
        })
        .await?;

    let anfield = Stadiums::new(store)
        .create(&StadiumCreate {
            name: "Anfield".to_string(),
            city: "Liverpool".to_string(),
            capacity: 61_276,
            opened_year: Some(1884),
            surface: Surface::Hybrid,
        })
        .await?;

    Managers::new(store)
        .create(&ManagerCreate {
            name: "Arne Slot".to_string(),
            nationality: "Netherlands".to_string(),
            date_of_birth: date(1978, 9, 17)?,
            appointed_on: date(2024, 6, 1)?,
            departed_on: None,
            active: true,
        })
        .await?;

    let mut players = Players::new(store);
    let mut squad: Vec<Uuid> = Vec::with_capacity(SQUAD.len());
    for member in SQUAD {
        let (year, month, day) = member.born;
        let player = players
            .create(&PlayerCreate {
                name: member.name.to_string(),
                position: member.position,
                nationality: member.nationality.to_string(),
                date_of_birth: date(year, month, day)?,
                shirt_number: Some(member.shirt),
                height_cm: Some(member.height_cm),
                active: true,
            })
            .await?;
        squad.push(player.id);
    }
    debug!("Seeded {} players", squad.len());

    let salah = squad[8];
    let van_dijk = squad[2];
    let mut contracts = Contracts::new(store);
    for (player_id, start, end, wage) in [
        (salah, date(2025, 4, 11)?, date(2027, 6, 30)?, 400_000),
        (van_dijk, date(2025, 4, 17)?, date(2027, 6, 30)?, 350_000),
    ] {
        contracts
            .create(&ContractCreate {
                player_id,
                start_date: start,
                end_date: end,
                weekly_wage: Decimal::from(wage),
                release_clause: None,
            })
            .await?;
    }

    PlayerStatistics::new(store)
        .create(&PlayerStatsCreate {
            player_id: salah,
            season_id: current.id,
            competition_id: Some(league.id),
            appearances: 38,
            goals: 29,
            assists: 18,
            yellow_cards: 1,
            red_cards: 0,
            minutes_played: 3371,
        })
        .await?;
    PlayerStatistics::new(store)
        .create(&PlayerStatsCreate {
            player_id: salah,
            season_id: previous.id,
            competition_id: None,
            appearances: 44,
            goals: 25,
            assists: 14,
            yellow_cards: 2,
            red_cards: 0,
            minutes_played: 3300,
        })
        .await?;

    Trophies::new(store)
        .create(&TrophyCreate {
            name: "Premier League".to_string(),
            competition_id: league.id,
            season_id: current.id,
            won_on: Some(date(2025, 4, 27)?),
        })
        .await?;

    let kickoff = Utc
        .with_ymd_and_hms(2025, 4, 27, 16, 30, 0)
        .single()
        .context("invalid fixture kickoff")?;
    Matches::new(store)
        .create(&MatchCreate {
            competition_id: league.id,
            season_id: current.id,
            stadium_id: Some(anfield.id),
            opponent: "Tottenham Hotspur".to_string(),
            kickoff,
            venue: Venue::Home,
            lineup: squad[..11].to_vec(),
            substitutes: squad[11..].to_vec(),
            goals: vec![
                Goal { minute: 12, side: Side::Opponent, scorer_id: None, assist_id: None },
                Goal { minute: 16, side: Side::Club, scorer_id: Some(squad[9]), assist_id: Some(squad[7]) },
                Goal { minute: 24, side: Side::Club, scorer_id: Some(squad[6]), assist_id: None },
                Goal { minute: 34, side: Side::Club, scorer_id: Some(squad[10]), assist_id: Some(squad[8]) },
                Goal { minute: 63, side: Side::Club, scorer_id: Some(salah), assist_id: Some(squad[7]) },
            ],
        })
        .await?;

    let report = SeedReport {
        players: squad.len(),
        matches: 1,
    };
    info!(players = report.players, matches = report.matches, "Store seeded");
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::matches::{MatchResult, Score};
    use crate::test_utils::memory_store;

    #[test_log::test(tokio::test)]
    async fn test_seeding_is_idempotent() {
        let store = memory_store().await;

        let report = seed_store(store.as_ref()).await.unwrap().expect("first run seeds");
        assert_eq!(report.players, SQUAD.len());

        assert_eq!(seed_store(store.as_ref()).await.unwrap(), None);

        let all = DocumentFilter::new(0, 100);
        assert_eq!(Competitions::new(store.as_ref()).count(&all).await.unwrap(), 3);
        assert_eq!(Players::new(store.as_ref()).count(&all).await.unwrap(), SQUAD.len() as u64);

        let matches = Matches::new(store.as_ref()).list(&all).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, Score { club: 4, opponent: 1 });
        assert_eq!(matches[0].result, MatchResult::Win);
    }
}
