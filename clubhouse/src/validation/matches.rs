//! Consistency checks for match documents.
//!
//! These run against related documents the repository has already loaded, so they are
//! pure and synchronous. The repository calls them in this order and stops at the first
//! failure:
//!
//! 1. [`season_includes_competition`]
//! 2. [`kickoff_within_season`]
//! 3. [`no_duplicate_players`]
//! 4. [`players_active`]
//! 5. [`goals_consistent`]
//!
//! and finally derives the score with [`derive_score`].

use crate::api::models::matches::{Goal, MatchResult, Score, Side};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchInconsistency {
    #[error("season {season_id} does not include competition {competition_id}")]
    CompetitionNotInSeason { season_id: Uuid, competition_id: Uuid },

    #[error("kickoff year {year} is outside season years {start_year}-{end_year}")]
    KickoffOutsideSeason { year: i32, start_year: i32, end_year: i32 },

    #[error("player {0} appears more than once in the lineup and substitutes")]
    DuplicatePlayer(Uuid),

    #[error("player {0} is not active")]
    InactivePlayer(Uuid),

    #[error("goals[{index}]: club goals must name a scorer")]
    MissingScorer { index: usize },

    #[error("goals[{index}]: scorer {player_id} is not in the lineup or substitutes")]
    ScorerNotInSquad { index: usize, player_id: Uuid },

    #[error("goals[{index}]: assister {player_id} is not in the lineup or substitutes")]
    AssisterNotInSquad { index: usize, player_id: Uuid },

    #[error("goals[{index}]: opponent goals cannot name a scorer or assister")]
    OpponentGoalWithPlayer { index: usize },

    #[error("goals[{index}]: a player cannot assist their own goal")]
    SelfAssist { index: usize },
}

pub fn season_includes_competition(
    season_id: Uuid,
    season_competitions: &[Uuid],
    competition_id: Uuid,
) -> Result<(), MatchInconsistency> {
    if season_competitions.contains(&competition_id) {
        Ok(())
    } else {
        Err(MatchInconsistency::CompetitionNotInSeason {
            season_id,
            competition_id,
        })
    }
}

pub fn kickoff_within_season(kickoff: DateTime<Utc>, start_year: i32, end_year: i32) -> Result<(), MatchInconsistency> {
    let year = kickoff.year();
    if (start_year..=end_year).contains(&year) {
        Ok(())
    } else {
        Err(MatchInconsistency::KickoffOutsideSeason {
            year,
            start_year,
            end_year,
        })
    }
}

pub fn no_duplicate_players(lineup: &[Uuid], substitutes: &[Uuid]) -> Result<(), MatchInconsistency> {
    let mut seen = HashSet::new();
    match lineup.iter().chain(substitutes).find(|id| !seen.insert(**id)) {
        Some(id) => Err(MatchInconsistency::DuplicatePlayer(*id)),
        None => Ok(()),
    }
}

/// Every squad player must be active. Takes `(player_id, active)` pairs in squad order.
pub fn players_active(players: impl IntoIterator<Item = (Uuid, bool)>) -> Result<(), MatchInconsistency> {
    match players.into_iter().find(|(_, active)| !active) {
        Some((id, _)) => Err(MatchInconsistency::InactivePlayer(id)),
        None => Ok(()),
    }
}

pub fn goals_consistent(goals: &[Goal], lineup: &[Uuid], substitutes: &[Uuid]) -> Result<(), MatchInconsistency> {
    let in_squad = |id: &Uuid| lineup.contains(id) || substitutes.contains(id);

    for (index, goal) in goals.iter().enumerate() {
        match goal.side {
            Side::Opponent => {
                if goal.scorer_id.is_some() || goal.assist_id.is_some() {
                    return Err(MatchInconsistency::OpponentGoalWithPlayer { index });
                }
            }
            Side::Club => {
                let scorer = goal.scorer_id.ok_or(MatchInconsistency::MissingScorer { index })?;
                if !in_squad(&scorer) {
                    return Err(MatchInconsistency::ScorerNotInSquad {
                        index,
                        player_id: scorer,
                    });
                }
                if let Some(assister) = goal.assist_id {
                    if !in_squad(&assister) {
                        return Err(MatchInconsistency::AssisterNotInSquad {
                            index,
                            player_id: assister,
                        });
                    }
                    if assister == scorer {
                        return Err(MatchInconsistency::SelfAssist { index });
                    }
                }
            }
        }
    }
    Ok(())
}

pub fn derive_score(goals: &[Goal]) -> (Score, MatchResult) {
    let club = goals.iter().filter(|g| g.side == Side::Club).count() as u32;
    let opponent = goals.len() as u32 - club;
    let result = match club.cmp(&opponent) {
        std::cmp::Ordering::Greater => MatchResult::Win,
        std::cmp::Ordering::Equal => MatchResult::Draw,
        std::cmp::Ordering::Less => MatchResult::Loss,
    };
    (Score { club, opponent }, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn club_goal(minute: u32, scorer: Uuid, assist: Option<Uuid>) -> Goal {
        Goal {
            minute,
            side: Side::Club,
            scorer_id: Some(scorer),
            assist_id: assist,
        }
    }

    fn opponent_goal(minute: u32) -> Goal {
        Goal {
            minute,
            side: Side::Opponent,
            scorer_id: None,
            assist_id: None,
        }
    }

    #[test]
    fn test_season_bounds() {
        let kickoff = Utc.with_ymd_and_hms(2024, 2, 10, 15, 0, 0).unwrap();
        assert!(kickoff_within_season(kickoff, 2023, 2024).is_ok());
        assert!(kickoff_within_season(kickoff, 2024, 2024).is_ok());
        assert_eq!(
            kickoff_within_season(kickoff, 2022, 2023),
            Err(MatchInconsistency::KickoffOutsideSeason {
                year: 2024,
                start_year: 2022,
                end_year: 2023
            })
        );
    }

    #[test]
    fn test_season_includes_competition() {
        let (season, league, cup) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert!(season_includes_competition(season, &[league], league).is_ok());
        assert!(matches!(
            season_includes_competition(season, &[league], cup),
            Err(MatchInconsistency::CompetitionNotInSeason { .. })
        ));
    }

    #[test]
    fn test_duplicate_players_across_lineup_and_substitutes() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert!(no_duplicate_players(&[a, b], &[c]).is_ok());
        assert_eq!(no_duplicate_players(&[a, b], &[a]), Err(MatchInconsistency::DuplicatePlayer(a)));
        assert_eq!(no_duplicate_players(&[b, b], &[]), Err(MatchInconsistency::DuplicatePlayer(b)));
    }

    #[test]
    fn test_inactive_players_rejected() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(players_active([(a, true), (b, true)]).is_ok());
        assert_eq!(players_active([(a, true), (b, false)]), Err(MatchInconsistency::InactivePlayer(b)));
    }

    #[test]
    fn test_goal_membership_rules() {
        let (starter, sub, outsider) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let lineup = [starter];
        let subs = [sub];

        let ok = [club_goal(12, starter, Some(sub)), opponent_goal(40), club_goal(88, sub, None)];
        assert!(goals_consistent(&ok, &lineup, &subs).is_ok());

        let missing = [Goal {
            scorer_id: None,
            ..club_goal(5, starter, None)
        }];
        assert_eq!(
            goals_consistent(&missing, &lineup, &subs),
            Err(MatchInconsistency::MissingScorer { index: 0 })
        );

        let outside = [opponent_goal(3), club_goal(5, outsider, None)];
        assert_eq!(
            goals_consistent(&outside, &lineup, &subs),
            Err(MatchInconsistency::ScorerNotInSquad {
                index: 1,
                player_id: outsider
            })
        );

        let bad_assist = [club_goal(5, starter, Some(outsider))];
        assert!(matches!(
            goals_consistent(&bad_assist, &lineup, &subs),
            Err(MatchInconsistency::AssisterNotInSquad { index: 0, .. })
        ));

        let own_assist = [club_goal(5, starter, Some(starter))];
        assert_eq!(
            goals_consistent(&own_assist, &lineup, &subs),
            Err(MatchInconsistency::SelfAssist { index: 0 })
        );

        let named_opponent = [Goal {
            scorer_id: Some(starter),
            ..opponent_goal(70)
        }];
        assert_eq!(
            goals_consistent(&named_opponent, &lineup, &subs),
            Err(MatchInconsistency::OpponentGoalWithPlayer { index: 0 })
        );
    }

    #[test]
    fn test_score_derivation() {
        let scorer = Uuid::new_v4();
        assert_eq!(derive_score(&[]), (Score { club: 0, opponent: 0 }, MatchResult::Draw));

        let (score, result) = derive_score(&[club_goal(1, scorer, None), opponent_goal(2), club_goal(3, scorer, None)]);
        assert_eq!(score, Score { club: 2, opponent: 1 });
        assert_eq!(result, MatchResult::Win);

        let (_, result) = derive_score(&[opponent_goal(90)]);
        assert_eq!(result, MatchResult::Loss);
    }
}
