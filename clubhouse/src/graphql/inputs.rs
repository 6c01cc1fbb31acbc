//! Per-entity filter inputs and the shared sort input for GraphQL list queries.

use super::filters::{
    BoolFilter, CompetitionKindFilter, DateFilter, DateTimeFilter, FloatFilter, IdFilter, IntFilter, MatchResultFilter,
    PositionFilter, StringFilter, SurfaceFilter, VenueFilter, add,
};
use crate::db::filter::{Direction, Filter};
use async_graphql::{Enum, InputObject};

/// A filter input that compiles to store conditions.
pub trait EntityFilter {
    fn conditions(&self) -> Filter;
}

/// Conditions for an optional filter argument; no filter matches everything.
pub fn conditions_of<F: EntityFilter>(filter: &Option<F>) -> Filter {
    filter.as_ref().map(EntityFilter::conditions).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Enum)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for Direction {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Direction::Ascending,
            SortDirection::Desc => Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct SortInput {
    /// Stored field name, e.g. `date_of_birth` or `kickoff`
    pub field: String,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl SortInput {
    pub fn key(&self) -> (String, Direction) {
        (self.field.clone(), self.direction.into())
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct PlayerFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub position: Option<PositionFilter>,
    pub nationality: Option<StringFilter>,
    pub date_of_birth: Option<DateFilter>,
    pub shirt_number: Option<IntFilter>,
    pub height_cm: Option<IntFilter>,
    pub active: Option<BoolFilter>,
    pub created_at: Option<DateTimeFilter>,
}

impl EntityFilter for PlayerFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "position", &self.position);
        add(&mut filter, "nationality", &self.nationality);
        add(&mut filter, "date_of_birth", &self.date_of_birth);
        add(&mut filter, "shirt_number", &self.shirt_number);
        add(&mut filter, "height_cm", &self.height_cm);
        add(&mut filter, "active", &self.active);
        add(&mut filter, "created_at", &self.created_at);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct ManagerFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub nationality: Option<StringFilter>,
    pub date_of_birth: Option<DateFilter>,
    pub appointed_on: Option<DateFilter>,
    pub departed_on: Option<DateFilter>,
    pub active: Option<BoolFilter>,
}

impl EntityFilter for ManagerFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "nationality", &self.nationality);
        add(&mut filter, "date_of_birth", &self.date_of_birth);
        add(&mut filter, "appointed_on", &self.appointed_on);
        add(&mut filter, "departed_on", &self.departed_on);
        add(&mut filter, "active", &self.active);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct StadiumFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub city: Option<StringFilter>,
    pub capacity: Option<IntFilter>,
    pub opened_year: Option<IntFilter>,
    pub surface: Option<SurfaceFilter>,
}

impl EntityFilter for StadiumFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "city", &self.city);
        add(&mut filter, "capacity", &self.capacity);
        add(&mut filter, "opened_year", &self.opened_year);
        add(&mut filter, "surface", &self.surface);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct CompetitionFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub kind: Option<CompetitionKindFilter>,
    pub country: Option<StringFilter>,
}

impl EntityFilter for CompetitionFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "kind", &self.kind);
        add(&mut filter, "country", &self.country);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct SeasonFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub start_year: Option<IntFilter>,
    pub end_year: Option<IntFilter>,
    /// Matches seasons whose competition list contains the given IDs
    pub competition_ids: Option<IdFilter>,
}

impl EntityFilter for SeasonFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "start_year", &self.start_year);
        add(&mut filter, "end_year", &self.end_year);
        add(&mut filter, "competition_ids", &self.competition_ids);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct ContractFilter {
    pub id: Option<IdFilter>,
    pub player_id: Option<IdFilter>,
    pub start_date: Option<DateFilter>,
    pub end_date: Option<DateFilter>,
    pub weekly_wage: Option<FloatFilter>,
    pub release_clause: Option<FloatFilter>,
}

impl EntityFilter for ContractFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "player_id", &self.player_id);
        add(&mut filter, "start_date", &self.start_date);
        add(&mut filter, "end_date", &self.end_date);
        add(&mut filter, "weekly_wage", &self.weekly_wage);
        add(&mut filter, "release_clause", &self.release_clause);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct TrophyFilter {
    pub id: Option<IdFilter>,
    pub name: Option<StringFilter>,
    pub competition_id: Option<IdFilter>,
    pub season_id: Option<IdFilter>,
    pub won_on: Option<DateFilter>,
}

impl EntityFilter for TrophyFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "name", &self.name);
        add(&mut filter, "competition_id", &self.competition_id);
        add(&mut filter, "season_id", &self.season_id);
        add(&mut filter, "won_on", &self.won_on);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct PlayerStatsFilter {
    pub id: Option<IdFilter>,
    pub player_id: Option<IdFilter>,
    pub season_id: Option<IdFilter>,
    pub competition_id: Option<IdFilter>,
    pub appearances: Option<IntFilter>,
    pub goals: Option<IntFilter>,
    pub assists: Option<IntFilter>,
    pub yellow_cards: Option<IntFilter>,
    pub red_cards: Option<IntFilter>,
    pub minutes_played: Option<IntFilter>,
}

impl EntityFilter for PlayerStatsFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "player_id", &self.player_id);
        add(&mut filter, "season_id", &self.season_id);
        add(&mut filter, "competition_id", &self.competition_id);
        add(&mut filter, "appearances", &self.appearances);
        add(&mut filter, "goals", &self.goals);
        add(&mut filter, "assists", &self.assists);
        add(&mut filter, "yellow_cards", &self.yellow_cards);
        add(&mut filter, "red_cards", &self.red_cards);
        add(&mut filter, "minutes_played", &self.minutes_played);
        filter
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct MatchFilter {
    pub id: Option<IdFilter>,
    pub competition_id: Option<IdFilter>,
    pub season_id: Option<IdFilter>,
    pub stadium_id: Option<IdFilter>,
    pub opponent: Option<StringFilter>,
    pub kickoff: Option<DateTimeFilter>,
    pub venue: Option<VenueFilter>,
    pub result: Option<MatchResultFilter>,
    pub club_score: Option<IntFilter>,
    pub opponent_score: Option<IntFilter>,
    /// Matches where any of the given players started
    pub lineup: Option<IdFilter>,
    pub substitutes: Option<IdFilter>,
}

impl EntityFilter for MatchFilter {
    fn conditions(&self) -> Filter {
        let mut filter = Filter::new();
        add(&mut filter, "id", &self.id);
        add(&mut filter, "competition_id", &self.competition_id);
        add(&mut filter, "season_id", &self.season_id);
        add(&mut filter, "stadium_id", &self.stadium_id);
        add(&mut filter, "opponent", &self.opponent);
        add(&mut filter, "kickoff", &self.kickoff);
        add(&mut filter, "venue", &self.venue);
        add(&mut filter, "result", &self.result);
        add(&mut filter, "score.club", &self.club_score);
        add(&mut filter, "score.opponent", &self.opponent_score);
        add(&mut filter, "lineup", &self.lineup);
        add(&mut filter, "substitutes", &self.substitutes);
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::matches::MatchResult;
    use crate::db::filter::Comparison;
    use serde_json::json;

    #[test]
    fn test_match_filter_maps_score_fields() {
        let filter = MatchFilter {
            result: Some(MatchResultFilter {
                ne: Some(MatchResult::Loss),
                ..Default::default()
            }),
            club_score: Some(IntFilter {
                gte: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        }
        .conditions();

        let fields: Vec<&str> = filter.conditions().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["result", "score.club"]);
        assert_eq!(filter.conditions()[0].comparison, Comparison::Ne(json!("loss")));
    }

    #[test]
    fn test_absent_filter_matches_everything() {
        assert!(conditions_of::<PlayerFilter>(&None).is_empty());
        assert!(PlayerFilter::default().conditions().is_empty());
        assert_eq!(
            SortInput {
                field: "kickoff".into(),
                direction: SortDirection::Desc
            }
            .key(),
            ("kickoff".to_string(), Direction::Descending)
        );
    }
}
