//! Operator inputs for GraphQL list queries and their mapping onto [`Filter`] conditions.
//!
//! Each entity filter input (see [`super::inputs`]) is a set of optional field filters.
//! A field filter is a set of optional operators, and every operator that is present adds
//! one condition on that field. All conditions are ANDed, so
//! `{ shirtNumber: { gte: 1, lte: 11 }, active: { eq: true } }` becomes three conditions.

use crate::api::models::competitions::CompetitionKind;
use crate::api::models::matches::{MatchResult, Venue};
use crate::api::models::players::Position;
use crate::api::models::stadiums::Surface;
use crate::db::filter::{Comparison, Filter};
use crate::types::timestamp;
use async_graphql::{InputObject, InputType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Something that adds conditions for one document field.
pub trait FieldFilter {
    fn apply(&self, field: &str, filter: &mut Filter);
}

/// Add the conditions of an optional field filter.
pub fn add<F: FieldFilter>(filter: &mut Filter, field: &str, operators: &Option<F>) {
    if let Some(operators) = operators {
        operators.apply(field, filter);
    }
}

fn values<T: Serialize>(items: &[T]) -> Vec<Value> {
    items.iter().map(|item| json!(item)).collect()
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct StringFilter {
    pub eq: Option<String>,
    pub ne: Option<String>,
    #[graphql(name = "in")]
    pub in_: Option<Vec<String>>,
    pub nin: Option<Vec<String>>,
    /// Case-insensitive substring match
    pub contains: Option<String>,
}

impl FieldFilter for StringFilter {
    fn apply(&self, field: &str, filter: &mut Filter) {
        if let Some(v) = &self.eq {
            filter.push(field, Comparison::Eq(json!(v)));
        }
        if let Some(v) = &self.ne {
            filter.push(field, Comparison::Ne(json!(v)));
        }
        if let Some(vs) = &self.in_ {
            filter.push(field, Comparison::In(values(vs)));
        }
        if let Some(vs) = &self.nin {
            filter.push(field, Comparison::Nin(values(vs)));
        }
        if let Some(needle) = &self.contains {
            filter.push(field, Comparison::Like(needle.clone()));
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct BoolFilter {
    pub eq: Option<bool>,
    pub ne: Option<bool>,
}

impl FieldFilter for BoolFilter {
    fn apply(&self, field: &str, filter: &mut Filter) {
        if let Some(v) = self.eq {
            filter.push(field, Comparison::Eq(json!(v)));
        }
        if let Some(v) = self.ne {
            filter.push(field, Comparison::Ne(json!(v)));
        }
    }
}

pub type UtcDateTime = DateTime<Utc>;

/// A value that can bound an ordered comparison, rendered the way the field is stored.
pub trait Operand {
    fn operand(&self) -> Value;
}

impl Operand for i64 {
    fn operand(&self) -> Value {
        json!(self)
    }
}

impl Operand for f64 {
    fn operand(&self) -> Value {
        json!(self)
    }
}

impl Operand for NaiveDate {
    fn operand(&self) -> Value {
        json!(self)
    }
}

impl Operand for UtcDateTime {
    fn operand(&self) -> Value {
        Value::String(timestamp::format(self))
    }
}

/// Ordered comparisons. Dates and timestamps are stored as fixed-width ISO-8601 strings,
/// which sort in time order.
#[derive(Debug, Clone, InputObject)]
#[graphql(concrete(name = "IntFilter", params(i64)))]
#[graphql(concrete(name = "FloatFilter", params(f64)))]
#[graphql(concrete(name = "DateFilter", params(NaiveDate)))]
#[graphql(concrete(name = "DateTimeFilter", params(UtcDateTime)))]
pub struct RangeFilter<T: InputType> {
    pub eq: Option<T>,
    pub ne: Option<T>,
    pub gt: Option<T>,
    pub gte: Option<T>,
    pub lt: Option<T>,
    pub lte: Option<T>,
    #[graphql(name = "in")]
    pub in_: Option<Vec<T>>,
    pub nin: Option<Vec<T>>,
}

pub type IntFilter = RangeFilter<i64>;
pub type FloatFilter = RangeFilter<f64>;
pub type DateFilter = RangeFilter<NaiveDate>;
pub type DateTimeFilter = RangeFilter<UtcDateTime>;

impl<T: InputType> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            eq: None,
            ne: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            in_: None,
            nin: None,
        }
    }
}

impl<T: InputType + Operand> FieldFilter for RangeFilter<T> {
    fn apply(&self, field: &str, filter: &mut Filter) {
        let single: [(&Option<T>, fn(Value) -> Comparison); 6] = [
            (&self.eq, Comparison::Eq),
            (&self.ne, Comparison::Ne),
            (&self.gt, Comparison::Gt),
            (&self.gte, Comparison::Gte),
            (&self.lt, Comparison::Lt),
            (&self.lte, Comparison::Lte),
        ];
        for (operand, comparison) in single {
            if let Some(v) = operand {
                filter.push(field, comparison(v.operand()));
            }
        }
        if let Some(vs) = &self.in_ {
            filter.push(field, Comparison::In(vs.iter().map(Operand::operand).collect()));
        }
        if let Some(vs) = &self.nin {
            filter.push(field, Comparison::Nin(vs.iter().map(Operand::operand).collect()));
        }
    }
}

/// Equality and membership on IDs and enums. Against an array field (such as a season's
/// competitions or a match lineup) `eq` matches when any element is equal.
#[derive(Debug, Clone, InputObject)]
#[graphql(concrete(name = "IdFilter", params(Uuid)))]
#[graphql(concrete(name = "PositionFilter", params(Position)))]
#[graphql(concrete(name = "CompetitionKindFilter", params(CompetitionKind)))]
#[graphql(concrete(name = "SurfaceFilter", params(Surface)))]
#[graphql(concrete(name = "VenueFilter", params(Venue)))]
#[graphql(concrete(name = "MatchResultFilter", params(MatchResult)))]
pub struct EqualityFilter<T: InputType> {
    pub eq: Option<T>,
    pub ne: Option<T>,
    #[graphql(name = "in")]
    pub in_: Option<Vec<T>>,
    pub nin: Option<Vec<T>>,
}

pub type IdFilter = EqualityFilter<Uuid>;
pub type PositionFilter = EqualityFilter<Position>;
pub type CompetitionKindFilter = EqualityFilter<CompetitionKind>;
pub type SurfaceFilter = EqualityFilter<Surface>;
pub type VenueFilter = EqualityFilter<Venue>;
pub type MatchResultFilter = EqualityFilter<MatchResult>;

impl<T: InputType> Default for EqualityFilter<T> {
    fn default() -> Self {
        Self {
            eq: None,
            ne: None,
            in_: None,
            nin: None,
        }
    }
}

impl<T: InputType + Serialize> FieldFilter for EqualityFilter<T> {
    fn apply(&self, field: &str, filter: &mut Filter) {
        if let Some(v) = &self.eq {
            filter.push(field, Comparison::Eq(json!(v)));
        }
        if let Some(v) = &self.ne {
            filter.push(field, Comparison::Ne(json!(v)));
        }
        if let Some(vs) = &self.in_ {
            filter.push(field, Comparison::In(values(vs)));
        }
        if let Some(vs) = &self.nin {
            filter.push(field, Comparison::Nin(values(vs)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(field: &str, operators: &impl FieldFilter) -> Vec<Comparison> {
        let mut filter = Filter::new();
        operators.apply(field, &mut filter);
        filter.conditions().iter().map(|c| c.comparison.clone()).collect()
    }

    #[test]
    fn test_each_operator_adds_one_condition() {
        let range = IntFilter {
            gte: Some(1),
            lte: Some(11),
            nin: Some(vec![7]),
            ..Default::default()
        };
        assert_eq!(
            conditions("shirt_number", &range),
            vec![
                Comparison::Gte(json!(1)),
                Comparison::Lte(json!(11)),
                Comparison::Nin(vec![json!(7)])
            ]
        );

        let text = StringFilter {
            ne: Some("Everton".into()),
            contains: Some("city".into()),
            ..Default::default()
        };
        assert_eq!(
            conditions("opponent", &text),
            vec![Comparison::Ne(json!("Everton")), Comparison::Like("city".into())]
        );

        assert!(conditions("active", &BoolFilter::default()).is_empty());
    }

    #[test]
    fn test_values_use_stored_representation() {
        let positions = PositionFilter {
            in_: Some(vec![Position::Goalkeeper, Position::Defender]),
            ..Default::default()
        };
        assert_eq!(
            conditions("position", &positions),
            vec![Comparison::In(vec![json!("goalkeeper"), json!("defender")])]
        );

        let id = Uuid::new_v4();
        let ids = IdFilter {
            eq: Some(id),
            ..Default::default()
        };
        assert_eq!(conditions("player_id", &ids), vec![Comparison::Eq(json!(id.to_string()))]);

        let dates = DateFilter {
            lt: NaiveDate::from_ymd_opt(2000, 1, 1),
            ..Default::default()
        };
        assert_eq!(conditions("date_of_birth", &dates), vec![Comparison::Lt(json!("2000-01-01"))]);

        let kickoff = "2025-02-12T19:30:00Z".parse::<UtcDateTime>().unwrap();
        let after = DateTimeFilter {
            gt: Some(kickoff),
            ..Default::default()
        };
        assert_eq!(
            conditions("kickoff", &after),
            vec![Comparison::Gt(json!("2025-02-12T19:30:00.000000000Z"))]
        );
    }

    #[test]
    fn test_add_skips_absent_filters() {
        let mut filter = Filter::new();
        add::<StringFilter>(&mut filter, "name", &None);
        add(&mut filter, "active", &Some(BoolFilter { eq: Some(true), ne: None }));
        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(filter.conditions()[0].field, "active");
    }
}
