//! Query parameters and response envelope for list endpoints.
//!
//! Lists page with `skip`/`limit` offsets and order by `sort=field` or `sort=-field`.

use crate::config::PaginationConfig;
use crate::db::filter::{Direction, Filter};
use crate::db::handlers::DocumentFilter;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// `?skip=&limit=&sort=` on every list route. Out of range values are clamped, never rejected.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Documents to pass over before the page starts
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub skip: Option<i64>,

    /// Page size, bounded by `pagination.max_limit`
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,

    /// Sort field, prefixed with `-` for descending order
    #[param(example = "-created_at")]
    #[serde(default)]
    pub sort: Option<String>,
}

impl Pagination {
    /// Negative offsets count as zero
    #[inline]
    pub fn skip(&self) -> u64 {
        self.skip.unwrap_or(0).max(0) as u64
    }

    /// Requested page size within `1..=max_limit`, or the configured default
    #[inline]
    pub fn limit(&self, config: &PaginationConfig) -> u64 {
        let max = config.max_limit.max(1) as i64;
        self.limit.unwrap_or(config.default_limit as i64).clamp(1, max) as u64
    }

    #[inline]
    pub fn params(&self, config: &PaginationConfig) -> (u64, u64) {
        (self.skip(), self.limit(config))
    }

    pub fn sort(&self) -> Option<(String, Direction)> {
        parse_sort(self.sort.as_deref())
    }

    /// Repository filter for one page of documents matching `conditions`.
    pub fn filter(&self, config: &PaginationConfig, conditions: Filter) -> DocumentFilter {
        let (skip, limit) = self.params(config);
        DocumentFilter::new(skip, limit)
            .with_conditions(conditions)
            .sorted_by(self.sort())
    }
}

/// Parse `field` / `-field` into a sort key. Empty input means default ordering.
pub fn parse_sort(sort: Option<&str>) -> Option<(String, Direction)> {
    let sort = sort.map(str::trim).filter(|s| !s.is_empty())?;
    match sort.strip_prefix('-') {
        Some(field) => Some((field.to_string(), Direction::Descending)),
        None => Some((sort.trim_start_matches('+').to_string(), Direction::Ascending)),
    }
}

/// One page of documents plus the total that matched before paging.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T: ToSchema> {
    pub data: Vec<T>,
    /// Matches across all pages
    pub total_count: u64,
    pub skip: u64,
    /// Effective page size after clamping
    pub limit: u64,
}

impl<T: ToSchema> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total_count: u64, skip: u64, limit: u64) -> Self {
        Self {
            data,
            total_count,
            skip,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_limit: 10,
            max_limit: 100,
        }
    }

    #[test]
    fn test_default_values() {
        let p = Pagination::default();
        assert_eq!(p.skip(), 0);
        assert_eq!(p.limit(&config()), 10);
        assert_eq!(p.sort(), None);
    }

    #[test]
    fn test_limit_clamping() {
        let config = config();

        // Zero is clamped to 1
        let p = Pagination {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(p.limit(&config), 1);

        // Over max is clamped to the configured maximum
        let p = Pagination {
            limit: Some(1000),
            ..Default::default()
        };
        assert_eq!(p.limit(&config), 100);

        let p = Pagination {
            skip: Some(-10),
            limit: Some(50),
            sort: None,
        };
        assert_eq!(p.params(&config), (0, 50));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort(Some("name")), Some(("name".to_string(), Direction::Ascending)));
        assert_eq!(parse_sort(Some("-kickoff")), Some(("kickoff".to_string(), Direction::Descending)));
        assert_eq!(parse_sort(Some("  ")), None);
        assert_eq!(parse_sort(None), None);
    }
}
