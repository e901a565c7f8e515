//! Typed parse-or-default step between raw query strings and the core.
//!
//! Malformed numbers and dates are treated as if they had not been sent.
//! Nothing in here fails.

use chrono::{DateTime, NaiveDate, Utc};
use crate::models::{
    BudgetRange, CompanionSearchParams, MatchQuery, PageParams, TripListParams, TripSearch,
    UserSearch, UserSearchParams,
};

/// Highest page number accepted from clients
pub const MAX_PAGE: usize = 1000;

/// Default and maximum page size of one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl PageLimits {
    pub const fn new(default_limit: usize, max_limit: usize) -> Self {
        Self { default_limit, max_limit }
    }
}

/// Trimmed, non-empty text
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Whole number, or `None` when missing or not a number
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

/// RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Lowercased style tag. Unknown tags are kept so they match nothing.
pub fn parse_style(raw: Option<&str>) -> Option<String> {
    parse_text(raw).map(|s| s.to_lowercase())
}

/// Budget window from two optional bounds.
///
/// A single bound leaves the other side open. An inverted pair is swapped.
pub fn budget_window(min: Option<i64>, max: Option<i64>) -> Option<BudgetRange> {
    match (min, max) {
        (None, None) => None,
        (Some(min), None) => Some(BudgetRange::new(min, i64::MAX)),
        (None, Some(max)) => Some(BudgetRange::new(0.min(max), max)),
        (Some(a), Some(b)) => Some(BudgetRange::new(a.min(b), a.max(b))),
    }
}

/// 1-based page number, clamped to `1..=MAX_PAGE`
pub fn parse_page(raw: Option<&str>) -> usize {
    match parse_int(raw) {
        Some(page) if page > 0 => (page as u64).min(MAX_PAGE as u64) as usize,
        _ => 1,
    }
}

/// Page size, clamped to `1..=max_limit`
pub fn parse_limit(raw: Option<&str>, limits: PageLimits) -> usize {
    match parse_int(raw) {
        Some(limit) if limit > 0 => (limit as u64).min(limits.max_limit as u64) as usize,
        _ => limits.default_limit,
    }
}

pub fn parse_page_params(params: &PageParams, limits: PageLimits) -> (usize, usize) {
    (
        parse_page(params.page.as_deref()),
        parse_limit(params.limit.as_deref(), limits),
    )
}

/// Build a companion match query.
///
/// `requester_id` wins over the `userId` query parameter when the caller
/// is authenticated.
pub fn match_query(
    params: &CompanionSearchParams,
    requester_id: Option<String>,
    limits: PageLimits,
) -> MatchQuery {
    let budget = budget_window(
        parse_int(params.budget_min.as_deref()),
        parse_int(params.budget_max.as_deref()),
    );

    MatchQuery {
        requester_id: requester_id.or_else(|| parse_text(params.user_id.as_deref())),
        budget,
        travel_style: parse_style(params.travel_style.as_deref()),
        destination: parse_text(params.destination.as_deref()),
        start_date: parse_date(params.start_date.as_deref()),
        end_date: parse_date(params.end_date.as_deref()),
        page: parse_page(params.page.as_deref()),
        page_size: parse_limit(params.limit.as_deref(), limits),
    }
}

pub fn user_search(params: &UserSearchParams, limits: PageLimits) -> UserSearch {
    UserSearch {
        city: parse_text(params.city.as_deref()),
        country: parse_text(params.country.as_deref()),
        travel_style: parse_style(params.travel_style.as_deref()),
        budget_min: parse_int(params.budget_min.as_deref()),
        budget_max: parse_int(params.budget_max.as_deref()),
        page: parse_page(params.page.as_deref()),
        limit: parse_limit(params.limit.as_deref(), limits),
    }
}

pub fn trip_search(params: &TripListParams, limits: PageLimits) -> TripSearch {
    TripSearch {
        destination: parse_text(params.destination.as_deref()),
        budget_min: parse_int(params.budget_min.as_deref()),
        budget_max: parse_int(params.budget_max.as_deref()),
        start_date: parse_date(params.start_date.as_deref()),
        travel_style: parse_style(params.travel_style.as_deref()),
        page: parse_page(params.page.as_deref()),
        limit: parse_limit(params.limit.as_deref(), limits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const LIMITS: PageLimits = PageLimits::new(20, 50);

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert_eq!(parse_int(Some("1500")), Some(1500));
        assert_eq!(parse_int(Some(" 42 ")), Some(42));
        assert_eq!(parse_int(Some("abc")), None);
        assert_eq!(parse_int(Some("12abc")), None);
        assert_eq!(parse_int(Some("")), None);
        assert_eq!(parse_int(None), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let day = parse_date(Some("2025-03-14")).unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2025, 3, 14, 0));

        let ts = parse_date(Some("2025-03-14T10:30:00+05:30")).unwrap();
        assert_eq!(ts.hour(), 5);

        assert!(parse_date(Some("next tuesday")).is_none());
    }

    #[test]
    fn test_budget_window() {
        assert_eq!(budget_window(None, None), None);
        assert_eq!(budget_window(Some(100), Some(500)), Some(BudgetRange::new(100, 500)));
        assert_eq!(budget_window(Some(500), Some(100)), Some(BudgetRange::new(100, 500)));
        assert_eq!(budget_window(Some(100), None), Some(BudgetRange::new(100, i64::MAX)));
        assert_eq!(budget_window(None, Some(500)), Some(BudgetRange::new(0, 500)));
    }

    #[test]
    fn test_page_and_limit_clamping() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("5000")), MAX_PAGE);
        assert_eq!(parse_limit(None, LIMITS), 20);
        assert_eq!(parse_limit(Some("0"), LIMITS), 20);
        assert_eq!(parse_limit(Some("500"), LIMITS), 50);
        assert_eq!(parse_limit(Some("7"), LIMITS), 7);
    }

    #[test]
    fn test_malformed_budget_is_absent() {
        let params = CompanionSearchParams {
            budget_min: Some("cheap".to_string()),
            budget_max: Some("lots".to_string()),
            travel_style: Some(" Adventure ".to_string()),
            ..Default::default()
        };

        let query = match_query(&params, None, LIMITS);
        assert_eq!(query.budget, None);
        assert_eq!(query.travel_style.as_deref(), Some("adventure"));
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn test_authenticated_requester_wins() {
        let params = CompanionSearchParams {
            user_id: Some("from-query".to_string()),
            ..Default::default()
        };

        let query = match_query(&params, Some("from-token".to_string()), LIMITS);
        assert_eq!(query.requester_id.as_deref(), Some("from-token"));

        let query = match_query(&params, None, LIMITS);
        assert_eq!(query.requester_id.as_deref(), Some("from-query"));
    }
}
