use chrono::{DateTime, Utc};
use crate::models::{MatchQuery, TripRoom, TripSearch, UserProfile, UserSearch};

/// Check if a profile is an eligible companion for the query
///
/// Stage 1 of the companion pipeline: active, not the requester, carries
/// the requested style and has a budget range that meets the query window.
#[inline]
pub fn matches_companion_query(profile: &UserProfile, query: &MatchQuery) -> bool {
    if !profile.is_active {
        return false;
    }

    if query.requester_id.as_deref() == Some(profile.id.as_str()) {
        return false;
    }

    if let Some(style) = &query.travel_style {
        if !profile.has_style(style) {
            return false;
        }
    }

    if let Some(window) = &query.budget {
        if !profile.travel_preferences.budget_range.intersects(window) {
            return false;
        }
    }

    true
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Check if a profile matches a directory search
#[inline]
pub fn matches_user_search(profile: &UserProfile, search: &UserSearch) -> bool {
    if !profile.is_active {
        return false;
    }

    if let Some(city) = &search.city {
        if !contains_ignore_case(profile.city(), city) {
            return false;
        }
    }

    if let Some(country) = &search.country {
        if !contains_ignore_case(profile.country(), country) {
            return false;
        }
    }

    if let Some(style) = &search.travel_style {
        if !profile.has_style(style) {
            return false;
        }
    }

    let budget = &profile.travel_preferences.budget_range;
    if search.budget_min.is_some_and(|min| budget.max < min) {
        return false;
    }
    if search.budget_max.is_some_and(|max| budget.min > max) {
        return false;
    }

    true
}

/// Check if a trip room matches a listing search
#[inline]
pub fn matches_trip_search(trip: &TripRoom, search: &TripSearch) -> bool {
    if !trip.is_active {
        return false;
    }

    if let Some(destination) = &search.destination {
        if !contains_ignore_case(Some(&trip.destination), destination) {
            return false;
        }
    }

    if search.budget_min.is_some_and(|min| trip.budget.max < min) {
        return false;
    }
    if search.budget_max.is_some_and(|max| trip.budget.min > max) {
        return false;
    }

    if let Some(start) = search.start_date {
        if trip.start_date < start {
            return false;
        }
    }

    if let Some(style) = &search.travel_style {
        if !trip.travel_style.iter().any(|s| s.as_str() == style) {
            return false;
        }
    }

    true
}

/// Minimum rating for a featured companion
pub const FEATURED_MIN_RATING: f64 = 4.0;
/// Minimum completed trips for a featured companion
pub const FEATURED_MIN_TRIPS: u32 = 3;

#[inline]
pub fn is_featured_companion(profile: &UserProfile) -> bool {
    profile.is_active
        && profile.stats.rating >= FEATURED_MIN_RATING
        && profile.stats.trips_completed >= FEATURED_MIN_TRIPS
}

/// Upcoming, active trip rooms with at least two participants
#[inline]
pub fn is_featured_trip(trip: &TripRoom, now: DateTime<Utc>) -> bool {
    trip.is_active && trip.start_date >= now && trip.current_participants >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRange, Location, TravelStyle};

    fn create_test_profile(id: &str, budget: (i64, i64), styles: Vec<TravelStyle>) -> UserProfile {
        let mut profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "id": id, "name": id })).unwrap();
        profile.travel_preferences.budget_range = BudgetRange::new(budget.0, budget.1);
        profile.travel_preferences.travel_style = styles;
        profile
    }

    fn create_query(requester: &str) -> MatchQuery {
        MatchQuery {
            requester_id: Some(requester.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_keeps_active_others() {
        let profile = create_test_profile("a", (1000, 2000), vec![]);
        assert!(matches_companion_query(&profile, &create_query("me")));
    }

    #[test]
    fn test_self_excluded() {
        let profile = create_test_profile("me", (1000, 2000), vec![]);
        assert!(!matches_companion_query(&profile, &create_query("me")));
    }

    #[test]
    fn test_inactive_excluded() {
        let mut profile = create_test_profile("a", (1000, 2000), vec![]);
        profile.is_active = false;
        assert!(!matches_companion_query(&profile, &create_query("me")));
    }

    #[test]
    fn test_style_filter() {
        let profile = create_test_profile("a", (1000, 2000), vec![TravelStyle::Food]);
        let mut query = create_query("me");

        query.travel_style = Some("food".to_string());
        assert!(matches_companion_query(&profile, &query));

        query.travel_style = Some("luxury".to_string());
        assert!(!matches_companion_query(&profile, &query));

        query.travel_style = Some("karaoke".to_string());
        assert!(!matches_companion_query(&profile, &query));
    }

    #[test]
    fn test_budget_interval_overlap() {
        let profile = create_test_profile("a", (100, 200), vec![]);
        let mut query = create_query("me");

        query.budget = Some(BudgetRange::new(200, 300));
        assert!(matches_companion_query(&profile, &query));

        query.budget = Some(BudgetRange::new(201, 300));
        assert!(!matches_companion_query(&profile, &query));
    }

    #[test]
    fn test_user_search_location_is_case_insensitive() {
        let mut profile = create_test_profile("a", (1000, 2000), vec![]);
        profile.location = Some(Location {
            city: Some("Bengaluru".to_string()),
            country: Some("India".to_string()),
        });

        let search = UserSearch {
            city: Some("bengal".to_string()),
            country: Some("INDIA".to_string()),
            travel_style: None,
            budget_min: Some(1500),
            budget_max: None,
            page: 1,
            limit: 20,
        };
        assert!(matches_user_search(&profile, &search));

        let search = UserSearch { budget_min: Some(2500), ..search };
        assert!(!matches_user_search(&profile, &search));
    }

    #[test]
    fn test_featured_companion_thresholds() {
        let mut profile = create_test_profile("a", (1000, 2000), vec![]);
        profile.stats.rating = 4.0;
        profile.stats.trips_completed = 3;
        assert!(is_featured_companion(&profile));

        profile.stats.trips_completed = 2;
        assert!(!is_featured_companion(&profile));
    }
}
