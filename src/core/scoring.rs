use crate::models::{CompatibilityWeights, MatchQuery, UserProfile};

/// Trips after which the experience bonus is fully earned
const EXPERIENCE_CAP_TRIPS: f64 = 10.0;

/// Top of the rating scale
const MAX_RATING: f64 = 5.0;

/// Calculate a compatibility score (0-100) for a candidate
///
/// Scoring formula with default weights:
/// score = (
///     budget_overlap * 30 +     # query and candidate budgets share a range
///     style_match * 40 +        # candidate lists the requested style
///     rating / 5 * 20 +         # linear in the clamped rating
///     min(trips / 10, 1) * 10   # experience, capped at ten trips
/// )
///
/// Query fields that are absent contribute nothing.
pub fn calculate_compatibility_score(
    candidate: &UserProfile,
    query: &MatchQuery,
    weights: &CompatibilityWeights,
) -> u8 {
    let total = budget_score(candidate, query) * weights.budget
        + style_score(candidate, query) * weights.travel_style
        + rating_score(candidate) * weights.rating
        + experience_score(candidate) * weights.experience;

    total.round().clamp(0.0, 100.0) as u8
}

/// 1 when the budget windows share a positive-width range.
/// Ranges that merely touch score 0.
#[inline]
fn budget_score(candidate: &UserProfile, query: &MatchQuery) -> f64 {
    match &query.budget {
        Some(window) if candidate.travel_preferences.budget_range.overlap(window) > 0 => 1.0,
        _ => 0.0,
    }
}

#[inline]
fn style_score(candidate: &UserProfile, query: &MatchQuery) -> f64 {
    match &query.travel_style {
        Some(style) if candidate.has_style(style) => 1.0,
        _ => 0.0,
    }
}

#[inline]
fn rating_score(candidate: &UserProfile) -> f64 {
    candidate.clamped_rating() / MAX_RATING
}

#[inline]
fn experience_score(candidate: &UserProfile) -> f64 {
    (candidate.stats.trips_completed as f64 / EXPERIENCE_CAP_TRIPS).min(1.0)
}
