use crate::models::{CompatibilityWeights, MatchQuery, ScoredCandidate, UserProfile};
use crate::core::{
    filters::matches_companion_query,
    ranker::rank,
    scoring::calculate_compatibility_score,
};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub companions: Vec<ScoredCandidate>,
    /// Candidates that passed the filter, before the page was cut
    pub total_candidates: usize,
}

/// Companion matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate filter (active, not self, style, budget window)
/// 2. Compatibility scoring
/// 3. Ranking and page truncation
///
/// Pure over its inputs: no I/O, no clock, no shared state.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: CompatibilityWeights,
}

impl Matcher {
    pub fn new(weights: CompatibilityWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: CompatibilityWeights::default(),
        }
    }

    pub fn weights(&self) -> &CompatibilityWeights {
        &self.weights
    }

    /// Find compatible companions for a query
    ///
    /// # Arguments
    /// * `query` - Parsed match query, including requester and page
    /// * `candidates` - User pool read from storage
    ///
    /// # Returns
    /// MatchResult containing one ranked page and the filtered total
    pub fn find_companions<I>(&self, query: &MatchQuery, candidates: I) -> MatchResult
    where
        I: IntoIterator<Item = UserProfile>,
    {
        let scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            // Stage 1: eligibility
            .filter(|profile| matches_companion_query(profile, query))
            // Stage 2: scoring
            .map(|profile| {
                let compatibility_score =
                    calculate_compatibility_score(&profile, query, &self.weights);
                ScoredCandidate {
                    profile,
                    compatibility_score,
                }
            })
            .collect();

        // Stage 3: ranking
        let (companions, total_candidates) = rank(scored, query.page, query.page_size);

        MatchResult {
            companions,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
