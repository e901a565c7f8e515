// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod params;
pub mod profiles;
pub mod ranker;
pub mod scoring;
pub mod trips;
pub mod verhoeff;

pub use filters::{
    is_featured_companion, is_featured_trip, matches_companion_query, matches_trip_search,
    matches_user_search,
};
pub use matcher::{MatchResult, Matcher};
pub use params::PageLimits;
pub use profiles::{merge_profile, ProfileError};
pub use ranker::{compare_candidates, rank};
pub use scoring::calculate_compatibility_score;
pub use trips::TripError;
pub use verhoeff::{validate_aadhaar, verhoeff_check, AadhaarError};
