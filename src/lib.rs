//! TravelBunk match service - travel companion matching for TravelBunk
//!
//! This library provides the companion compatibility matcher and the HTTP
//! service around it: user directory, trip rooms, trip chat and identity
//! checks, over in-memory or PostgreSQL storage.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchResult, validate_aadhaar};
pub use models::{
    CompatibilityWeights, FindCompanionsResponse, MatchQuery, ScoredCandidate, TripRoom,
    UserProfile,
};
