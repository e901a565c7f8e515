use serde::{Deserialize, Serialize};
use crate::models::domain::{Message, ScoredCandidate, TripRoom, UserProfile};

/// Response for the companion search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindCompanionsResponse {
    pub companions: Vec<ScoredCandidate>,
    /// Candidates that passed the filter, before truncation
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit as u64) };
        Self { page, limit, total, pages }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResponse {
    pub users: Vec<UserProfile>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripListResponse {
    pub trips: Vec<TripRoom>,
    pub pagination: Pagination,
}

/// Result of a trip mutation (create, join, leave)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripActionResponse {
    pub success: bool,
    pub message: String,
    pub trip: TripRoom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    pub messages: Vec<Message>,
    pub pagination: MessagePage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: Message,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionRequestResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AadhaarResponse {
    pub valid: bool,
    pub reason: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub success: bool,
    pub message: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
