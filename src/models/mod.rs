// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetRange, CompatibilityWeights, GroupSize, Location, MatchQuery, Message, MessageSender,
    MessageType, Participant, ScoredCandidate, TravelPreferences, TravelStyle, TripCreator,
    TripRoom, TripSearch, UserProfile, UserSearch, UserStats,
};
pub use requests::{
    AadhaarRequest, CompanionRequest, CompanionSearchParams, CreateTripRequest, JoinTripRequest,
    PageParams, SendMessageRequest, TripListParams, UpdateProfileRequest, UserSearchParams,
};
pub use responses::{
    AadhaarResponse, CompanionRequestResponse, ErrorResponse, FindCompanionsResponse,
    HealthResponse, MarkReadResponse, MessageListResponse, MessagePage, Pagination, PingResponse,
    ProfileResponse, SendMessageResponse, TripActionResponse, TripListResponse, UserSearchResponse,
};
