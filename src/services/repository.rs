use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::core::TripError;
use crate::models::{
    MatchQuery, Message, Participant, TripRoom, TripSearch, UserProfile, UserSearch,
};

/// Errors surfaced by any storage backend
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Trip(#[from] TripError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Seed file error: {0}")]
    Seed(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read and write access to user profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Active users other than the requester.
    ///
    /// Backends may push the query's style and budget filters down, but the
    /// matcher applies them again, so returning a superset is correct.
    async fn find_active_excluding(
        &self,
        requester_id: Option<&str>,
        query: &MatchQuery,
    ) -> RepositoryResult<Vec<UserProfile>>;

    async fn get(&self, id: &str) -> RepositoryResult<Option<UserProfile>>;

    async fn list_active(&self, limit: usize) -> RepositoryResult<Vec<UserProfile>>;

    /// One page of a directory search and the total number of matches
    async fn search(&self, search: &UserSearch) -> RepositoryResult<(Vec<UserProfile>, u64)>;

    async fn featured(&self, limit: usize) -> RepositoryResult<Vec<UserProfile>>;

    async fn upsert(&self, profile: UserProfile) -> RepositoryResult<UserProfile>;

    async fn health_check(&self) -> bool;
}

/// Trip room storage
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn list(&self, search: &TripSearch) -> RepositoryResult<(Vec<TripRoom>, u64)>;

    async fn featured(&self, now: DateTime<Utc>, limit: usize) -> RepositoryResult<Vec<TripRoom>>;

    async fn get(&self, id: &str) -> RepositoryResult<Option<TripRoom>>;

    async fn create(&self, trip: TripRoom) -> RepositoryResult<TripRoom>;

    /// Atomically add a participant, enforcing the membership rules
    async fn join(&self, trip_id: &str, participant: Participant) -> RepositoryResult<TripRoom>;

    /// Atomically remove a participant; a no-op if they were not in the trip
    async fn leave(&self, trip_id: &str, user_id: &str) -> RepositoryResult<TripRoom>;
}

/// Trip room chat storage
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Page of messages counted from the newest, returned oldest first
    async fn list(&self, trip_room_id: &str, page: usize, limit: usize) -> RepositoryResult<Vec<Message>>;

    async fn insert(&self, message: Message) -> RepositoryResult<Message>;

    /// Mark messages from other senders as read; returns how many changed
    async fn mark_read(&self, trip_room_id: &str, reader_id: &str) -> RepositoryResult<u64>;
}
