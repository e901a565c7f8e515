// Service exports
pub mod auth;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use auth::{AuthError, AuthSource, AuthenticatedUser, Authenticator};
pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use memory::{MemoryStore, SeedData};
pub use postgres::PostgresClient;
pub use repository::{
    MessageRepository, RepositoryError, RepositoryResult, TripRepository, UserRepository,
};
