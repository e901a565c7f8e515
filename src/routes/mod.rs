// Route exports
pub mod chat;
pub mod companions;
pub mod error;
pub mod extract;
pub mod system;
pub mod trips;
pub mod users;

use actix_web::web;
use std::sync::Arc;
use crate::core::{Matcher, PageLimits};
use crate::services::{
    Authenticator, CacheManager, MessageRepository, TripRepository, UserRepository,
};

pub use error::ApiError;

/// Page sizes and list caps per endpoint
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub companions: PageLimits,
    pub users: PageLimits,
    pub trips: PageLimits,
    pub messages: PageLimits,
    pub user_list: usize,
    pub featured_companions: usize,
    pub featured_trips: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            companions: PageLimits::new(20, 50),
            users: PageLimits::new(20, 50),
            trips: PageLimits::new(12, 50),
            messages: PageLimits::new(50, 100),
            user_list: 50,
            featured_companions: 12,
            featured_trips: 8,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub cache: Arc<CacheManager>,
    pub auth: Arc<Authenticator>,
    pub matcher: Matcher,
    pub limits: Limits,
}

impl AppState {
    /// Build state where one backend serves all three repositories
    pub fn with_store<S>(
        store: Arc<S>,
        cache: Arc<CacheManager>,
        auth: Arc<Authenticator>,
        matcher: Matcher,
        limits: Limits,
    ) -> Self
    where
        S: UserRepository + TripRepository + MessageRepository + 'static,
    {
        Self {
            users: store.clone(),
            trips: store.clone(),
            messages: store,
            cache,
            auth,
            matcher,
            limits,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(system::configure_ping)
            .service(
                web::scope("/v1")
                    .configure(system::configure)
                    .configure(companions::configure)
                    .configure(users::configure)
                    .configure(trips::configure)
                    .configure(chat::configure),
            ),
    );
}
