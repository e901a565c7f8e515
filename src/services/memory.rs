use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tokio::sync::RwLock;
use crate::core::{
    filters::{is_featured_companion, is_featured_trip, matches_trip_search, matches_user_search},
    trips,
};
use crate::models::{
    MatchQuery, Message, Participant, TripRoom, TripSearch, UserProfile, UserSearch,
};
use crate::services::repository::{
    MessageRepository, RepositoryError, RepositoryResult, TripRepository, UserRepository,
};

/// Initial contents of the in-memory store
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub trips: Vec<TripRoom>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Process-local storage backend
///
/// Each collection sits behind its own lock; every write holds the lock
/// for the whole read-modify-write, which makes join/leave atomic.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserProfile>>,
    trips: RwLock<Vec<TripRoom>>,
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(seed: SeedData) -> Self {
        Self {
            users: RwLock::new(seed.users),
            trips: RwLock::new(seed.trips),
            messages: RwLock::new(seed.messages),
        }
    }

    /// Load a JSON seed file with optional `users`, `trips` and `messages` arrays
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::Seed(format!("{}: {}", path.display(), e)))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| RepositoryError::Seed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Loaded seed data from {} ({} users, {} trips, {} messages)",
            path.display(),
            seed.users.len(),
            seed.trips.len(),
            seed.messages.len()
        );

        Ok(Self::with_data(seed))
    }
}

fn page_of<T: Clone>(items: &[&T], offset: usize, limit: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).map(|t| (*t).clone()).collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_active_excluding(
        &self,
        requester_id: Option<&str>,
        _query: &MatchQuery,
    ) -> RepositoryResult<Vec<UserProfile>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.is_active && Some(u.id.as_str()) != requester_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> RepositoryResult<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_active(&self, limit: usize) -> RepositoryResult<Vec<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.is_active).take(limit).cloned().collect())
    }

    async fn search(&self, search: &UserSearch) -> RepositoryResult<(Vec<UserProfile>, u64)> {
        let users = self.users.read().await;
        let mut hits: Vec<&UserProfile> = users
            .iter()
            .filter(|u| matches_user_search(u, search))
            .collect();

        hits.sort_by(|a, b| {
            b.clamped_rating()
                .total_cmp(&a.clamped_rating())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let total = hits.len() as u64;
        Ok((page_of(&hits, search.offset(), search.limit), total))
    }

    async fn featured(&self, limit: usize) -> RepositoryResult<Vec<UserProfile>> {
        let users = self.users.read().await;
        let mut hits: Vec<&UserProfile> = users.iter().filter(|u| is_featured_companion(u)).collect();

        hits.sort_by(|a, b| {
            b.clamped_rating()
                .total_cmp(&a.clamped_rating())
                .then_with(|| b.stats.trips_completed.cmp(&a.stats.trips_completed))
        });

        Ok(page_of(&hits, 0, limit))
    }

    async fn upsert(&self, profile: UserProfile) -> RepositoryResult<UserProfile> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => users.push(profile.clone()),
        }
        Ok(profile)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn list(&self, search: &TripSearch) -> RepositoryResult<(Vec<TripRoom>, u64)> {
        let all = self.trips.read().await;
        let mut hits: Vec<&TripRoom> = all.iter().filter(|t| matches_trip_search(t, search)).collect();
        hits.sort_by(|a, b| trips::compare_newest(a, b));

        let total = hits.len() as u64;
        Ok((page_of(&hits, search.offset(), search.limit), total))
    }

    async fn featured(&self, now: DateTime<Utc>, limit: usize) -> RepositoryResult<Vec<TripRoom>> {
        let all = self.trips.read().await;
        let mut hits: Vec<&TripRoom> = all.iter().filter(|t| is_featured_trip(t, now)).collect();
        hits.sort_by(|a, b| trips::compare_featured(a, b));

        Ok(page_of(&hits, 0, limit))
    }

    async fn get(&self, id: &str) -> RepositoryResult<Option<TripRoom>> {
        let all = self.trips.read().await;
        Ok(all.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, trip: TripRoom) -> RepositoryResult<TripRoom> {
        let mut all = self.trips.write().await;
        all.push(trip.clone());
        Ok(trip)
    }

    async fn join(&self, trip_id: &str, participant: Participant) -> RepositoryResult<TripRoom> {
        let mut all = self.trips.write().await;
        let trip = all
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| RepositoryError::NotFound("Trip".to_string()))?;

        trips::join(trip, participant, Utc::now())?;
        Ok(trip.clone())
    }

    async fn leave(&self, trip_id: &str, user_id: &str) -> RepositoryResult<TripRoom> {
        let mut all = self.trips.write().await;
        let trip = all
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| RepositoryError::NotFound("Trip".to_string()))?;

        trips::leave(trip, user_id, Utc::now());
        Ok(trip.clone())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn list(&self, trip_room_id: &str, page: usize, limit: usize) -> RepositoryResult<Vec<Message>> {
        let all = self.messages.read().await;
        let mut room: Vec<&Message> = all
            .iter()
            .rev()
            .filter(|m| m.trip_room_id == trip_room_id)
            .collect();
        room.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = page.saturating_sub(1).saturating_mul(limit);
        let mut newest_first = page_of(&room, offset, limit);
        newest_first.reverse();
        Ok(newest_first)
    }

    async fn insert(&self, message: Message) -> RepositoryResult<Message> {
        let mut all = self.messages.write().await;
        all.push(message.clone());
        Ok(message)
    }

    async fn mark_read(&self, trip_room_id: &str, reader_id: &str) -> RepositoryResult<u64> {
        let mut all = self.messages.write().await;
        let mut updated = 0;
        for message in all
            .iter_mut()
            .filter(|m| m.trip_room_id == trip_room_id && m.sender.user_id != reader_id && !m.is_read)
        {
            message.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
