use chrono::{DateTime, Utc};
use thiserror::Error;
use crate::models::{UpdateProfileRequest, UserProfile, UserStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Name is required")]
    NameRequired,
}

/// Apply a profile update on top of the stored profile, creating it on first write.
///
/// Fields absent from the update are kept. Stats and `createdAt` are never
/// taken from the request.
pub fn merge_profile(
    existing: Option<UserProfile>,
    id: &str,
    update: UpdateProfileRequest,
    now: DateTime<Utc>,
) -> Result<UserProfile, ProfileError> {
    let mut profile = match existing {
        Some(profile) => profile,
        None => {
            let name = update
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or(ProfileError::NameRequired)?;

            UserProfile {
                id: id.to_string(),
                name: name.to_string(),
                bio: String::new(),
                profile_picture: String::new(),
                location: None,
                travel_preferences: Default::default(),
                stats: UserStats::default(),
                is_active: true,
                created_at: now,
                updated_at: now,
            }
        }
    };

    if let Some(name) = update.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        profile.name = name.to_string();
    }
    if let Some(bio) = update.bio {
        profile.bio = bio;
    }
    if let Some(picture) = update.profile_picture {
        profile.profile_picture = picture;
    }
    if let Some(location) = update.location {
        profile.location = Some(location);
    }
    if let Some(prefs) = update.travel_preferences {
        profile.travel_preferences = prefs;
    }
    profile.updated_at = now;

    Ok(profile)
}
