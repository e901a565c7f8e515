use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use thiserror::Error;
use crate::models::{CreateTripRequest, Participant, TripCreator, TripRoom};

/// Default capacity when a trip is created without one
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 10;

/// Rule violations when changing trip membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TripError {
    #[error("Already joined this trip")]
    AlreadyJoined,

    #[error("Trip is full")]
    Full,

    #[error("Trip is closed")]
    Closed,
}

/// Build a new trip room with its creator as the first participant
pub fn new_trip(
    id: String,
    req: CreateTripRequest,
    creator: TripCreator,
    now: DateTime<Utc>,
) -> TripRoom {
    let participants = vec![Participant {
        user_id: creator.id.clone(),
        name: creator.name.clone(),
        profile_picture: creator.profile_picture.clone(),
        joined_at: now,
    }];

    TripRoom {
        id,
        title: req.title.trim().to_string(),
        destination: req.destination.trim().to_string(),
        description: req.description.trim().to_string(),
        start_date: req.start_date,
        end_date: req.end_date,
        budget: req.budget,
        max_participants: req.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS),
        current_participants: participants.len() as u32,
        creator,
        participants,
        tags: req.tags,
        travel_style: req.travel_style,
        accommodation_type: req.accommodation_type,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn is_participant(trip: &TripRoom, user_id: &str) -> bool {
    trip.participants.iter().any(|p| p.user_id == user_id)
}

/// Add a participant to a trip.
///
/// `current_participants` is recomputed from the participant list.
pub fn join(trip: &mut TripRoom, participant: Participant, now: DateTime<Utc>) -> Result<(), TripError> {
    if !trip.is_active {
        return Err(TripError::Closed);
    }

    if is_participant(trip, &participant.user_id) {
        return Err(TripError::AlreadyJoined);
    }

    if trip.current_participants >= trip.max_participants {
        return Err(TripError::Full);
    }

    trip.participants.push(participant);
    trip.current_participants = trip.participants.len() as u32;
    trip.updated_at = now;

    Ok(())
}

/// Remove a participant from a trip. Returns whether anyone was removed.
pub fn leave(trip: &mut TripRoom, user_id: &str, now: DateTime<Utc>) -> bool {
    let before = trip.participants.len();
    trip.participants.retain(|p| p.user_id != user_id);
    trip.current_participants = trip.participants.len() as u32;
    trip.updated_at = now;

    trip.participants.len() != before
}

/// Newest first, as used by the trip listing
#[inline]
pub fn compare_newest(a: &TripRoom, b: &TripRoom) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
}

/// Most participants first, then newest
#[inline]
pub fn compare_featured(a: &TripRoom, b: &TripRoom) -> Ordering {
    b.current_participants
        .cmp(&a.current_participants)
        .then_with(|| compare_newest(a, b))
}
