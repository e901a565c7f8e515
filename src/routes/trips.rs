use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;
use crate::core::{params, trips};
use crate::models::{
    CreateTripRequest, JoinTripRequest, Pagination, Participant, TripActionResponse, TripCreator,
    TripListParams, TripListResponse, UserProfile,
};
use crate::routes::{ApiError, AppState};
use crate::services::{AuthenticatedUser, CacheKey};

/// Configure trip room routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/trips", web::get().to(list_trips))
        .route("/trips", web::post().to(create_trip))
        .route("/trips/featured", web::get().to(featured_trips))
        .route("/trips/{id}", web::get().to(get_trip))
        .route("/trips/{id}/join", web::post().to(join_trip))
        .route("/trips/{id}/leave", web::post().to(leave_trip));
}

/// GET /api/v1/trips?destination=&budgetMin=&budgetMax=&startDate=&travelStyle=&page=&limit=
async fn list_trips(
    state: web::Data<AppState>,
    query: web::Query<TripListParams>,
) -> Result<HttpResponse, ApiError> {
    let search = params::trip_search(&query, state.limits.trips);
    tracing::debug!("Trip search: {:?}", search);

    let (trips, total) = state
        .trips
        .list(&search)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch trips"))?;

    Ok(HttpResponse::Ok().json(TripListResponse {
        trips,
        pagination: Pagination::new(search.page, search.limit, total),
    }))
}

/// GET /api/v1/trips/featured
async fn featured_trips(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let limit = state.limits.featured_trips;
    let repo = state.trips.clone();

    let featured = state
        .cache
        .get_or_load(&CacheKey::featured_trips(), || async move {
            repo.featured(Utc::now(), limit).await
        })
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch featured trips"))?;

    Ok(HttpResponse::Ok().json(featured))
}

/// GET /api/v1/trips/{id}
async fn get_trip(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip = state
        .trips
        .get(&path.into_inner())
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch trip"))?
        .ok_or_else(|| ApiError::NotFound("Trip not found".to_string()))?;

    Ok(HttpResponse::Ok().json(trip))
}

/// Stored profile of the caller, if they have one
async fn caller_profile(state: &AppState, user: &AuthenticatedUser) -> Option<UserProfile> {
    match state.users.get(&user.id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Failed to load profile {} for display name: {}", user.id, e);
            None
        }
    }
}

fn display_name(profile: Option<&UserProfile>, user: &AuthenticatedUser) -> String {
    profile
        .map(|p| p.name.clone())
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| user.id.clone())
}

/// Create a trip room
///
/// POST /api/v1/trips
///
/// The caller becomes the creator and first participant.
async fn create_trip(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_trip request: {:?}", errors);
        return Err(errors.into());
    }

    let profile = caller_profile(&state, &user).await;
    let creator = TripCreator {
        id: user.id.clone(),
        name: display_name(profile.as_ref(), &user),
        profile_picture: profile.map(|p| p.profile_picture).unwrap_or_default(),
    };

    let trip = trips::new_trip(
        uuid::Uuid::new_v4().to_string(),
        req.into_inner(),
        creator,
        Utc::now(),
    );

    let trip = state
        .trips
        .create(trip)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to create trip"))?;

    state.cache.invalidate(&CacheKey::featured_trips()).await;
    tracing::info!("Trip {} created by {}", trip.id, user.id);

    Ok(HttpResponse::Created().json(TripActionResponse {
        success: true,
        message: "Trip created successfully".to_string(),
        trip,
    }))
}

/// Join a trip room
///
/// POST /api/v1/trips/{id}/join
///
/// Optional body:
/// ```json
/// { "userName": "string", "userProfilePicture": "string" }
/// ```
async fn join_trip(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: Option<web::Json<JoinTripRequest>>,
) -> Result<HttpResponse, ApiError> {
    let trip_id = path.into_inner();
    let body = body.map(web::Json::into_inner).unwrap_or_default();

    let profile = caller_profile(&state, &user).await;
    let participant = Participant {
        user_id: user.id.clone(),
        name: body
            .user_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| display_name(profile.as_ref(), &user)),
        profile_picture: body
            .user_profile_picture
            .or_else(|| profile.map(|p| p.profile_picture))
            .unwrap_or_default(),
        joined_at: Utc::now(),
    };

    let trip = state
        .trips
        .join(&trip_id, participant)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to join trip"))?;

    state.cache.invalidate(&CacheKey::featured_trips()).await;
    tracing::info!(
        "{} joined trip {} ({}/{})",
        user.id,
        trip.id,
        trip.current_participants,
        trip.max_participants
    );

    Ok(HttpResponse::Ok().json(TripActionResponse {
        success: true,
        message: "Successfully joined trip".to_string(),
        trip,
    }))
}

/// Leave a trip room; leaving a trip you are not in succeeds
///
/// POST /api/v1/trips/{id}/leave
async fn leave_trip(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip = state
        .trips
        .leave(&path.into_inner(), &user.id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to leave trip"))?;

    state.cache.invalidate(&CacheKey::featured_trips()).await;
    tracing::info!("{} left trip {}", user.id, trip.id);

    Ok(HttpResponse::Ok().json(TripActionResponse {
        success: true,
        message: "Successfully left trip".to_string(),
        trip,
    }))
}
