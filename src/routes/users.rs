use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{merge_profile, params};
use crate::models::{
    Pagination, ProfileResponse, UpdateProfileRequest, UserProfile, UserSearchParams,
    UserSearchResponse,
};
use crate::routes::{ApiError, AppState};
use crate::services::{AuthenticatedUser, CacheKey};

/// Configure user directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users", web::get().to(list_users))
        .route("/users/search", web::get().to(search_users))
        .route("/users/me", web::get().to(get_me))
        .route("/users/me", web::put().to(update_me))
        .route("/users/{id}", web::get().to(get_user));
}

/// GET /api/v1/users
async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state
        .users
        .list_active(state.limits.user_list)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch users"))?;

    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/v1/users/search?city=&country=&travelStyle=&budgetMin=&budgetMax=&page=&limit=
async fn search_users(
    state: web::Data<AppState>,
    query: web::Query<UserSearchParams>,
) -> Result<HttpResponse, ApiError> {
    let search = params::user_search(&query, state.limits.users);
    tracing::debug!("User search: {:?}", search);

    let (users, total) = state
        .users
        .search(&search)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to search users"))?;

    Ok(HttpResponse::Ok().json(UserSearchResponse {
        users,
        pagination: Pagination::new(search.page, search.limit, total),
    }))
}

async fn load_profile(state: &AppState, id: &str) -> Result<UserProfile, ApiError> {
    let key = CacheKey::profile(id);
    if let Ok(profile) = state.cache.get::<UserProfile>(&key).await {
        return Ok(profile);
    }

    let profile = state
        .users
        .get(id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Err(e) = state.cache.set(&key, &profile).await {
        tracing::warn!("Failed to cache profile {}: {}", id, e);
    }

    Ok(profile)
}

/// GET /api/v1/users/{id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let profile = load_profile(&state, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// GET /api/v1/users/me
async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let profile = load_profile(&state, &user.id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user: profile,
    }))
}

/// PUT /api/v1/users/me
///
/// Creates the caller's profile on first use; later calls update the
/// fields present in the body.
async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for profile update: {:?}", errors);
        return Err(errors.into());
    }

    let existing = state
        .users
        .get(&user.id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to update profile"))?;

    let profile = merge_profile(existing, &user.id, req.into_inner(), chrono::Utc::now())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let saved = state
        .users
        .upsert(profile)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to update profile"))?;

    state.cache.invalidate(&CacheKey::profile(&saved.id)).await;
    state.cache.invalidate(&CacheKey::featured_companions()).await;

    tracing::info!("Profile {} updated", saved.id);

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user: saved,
    }))
}
