use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::params;
use crate::models::{
    CompanionRequest, CompanionRequestResponse, CompanionSearchParams, FindCompanionsResponse,
};
use crate::routes::{ApiError, AppState};
use crate::services::{AuthenticatedUser, CacheKey};

/// Configure all companion-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/companions/find", web::get().to(find_companions))
        .route("/companions/featured", web::get().to(featured_companions))
        .route("/companions/request", web::post().to(request_companion));
}

/// Find compatible travel companions
///
/// GET /api/v1/companions/find?budgetMin=&budgetMax=&travelStyle=&page=&limit=
///
/// Authentication is optional. An authenticated caller is excluded from
/// their own results; otherwise the `userId` parameter is used.
async fn find_companions(
    state: web::Data<AppState>,
    params: web::Query<CompanionSearchParams>,
    user: Option<AuthenticatedUser>,
) -> Result<HttpResponse, ApiError> {
    let query = params::match_query(&params, user.map(|u| u.id), state.limits.companions);

    tracing::info!(
        "Finding companions for {:?} (style: {:?}, budget: {:?}, page: {}, limit: {})",
        query.requester_id,
        query.travel_style,
        query.budget,
        query.page,
        query.page_size
    );

    let candidates = state
        .users
        .find_active_excluding(query.requester_id.as_deref(), &query)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to find companions"))?;

    tracing::debug!("Loaded {} candidates", candidates.len());

    let result = state.matcher.find_companions(&query, candidates);

    tracing::info!(
        "Returning {} companions (from {} candidates)",
        result.companions.len(),
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(FindCompanionsResponse {
        companions: result.companions,
        total: result.total_candidates,
        page: query.page,
        limit: query.page_size,
    }))
}

/// Highly rated, experienced companions
///
/// GET /api/v1/companions/featured
async fn featured_companions(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let limit = state.limits.featured_companions;
    let users = state.users.clone();

    let featured = state
        .cache
        .get_or_load(&CacheKey::featured_companions(), || async move {
            users.featured(limit).await
        })
        .await
        .map_err(|e| ApiError::storage(e, "Failed to fetch featured companions"))?;

    Ok(HttpResponse::Ok().json(featured))
}

/// Send a companion request
///
/// POST /api/v1/companions/request
///
/// Request body:
/// ```json
/// {
///   "companionId": "string",
///   "message": "string",
///   "tripDetails": {}
/// }
/// ```
async fn request_companion(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CompanionRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for companion request: {:?}", errors);
        return Err(errors.into());
    }

    if req.companion_id == user.id {
        return Err(ApiError::BadRequest("Cannot send a companion request to yourself".to_string()));
    }

    let target = state
        .users
        .get(&req.companion_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to send companion request"))?;

    match target {
        Some(companion) if companion.is_active => {}
        _ => return Err(ApiError::NotFound("Companion not found".to_string())),
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Companion request {} from {} to {}", request_id, user.id, req.companion_id);

    Ok(HttpResponse::Ok().json(CompanionRequestResponse {
        success: true,
        message: "Companion request sent successfully!".to_string(),
        request_id,
    }))
}
