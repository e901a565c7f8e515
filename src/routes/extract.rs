use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;
use crate::routes::{ApiError, AppState};
use crate::services::AuthenticatedUser;

pub const FIREBASE_TOKEN_HEADER: &str = "x-firebase-token";

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    header_value(req, "authorization")
        .and_then(|v| v.strip_prefix("Bearer ").map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
}

/// Requires a verified caller; wrap in `Option` for endpoints where it is optional
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let bearer = bearer_token(req);
        let firebase = header_value(req, FIREBASE_TOKEN_HEADER);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState missing from request");
                ApiError::Internal("Server misconfigured".to_string())
            })?;

            let user = state
                .auth
                .authenticate(bearer.as_deref(), firebase.as_deref())
                .await?;

            tracing::debug!("Authenticated {} via {:?}", user.id, user.source);
            Ok(user)
        })
    }
}
