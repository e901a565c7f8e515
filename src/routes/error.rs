use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;
use crate::models::ErrorResponse;
use crate::services::{AuthError, RepositoryError};

/// Errors returned by HTTP handlers, rendered as `ErrorResponse` JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a storage error; `context` is the message shown for internal failures
    pub fn storage(err: RepositoryError, context: &str) -> Self {
        match err {
            RepositoryError::Trip(e) => ApiError::BadRequest(e.to_string()),
            RepositoryError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            other => {
                tracing::error!("{}: {}", context, other);
                ApiError::Internal(context.to_string())
            }
        }
    }

    fn label(&self) -> String {
        match self {
            ApiError::Validation(_) => "Validation failed".to_string(),
            other => other.to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::Unauthorized(_) => "Authentication required".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::storage(err, "Storage failure")
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::FirebaseNotConfigured => ApiError::Unauthorized(err.to_string()),
            AuthError::InvalidFirebaseToken(_) => {
                tracing::debug!("{}", err);
                ApiError::Unauthorized("Invalid Firebase token".to_string())
            }
            AuthError::KeyFetch(_) => {
                tracing::warn!("{}", err);
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            _ => ApiError::Unauthorized("Unauthorized".to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.label(),
            message: self.detail(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ApiError::BadRequest(format!("Invalid query: {}", err)).into()
}
