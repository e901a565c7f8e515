use actix_web::{web, HttpResponse, Responder};
use crate::core::validate_aadhaar;
use crate::models::{AadhaarRequest, AadhaarResponse, HealthResponse, PingResponse};
use crate::routes::AppState;

/// Routes mounted directly under `/api`
pub fn configure_ping(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping));
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/identity/aadhaar", web::post().to(check_aadhaar));
}

async fn ping() -> impl Responder {
    HttpResponse::Ok().json(PingResponse {
        success: true,
        message: "pong".to_string(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let storage_healthy = state.users.health_check().await;

    let status = if storage_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Aadhaar checksum validation
///
/// POST /api/v1/identity/aadhaar
///
/// Always answers 200; the verdict is in the body.
async fn check_aadhaar(req: web::Json<AadhaarRequest>) -> impl Responder {
    let response = match validate_aadhaar(&req.aadhaar) {
        Ok(()) => AadhaarResponse { valid: true, reason: None },
        Err(e) => AadhaarResponse {
            valid: false,
            reason: Some(e.to_string()),
        },
    };

    HttpResponse::Ok().json(response)
}
