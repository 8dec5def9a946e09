use actix_web::{web, HttpResponse};
use chrono::Utc;

use mfa_shared::types::{ApiResponse, HealthResponse, HealthStatus};

use crate::app::AppState;

/// Handler for GET /api/v1/health/status
pub async fn health_status(state: web::Data<AppState>) -> HttpResponse {
    let health = HealthResponse {
        service: state.app_name.clone(),
        status: HealthStatus::Up,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pending_challenges: state.mfa_service.manager().pending_count(),
    };

    HttpResponse::Ok().json(ApiResponse::success_with_message("Service is healthy", health))
}
