//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use mfa_core::services::mfa::MfaService;
use mfa_shared::config::CorsConfig;

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::{auth::JwtAuth, auth::JwtVerifier, cors::create_cors};
use crate::routes::auth::{initiate_mfa, verify_otp};
use crate::routes::health::health_status;

/// Application state shared by every worker
pub struct AppState {
    /// Challenge issuance and verification
    pub mfa_service: Arc<MfaService>,
    /// Bearer token verification
    pub jwt_verifier: Arc<JwtVerifier>,
    /// Service name reported by the health endpoint
    pub app_name: String,
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let jwt_auth = JwtAuth::new(Arc::clone(&app_state.jwt_verifier));
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)

        // Add middleware (CORS wraps logging so preflights are logged too)
        .wrap(Logger::default())
        .wrap(create_cors(cors_config))

        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Auth routes, bearer token required
                .service(
                    web::scope("/auth")
                        .wrap(jwt_auth)
                        .route("/initiate-mfa", web::post().to(initiate_mfa))
                        .route("/verify-otp", web::post().to(verify_otp)),
                )
                // Health routes, public
                .service(web::scope("/health").route("/status", web::get().to(health_status)))
                // API documentation endpoint
                .route("/", web::get().to(api_documentation)),
        )

        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "MFA Callback Service API v1",
        "endpoints": {
            "health": {
                "path": "/api/v1/health/status",
                "method": "GET",
                "description": "Service health and pending challenge count"
            },
            "auth": {
                "initiate_mfa": {
                    "path": "/api/v1/auth/initiate-mfa",
                    "method": "POST",
                    "description": "Issue a one-time passcode and send it by SMS",
                    "requires_auth": true,
                    "request_body": {
                        "phoneNumber": "string (E.164, e.g. +14155552671)"
                    },
                    "responses": {
                        "200": "OTP sent successfully",
                        "400": "Invalid phone number",
                        "401": "Authentication required"
                    }
                },
                "verify_otp": {
                    "path": "/api/v1/auth/verify-otp",
                    "method": "POST",
                    "description": "Verify a one-time passcode",
                    "requires_auth": true,
                    "request_body": {
                        "otp": "string (4-12 digits)",
                        "userId": "string (optional, must match the token subject)"
                    },
                    "responses": {
                        "200": "OTP verified successfully",
                        "400": "Invalid or expired OTP",
                        "401": "Authentication required"
                    }
                }
            }
        }
    }))
}
