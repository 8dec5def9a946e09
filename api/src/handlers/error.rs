//! API error type and its mapping onto the response envelope

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use mfa_core::errors::DomainError;
use mfa_shared::types::ApiResponse;

/// Message returned for every failed verification, whatever the cause
pub const INVALID_OTP_MESSAGE: &str = "Invalid or expired OTP";

/// Errors surfaced by the HTTP layer
///
/// Every variant renders as `{ "success": false, "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("An OTP is already pending for this user")]
    ChallengePending,

    #[error("The requested resource was not found")]
    NotFound,
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidArgument { message } => ApiError::Validation(message),
            DomainError::ChallengePending => ApiError::ChallengePending,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(format_validation_errors(&errors))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::InvalidOtp => StatusCode::BAD_REQUEST,
            ApiError::ChallengePending => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}

/// Render validator errors as `field: code` pairs in a stable order
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let codes: Vec<&str> = errs.iter().map(|e| &*e.code).collect();
            format!("{}: {}", field, codes.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

/// Error handler for the JSON extractor
///
/// Malformed or incomplete bodies get the same envelope as every other
/// validation failure.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::Validation(err.to_string()).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
