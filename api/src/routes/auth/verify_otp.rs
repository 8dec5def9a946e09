use actix_web::{web, HttpResponse};

use mfa_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::OtpVerificationRequest;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/verify-otp
///
/// Checks a submitted code against the one issued to the authenticated
/// user. Unknown user, wrong code and expired code all produce the same
/// `400 Invalid or expired OTP`.
///
/// # Request Body
///
/// ```json
/// { "otp": "482913", "userId": "optional, must match the token subject" }
/// ```
pub async fn verify_otp(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<OtpVerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.check()?;

    if let Some(user_id) = request.user_id.as_deref() {
        if user_id != auth.identity {
            log::warn!(
                "OTP verification for {} named a different user id",
                auth.identity
            );
            return Err(ApiError::InvalidOtp);
        }
    }

    if !state.mfa_service.verify(&auth.identity, &request.otp) {
        log::info!("OTP verification failed for {}", auth.identity);
        return Err(ApiError::InvalidOtp);
    }

    log::info!("OTP verified for {}", auth.identity);
    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP verified successfully")))
}
