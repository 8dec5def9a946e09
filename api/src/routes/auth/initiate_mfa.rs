use actix_web::{web, HttpResponse};

use mfa_shared::types::ApiResponse;
use mfa_shared::utils::phone::mask_phone_number;

use crate::app::AppState;
use crate::dto::auth::AuthRequest;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/initiate-mfa
///
/// Issues a one-time passcode for the authenticated user and sends it to the
/// given phone number. The response never contains the code, and a delivery
/// failure does not fail the request.
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+14155552671" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Operation successful", "data": "OTP sent successfully" }
/// ```
pub async fn initiate_mfa(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<AuthRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.check()?;

    log::info!(
        "Initiating MFA for {} to phone {}",
        auth.identity,
        mask_phone_number(&request.phone_number)
    );

    let challenge = state
        .mfa_service
        .initiate(&auth.identity, &request.phone_number)?;

    log::debug!(
        "OTP for {} expires at {}",
        challenge.identity,
        challenge.expires_at
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success("OTP sent successfully")))
}
