//! Integration tests for bearer token authentication on the auth routes

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use mfa_api::app::create_app;

use common::{bearer, context, token_signed_with, MAX_PAYLOAD, PHONE, SECRET};

async fn assert_unauthorized(resp: actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) {
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Authentication failed"));
}

#[actix_web::test]
async fn test_missing_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors, MAX_PAYLOAD)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/initiate-mfa")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-otp")
        .set_json(json!({ "otp": "123456" }))
        .to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    // Rejected before any challenge was created
    assert_eq!(ctx.manager.pending_count(), 0);
}

#[actix_web::test]
async fn test_malformed_authorization_header() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors, MAX_PAYLOAD)).await;

    for header in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer not-a-jwt"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/initiate-mfa")
            .insert_header(("Authorization", header))
            .set_json(json!({ "phoneNumber": PHONE }))
            .to_request();
        assert_unauthorized(test::call_service(&app, req).await).await;
    }
}

#[actix_web::test]
async fn test_wrong_signature_and_expired_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors, MAX_PAYLOAD)).await;

    let forged = token_signed_with("some-other-secret", "user-1", 600);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/initiate-mfa")
        .insert_header(bearer(&forged))
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    assert_unauthorized(test::call_service(&app, req).await).await;

    // Well beyond the configured leeway
    let expired = token_signed_with(SECRET, "user-1", -3600);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/initiate-mfa")
        .insert_header(bearer(&expired))
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Authentication failed: token expired");

    assert_eq!(ctx.manager.pending_count(), 0);
    assert_eq!(ctx.sms.get_message_count(), 0);
}

#[actix_web::test]
async fn test_health_does_not_require_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.cors, MAX_PAYLOAD)).await;

    let req = test::TestRequest::get().uri("/api/v1/health/status").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
