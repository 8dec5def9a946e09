//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use jsonwebtoken::{encode, EncodingKey, Header};

use mfa_api::app::AppState;
use mfa_api::middleware::auth::{Claims, JwtVerifier};
use mfa_core::services::mfa::MfaService;
use mfa_core::services::otp::OtpManager;
use mfa_infra::config::DEFAULT_MESSAGE_TEMPLATE;
use mfa_infra::sms::{MockSmsService, SmsDeliveryAdapter};
use mfa_shared::config::{CorsConfig, JwtConfig};

pub const SECRET: &str = "integration-test-secret";
pub const PHONE: &str = "+14155552671";
pub const MAX_PAYLOAD: usize = 16 * 1024;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub manager: Arc<OtpManager>,
    pub sms: MockSmsService,
    pub cors: CorsConfig,
}

/// Wire the application around the given store and a silent mock provider
pub fn context_with(manager: OtpManager) -> TestContext {
    let manager = Arc::new(manager);
    let sms = MockSmsService::with_options(false, false);
    let delivery = Arc::new(SmsDeliveryAdapter::new(
        Arc::new(sms.clone()),
        DEFAULT_MESSAGE_TEMPLATE,
    ));
    let verifier = JwtVerifier::new(&JwtConfig::new(SECRET)).unwrap();

    let state = web::Data::new(AppState {
        mfa_service: Arc::new(MfaService::new(Arc::clone(&manager), delivery)),
        jwt_verifier: Arc::new(verifier),
        app_name: "mfa-callback-service".to_string(),
    });

    TestContext {
        state,
        manager,
        sms,
        cors: CorsConfig::development(),
    }
}

pub fn context() -> TestContext {
    context_with(OtpManager::with_defaults())
}

/// A bearer token for `sub` signed with the test secret
pub fn token_for(sub: &str) -> String {
    token_signed_with(SECRET, sub, 600)
}

pub fn token_signed_with(secret: &str, sub: &str, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        exp: now + expires_in,
        iat: Some(now),
        jti: None,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Wait for the detached delivery task and pull the code out of the SMS
pub async fn delivered_code(sms: &MockSmsService, phone: &str, previous: usize) -> String {
    for _ in 0..100 {
        let sent: Vec<_> = sms.sent_messages().into_iter().filter(|m| m.to == phone).collect();
        if sent.len() > previous {
            let body = &sent[sent.len() - 1].body;
            return body
                .split(|c: char| !c.is_ascii_digit())
                .find(|run| run.len() == 6)
                .expect("message carries a 6-digit code")
                .to_string();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no SMS delivered to {}", phone);
}
