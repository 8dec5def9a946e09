//! Integration tests for SMS delivery through the MFA service

use std::sync::Arc;

use mfa_core::{MfaService, OtpManager};
use mfa_infra::config::SmsConfig;
use mfa_infra::sms::{MockSmsService, SmsDeliveryAdapter};

const PHONE: &str = "+14155552671";

fn extract_code(body: &str) -> String {
    body.chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

#[tokio::test]
async fn test_issued_code_arrives_by_sms_and_verifies() {
    let sms = MockSmsService::with_options(false, false);
    let config = SmsConfig::default();
    let delivery = Arc::new(SmsDeliveryAdapter::new(
        Arc::new(sms.clone()),
        config.message_template,
    ));
    let service = MfaService::new(Arc::new(OtpManager::with_defaults()), delivery);

    let challenge = service.initiate("user-1", PHONE).unwrap();
    challenge.delivery.await.unwrap();

    let sent = sms.last_message_to(PHONE).unwrap();
    assert!(sent.body.ends_with("It expires in 5 minutes."));

    let code = extract_code(&sent.body);
    assert_eq!(code.len(), 6);
    assert!(service.verify("user-1", &code));
    assert!(!service.verify("user-1", &code));
}

#[tokio::test]
async fn test_failed_sms_does_not_invalidate_code() {
    let manager = Arc::new(OtpManager::with_defaults());
    let delivery = Arc::new(SmsDeliveryAdapter::new(
        Arc::new(MockSmsService::with_options(false, true)),
        "{code}",
    ));
    let service = MfaService::new(manager.clone(), delivery);

    let challenge = service.initiate("user-1", PHONE).unwrap();
    challenge.delivery.await.unwrap();

    assert_eq!(manager.pending_count(), 1);
}

#[tokio::test]
async fn test_invalid_destination_is_logged_not_raised() {
    let sms = MockSmsService::with_options(false, false);
    let delivery = Arc::new(SmsDeliveryAdapter::new(Arc::new(sms.clone()), "{code}"));
    let service = MfaService::new(Arc::new(OtpManager::with_defaults()), delivery);

    let challenge = service.initiate("user-1", "not-a-phone").unwrap();
    challenge.delivery.await.unwrap();

    assert_eq!(sms.get_message_count(), 0);
}
