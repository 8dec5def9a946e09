//! Unit tests for the Twilio SMS service

use crate::config::SmsConfig;
use crate::sms::{SmsService, TwilioConfig, TwilioSmsService};
use crate::InfrastructureError;

fn sms_config() -> SmsConfig {
    SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest".to_string(),
        auth_token: "test_token".to_string(),
        from_number: "+15551234567".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_config_from_sms_config() {
    let config = TwilioConfig::from_sms_config(&sms_config()).unwrap();

    assert_eq!(config.account_sid, "ACtest");
    assert_eq!(config.from_number, "+15551234567");
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.api_base_url, "https://api.twilio.com");
}

#[test]
fn test_config_requires_credentials() {
    let mut config = sms_config();
    config.auth_token = " ".to_string();

    assert!(matches!(
        TwilioConfig::from_sms_config(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_config_requires_e164_from_number() {
    let mut config = sms_config();
    config.from_number = "15551234567".to_string();

    let error = TwilioConfig::from_sms_config(&config).unwrap_err();
    assert!(error.to_string().contains("E.164 format"));
}

#[tokio::test]
async fn test_invalid_destination_is_rejected_before_sending() {
    let service = TwilioSmsService::new(TwilioConfig::from_sms_config(&sms_config()).unwrap()).unwrap();

    let result = service.send_sms("not-a-number", "hello").await;
    assert!(matches!(result, Err(InfrastructureError::Sms(_))));
}

#[tokio::test]
async fn test_oversized_message_is_rejected() {
    let service = TwilioSmsService::new(TwilioConfig::from_sms_config(&sms_config()).unwrap()).unwrap();

    let result = service.send_sms("+14155552671", &"x".repeat(1601)).await;
    assert!(matches!(result, Err(InfrastructureError::Sms(_))));
}

#[tokio::test]
async fn test_unreachable_api_reports_http_error() {
    let mut config = TwilioConfig::from_sms_config(&sms_config()).unwrap();
    config.api_base_url = "http://127.0.0.1:9".to_string();
    config.max_retries = 1;
    config.request_timeout_secs = 2;
    let service = TwilioSmsService::new(config).unwrap();

    let result = service.send_sms("+14155552671", "hello").await;
    assert!(matches!(result, Err(InfrastructureError::Http(_))));
}
