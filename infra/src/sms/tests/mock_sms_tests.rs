//! Unit tests for mock SMS service

use crate::sms::{MockSmsService, SmsService, MAX_RECORDED_MESSAGES};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("+1234567890", "Test message").await;

    let message_id = result.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);

    let sent = service.last_message_to("+1234567890").unwrap();
    assert_eq!(sent.body, "Test message");
    assert_eq!(sent.message_id, message_id);
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("1234567890", "Test message").await;

    if let Err(InfrastructureError::Sms(msg)) = result {
        assert!(msg.contains("Invalid phone number"));
    } else {
        panic!("Expected Sms error");
    }
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::with_options(false, true);

    let result = service.send_sms("+1234567890", "Test message").await;
    assert!(result.is_err());
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_mock_sms_clones_share_outbox() {
    let service = MockSmsService::with_options(false, false);
    let clone = service.clone();

    for i in 1..=3 {
        clone.send_sms("+1234567890", &format!("Message {}", i)).await.unwrap();
        assert_eq!(service.get_message_count(), i);
    }

    assert_eq!(service.last_message_to("+1234567890").unwrap().body, "Message 3");
    assert!(service.last_message_to("+1987654321").is_none());
}

#[tokio::test]
async fn test_default_mock_keeps_no_messages() {
    let service = MockSmsService::new();

    service.send_sms("+1234567890", "Your code is 482913").await.unwrap();

    assert_eq!(service.get_message_count(), 1);
    assert!(service.sent_messages().is_empty());
    assert!(service.last_message_to("+1234567890").is_none());
}

#[tokio::test]
async fn test_recorded_messages_are_bounded() {
    let service = MockSmsService::with_options(false, false);
    let total = MAX_RECORDED_MESSAGES + 5;

    for i in 1..=total {
        service.send_sms("+1234567890", &format!("Message {}", i)).await.unwrap();
    }

    let sent = service.sent_messages();
    assert_eq!(sent.len(), MAX_RECORDED_MESSAGES);
    assert_eq!(sent[0].body, "Message 6");
    assert_eq!(service.last_message_to("+1234567890").unwrap().body, format!("Message {}", total));
    assert_eq!(service.get_message_count(), total as u64);
}

#[test]
fn test_provider_name() {
    let service = MockSmsService::new();
    assert_eq!(service.provider_name(), "Mock");
}
