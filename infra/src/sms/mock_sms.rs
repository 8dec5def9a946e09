//! Mock SMS Service Implementation
//!
//! Used when SMS delivery is disabled or not configured. Messages are
//! written to the console instead of being sent. Services built with
//! `with_options` also keep the most recent messages in memory so tests can
//! read back the delivered code.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use mfa_shared::utils::phone::{is_valid_e164, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Messages kept by a recording mock; older ones are dropped first
pub const MAX_RECORDED_MESSAGES: usize = 100;

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
    pub message_id: String,
}

/// Mock SMS service for development and testing
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Most recent messages accepted, at most `MAX_RECORDED_MESSAGES`
    sent: Arc<Mutex<VecDeque<SentSms>>>,
    /// Whether accepted messages are kept in `sent`
    record_messages: bool,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service that prints messages to the console
    ///
    /// Nothing is kept in memory, so a long-running server never holds on to
    /// delivered codes.
    pub fn new() -> Self {
        Self {
            record_messages: false,
            ..Self::with_options(true, false)
        }
    }

    /// Create a recording mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(Mutex::new(VecDeque::new())),
            record_messages: true,
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Recorded messages, oldest first
    pub fn sent_messages(&self) -> Vec<SentSms> {
        self.sent
            .lock()
            .map(|sent| sent.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Most recent message sent to `phone_number`
    pub fn last_message_to(&self, phone_number: &str) -> Option<SentSms> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|sms| sms.to == phone_number)
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_e164(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone_number)
            )));
        }

        if self.simulate_failure {
            warn!(
                phone = %mask_phone_number(phone_number),
                "Mock SMS service simulating failure"
            );
            return Err(InfrastructureError::Sms("Simulated SMS sending failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let masked_phone = mask_phone_number(phone_number);

        if self.record_messages {
            if let Ok(mut sent) = self.sent.lock() {
                if sent.len() == MAX_RECORDED_MESSAGES {
                    sent.pop_front();
                }
                sent.push_back(SentSms {
                    to: phone_number.to_string(),
                    body: message.to_string(),
                    message_id: message_id.clone(),
                });
            }
        }

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked_phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
