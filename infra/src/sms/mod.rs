//! SMS Service Module
//!
//! SMS providers that carry one-time passcodes to the user.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via the Twilio REST API
//! - **Delivery Adapter**: Exposes a provider as the core delivery channel

use std::sync::Arc;

pub mod delivery_adapter;
pub mod mock_sms;
pub mod sms_service;
pub mod twilio;

// Re-export commonly used types
pub use delivery_adapter::SmsDeliveryAdapter;
pub use mock_sms::{MockSmsService, SentSms, MAX_RECORDED_MESSAGES};
pub use sms_service::{render_message, SmsService};
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Unknown providers, and Twilio without complete credentials, fall back to
/// the mock provider so the service still starts with SMS disabled.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::new()),
        "twilio" => {
            let service = TwilioConfig::from_sms_config(config).and_then(TwilioSmsService::new);
            match service {
                Ok(service) => Arc::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                    tracing::warn!("Falling back to mock SMS service, SMS delivery is disabled");
                    Arc::new(MockSmsService::new())
                }
            }
        }
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Arc::new(MockSmsService::new())
        }
    }
}
