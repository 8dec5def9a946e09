//! # Infrastructure Layer
//!
//! Concrete implementations of the delivery channel the core hands issued
//! codes to.
//!
//! ## Architecture
//!
//! - **SMS**: provider trait, a Twilio REST client and a mock provider
//! - **Adapter**: bridges any SMS provider to the core `OtpDelivery` trait
//! - **Config**: provider selection and credentials from the environment

/// SMS service module - External SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for the SMS delivery channel

    use serde::{Deserialize, Serialize};

    /// Default message body; `{code}` and `{minutes}` are substituted
    pub const DEFAULT_MESSAGE_TEMPLATE: &str =
        "Your verification code is {code}. It expires in {minutes} minutes.";

    /// SMS service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider ("twilio", "mock")
        pub provider: String,
        /// Twilio account SID
        pub account_sid: String,
        /// Twilio auth token
        pub auth_token: String,
        /// From phone number
        pub from_number: String,
        /// Message body template
        pub message_template: String,
        /// Timeout for provider API requests in seconds
        pub request_timeout_secs: u64,
        /// Maximum send attempts per message
        pub max_retries: u32,
        /// Initial retry delay in milliseconds
        pub retry_delay_ms: u64,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                account_sid: String::new(),
                auth_token: String::new(),
                from_number: String::new(),
                message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
                request_timeout_secs: 10,
                max_retries: 3,
                retry_delay_ms: 500,
            }
        }
    }

    impl SmsConfig {
        /// Load SMS configuration from environment variables
        pub fn from_env() -> Self {
            let defaults = Self::default();
            let var = |key: &str, default: String| std::env::var(key).unwrap_or(default);
            let num = |key: &str, default: u64| {
                std::env::var(key)
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(default)
            };

            Self {
                provider: var("SMS_PROVIDER", defaults.provider).to_lowercase(),
                account_sid: var("TWILIO_ACCOUNT_SID", defaults.account_sid),
                auth_token: var("TWILIO_AUTH_TOKEN", defaults.auth_token),
                from_number: var("TWILIO_FROM_NUMBER", defaults.from_number),
                message_template: var("OTP_MESSAGE_TEMPLATE", defaults.message_template),
                request_timeout_secs: num("SMS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
                max_retries: num("SMS_MAX_RETRIES", defaults.max_retries as u64) as u32,
                retry_delay_ms: num("SMS_RETRY_DELAY_MS", defaults.retry_delay_ms),
            }
        }

        /// Whether every Twilio credential is present
        pub fn has_twilio_credentials(&self) -> bool {
            !self.account_sid.trim().is_empty()
                && !self.auth_token.trim().is_empty()
                && !self.from_number.trim().is_empty()
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
