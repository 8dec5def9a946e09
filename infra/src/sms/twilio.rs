//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Programmable Messaging REST API.
//!
//! ## Features
//!
//! - E.164 validation before any request is made
//! - Retry with exponential backoff on rate limiting and server errors
//! - No retry on client errors such as an unroutable number
//! - Phone number masking in logs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use mfa_shared::utils::phone::{is_valid_e164, mask_phone_number};

use crate::config::SmsConfig;
use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// Public Twilio API host
pub const TWILIO_API_BASE_URL: &str = "https://api.twilio.com";

/// Twilio limit on a single message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum send attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// API host, overridable for tests
    pub api_base_url: String,
}

impl TwilioConfig {
    /// Build a Twilio configuration from the generic SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if !config.has_twilio_credentials() {
            return Err(InfrastructureError::Config(
                "TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_FROM_NUMBER must all be set"
                    .to_string(),
            ));
        }

        if !is_valid_e164(config.from_number.trim()) {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.trim().to_string(),
            auth_token: config.auth_token.trim().to_string(),
            from_number: config.from_number.trim().to_string(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
            api_base_url: TWILIO_API_BASE_URL.to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

/// Successful message creation response
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// Error body returned by the Twilio API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self { client, config })
    }

    /// Send one request, reporting whether a failure is worth retrying
    async fn send_once(&self, to: &str, message: &str) -> Result<String, (bool, InfrastructureError)> {
        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.from_number.as_str()),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(|e| (true, InfrastructureError::Http(e)))?;

        let status = response.status();
        if status.is_success() {
            let resource: MessageResource = response
                .json()
                .await
                .map_err(|e| (false, InfrastructureError::Http(e)))?;
            debug!(sid = %resource.sid, status = ?resource.status, "Twilio accepted message");
            return Ok(resource.sid);
        }

        let retryable = status.as_u16() == 429 || status.is_server_error();
        let body = response.json::<ApiErrorBody>().await.ok();
        let detail = body
            .map(|b| {
                format!(
                    "{} (code {})",
                    b.message.unwrap_or_default(),
                    b.code.map(|c| c.to_string()).unwrap_or_else(|| "n/a".to_string())
                )
            })
            .unwrap_or_default();

        Err((
            retryable,
            InfrastructureError::Sms(format!("Twilio returned {}: {}", status, detail)),
        ))
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            match self.send_once(to, message).await {
                Ok(sid) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        sid
                    );
                    return Ok(sid);
                }
                Err((retryable, e)) => {
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if !retryable || attempts >= self.config.max_retries {
                        return Err(e);
                    }

                    warn!("Retrying SMS send after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if !is_valid_e164(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone_number)
            )));
        }

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(phone_number),
            message.len()
        );

        self.send_with_retry(phone_number, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
