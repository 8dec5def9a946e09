//! SMS Delivery Adapter
//!
//! Implements the core `OtpDelivery` trait on top of any `SmsService`,
//! bridging the infrastructure providers with the MFA service.

use async_trait::async_trait;
use std::sync::Arc;

use mfa_core::services::mfa::OtpDelivery;

use crate::sms::sms_service::{render_message, SmsService};

/// Adapter that delivers passcodes as SMS messages
pub struct SmsDeliveryAdapter {
    inner: Arc<dyn SmsService>,
    message_template: String,
}

impl SmsDeliveryAdapter {
    /// Create a new adapter around an SMS provider
    pub fn new(inner: Arc<dyn SmsService>, message_template: impl Into<String>) -> Self {
        Self {
            inner,
            message_template: message_template.into(),
        }
    }
}

#[async_trait]
impl OtpDelivery for SmsDeliveryAdapter {
    async fn deliver(
        &self,
        destination: &str,
        code: &str,
        validity_minutes: u64,
    ) -> Result<String, String> {
        let message = render_message(&self.message_template, code, validity_minutes);
        self.inner
            .send_sms(destination, &message)
            .await
            .map_err(|e| e.to_string())
    }

    fn channel_name(&self) -> &str {
        self.inner.provider_name()
    }
}
