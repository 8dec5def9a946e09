//! SMS Service Interface
//!
//! Defines the trait for SMS providers and the formatting of passcode
//! messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio REST API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Render a passcode message from a template
///
/// `{code}` is replaced with the code and `{minutes}` with the validity.
///
/// ```ignore
/// let body = render_message("Code {code}, valid {minutes} min", "482913", 5);
/// assert_eq!(body, "Code 482913, valid 5 min");
/// ```
pub fn render_message(template: &str, code: &str, validity_minutes: u64) -> String {
    template
        .replace("{code}", code)
        .replace("{minutes}", &validity_minutes.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MESSAGE_TEMPLATE;

    #[test]
    fn test_render_default_template() {
        assert_eq!(
            render_message(DEFAULT_MESSAGE_TEMPLATE, "012345", 5),
            "Your verification code is 012345. It expires in 5 minutes."
        );
    }

    #[test]
    fn test_render_template_without_minutes() {
        assert_eq!(render_message("{code} is your code", "4821", 10), "4821 is your code");
    }
}
