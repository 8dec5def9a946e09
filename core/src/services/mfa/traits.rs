//! Trait for out-of-band code delivery

use async_trait::async_trait;

/// Delivers an issued code to a destination such as a phone number
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Send `code` to `destination`, returning a provider message id
    async fn deliver(
        &self,
        destination: &str,
        code: &str,
        validity_minutes: u64,
    ) -> Result<String, String>;

    /// Name of the delivery channel, for logging
    fn channel_name(&self) -> &str;
}
