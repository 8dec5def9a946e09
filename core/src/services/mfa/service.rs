//! MFA service implementation

use std::sync::Arc;

use mfa_shared::utils::phone::mask_phone_number;

use crate::errors::DomainResult;
use crate::services::otp::OtpManager;

use super::traits::OtpDelivery;
use super::types::IssuedChallenge;

/// Issues challenges, hands them to a delivery channel, and verifies responses
pub struct MfaService {
    /// Challenge store shared with the sweeper
    manager: Arc<OtpManager>,
    /// Out-of-band delivery channel
    delivery: Arc<dyn OtpDelivery>,
}

impl MfaService {
    /// Create a new MFA service
    ///
    /// # Arguments
    ///
    /// * `manager` - Challenge store
    /// * `delivery` - Channel that carries codes to the user
    pub fn new(manager: Arc<OtpManager>, delivery: Arc<dyn OtpDelivery>) -> Self {
        Self { manager, delivery }
    }

    /// Issue a code for `identity` and send it to `destination`
    ///
    /// The record is stored before delivery is spawned. Delivery runs on a
    /// detached task; its failure is logged and never reported here.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the issuance error unchanged, in which case no delivery is
    /// attempted.
    pub fn initiate(&self, identity: &str, destination: &str) -> DomainResult<IssuedChallenge> {
        let issued = self.manager.issue_challenge(identity)?;

        let delivery = Arc::clone(&self.delivery);
        let destination = destination.to_string();
        let owner = identity.to_string();
        let validity_minutes = self.manager.validity_minutes();
        let code = issued.code;

        let handle = tokio::spawn(async move {
            match delivery.deliver(&destination, &code, validity_minutes).await {
                Ok(message_id) => {
                    tracing::info!(
                        identity = %owner,
                        destination = %mask_phone_number(&destination),
                        channel = delivery.channel_name(),
                        message_id = %message_id,
                        event = "otp_delivered",
                        "Delivered one-time passcode"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        identity = %owner,
                        destination = %mask_phone_number(&destination),
                        channel = delivery.channel_name(),
                        error = %e,
                        event = "otp_delivery_failed",
                        "Failed to deliver one-time passcode"
                    );
                }
            }
        });

        Ok(IssuedChallenge {
            identity: identity.to_string(),
            expires_at: issued.expires_at,
            delivery: handle,
        })
    }

    /// Verify a submitted code for `identity`
    ///
    /// Unknown identity, wrong code and expired code all yield `false`.
    pub fn verify(&self, identity: &str, code: &str) -> bool {
        self.manager.validate(identity, code)
    }

    /// The underlying challenge store
    pub fn manager(&self) -> &Arc<OtpManager> {
        &self.manager
    }

    /// Name of the configured delivery channel
    pub fn channel_name(&self) -> &str {
        self.delivery.channel_name()
    }
}
