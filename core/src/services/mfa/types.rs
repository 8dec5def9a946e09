//! Types for MFA service results

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

/// Result of initiating a challenge
///
/// The code itself is not included; it only leaves the process through
/// the delivery channel.
#[derive(Debug)]
pub struct IssuedChallenge {
    /// Identity the challenge is bound to
    pub identity: String,
    /// When the issued code stops validating
    pub expires_at: DateTime<Utc>,
    /// Detached delivery task. Dropping it does not cancel delivery.
    pub delivery: JoinHandle<()>,
}
