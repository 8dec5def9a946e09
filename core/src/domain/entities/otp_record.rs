//! Outstanding one-time passcode challenge.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;

/// One outstanding challenge: the code an identity must echo back before
/// `expires_at`.
///
/// Records are owned exclusively by the store and never handed out, so the
/// secret is not exposed through `Debug` either.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// Identity the code is bound to
    pub identity: String,

    /// Fixed-width numeric code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer valid
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record issued now and valid for `validity`
    pub fn new(identity: impl Into<String>, code: impl Into<String>, validity: Duration) -> Self {
        Self::issued_at(identity, code, Utc::now(), validity)
    }

    /// Creates a record issued at a given instant
    ///
    /// An expiry past the representable range saturates at the latest
    /// representable instant.
    pub fn issued_at(
        identity: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        Self {
            identity: identity.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at
                .checked_add_signed(validity)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// A record is fresh strictly before its expiry instant
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Checks if the record has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_fresh_at(now)
    }

    /// Compares a submitted code in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("identity", &self.identity)
            .field("code", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
