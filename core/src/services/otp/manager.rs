//! Concurrent challenge store

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mfa_shared::config::otp::{MAX_CODE_LENGTH, MAX_VALIDITY_SECONDS, MIN_CODE_LENGTH};
use mfa_shared::config::{IssuePolicy, OtpConfig};

use crate::domain::entities::OtpRecord;
use crate::errors::{DomainError, DomainResult};

use super::generator::generate_numeric_code;

/// A freshly issued code together with its expiry
#[derive(Clone)]
pub struct IssuedOtp {
    /// The generated code, to be delivered out-of-band
    pub code: String,
    /// Instant after which the code no longer validates
    pub expires_at: DateTime<Utc>,
}

/// Owns every outstanding challenge, keyed by identity.
///
/// The map is sharded so operations on different identities never contend
/// on a single lock. Every per-identity operation runs while holding that
/// identity's shard lock, which makes issue, validate and sweep
/// linearizable for the same identity.
pub struct OtpManager {
    records: DashMap<String, OtpRecord>,
    code_length: usize,
    validity: Duration,
    issue_policy: IssuePolicy,
}

impl OtpManager {
    /// Create a manager from configuration
    pub fn new(config: &OtpConfig) -> Self {
        let validity = Duration::from_std(config.validity()).unwrap_or_else(|_| {
            tracing::warn!(
                validity_seconds = config.validity_seconds,
                "OTP validity out of range, using the default of 5 minutes"
            );
            Duration::minutes(5)
        });

        Self::with_settings(config.effective_code_length(), validity, config.issue_policy)
    }

    /// Create a manager with 6-digit codes valid for 5 minutes
    pub fn with_defaults() -> Self {
        Self::new(&OtpConfig::default())
    }

    /// Create a manager from explicit settings
    ///
    /// `code_length` is kept within `MIN_CODE_LENGTH..=MAX_CODE_LENGTH` and
    /// `validity` is capped at `MAX_VALIDITY_SECONDS`.
    pub fn with_settings(code_length: usize, validity: Duration, issue_policy: IssuePolicy) -> Self {
        Self {
            records: DashMap::new(),
            code_length: code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
            validity: validity.min(Duration::seconds(MAX_VALIDITY_SECONDS as i64)),
            issue_policy,
        }
    }

    /// Issue a new code for `identity` and return it
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - identity is empty or whitespace
    /// * `ChallengePending` - a fresh code is outstanding and the policy is
    ///   `RejectPending`
    pub fn issue(&self, identity: &str) -> DomainResult<String> {
        self.issue_challenge(identity).map(|issued| issued.code)
    }

    /// Issue a new code for `identity`, returning it with its expiry
    pub fn issue_challenge(&self, identity: &str) -> DomainResult<IssuedOtp> {
        if identity.trim().is_empty() {
            return Err(DomainError::invalid_argument("identity must not be blank"));
        }

        let now = Utc::now();
        let record = OtpRecord::issued_at(
            identity,
            generate_numeric_code(self.code_length),
            now,
            self.validity,
        );
        let issued = IssuedOtp {
            code: record.code.clone(),
            expires_at: record.expires_at,
        };

        match self.issue_policy {
            IssuePolicy::Replace => {
                if let Some(previous) = self.records.insert(identity.to_string(), record) {
                    tracing::debug!(
                        identity = identity,
                        previous_expires_at = %previous.expires_at,
                        "Discarded outstanding code superseded by a new issuance"
                    );
                }
            }
            IssuePolicy::RejectPending => match self.records.entry(identity.to_string()) {
                Entry::Occupied(mut entry) => {
                    if entry.get().is_fresh_at(now) {
                        tracing::warn!(
                            identity = identity,
                            event = "otp_issue_rejected",
                            "Code already pending for identity"
                        );
                        return Err(DomainError::ChallengePending);
                    }
                    entry.insert(record);
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            },
        }

        tracing::info!(
            identity = identity,
            event = "otp_issued",
            expires_at = %issued.expires_at,
            "Issued one-time passcode"
        );

        Ok(issued)
    }

    /// Check a submitted code, consuming the record on success
    ///
    /// Returns `true` only for a matching, unexpired code. An expired record
    /// is removed whatever was submitted; a wrong code against a fresh record
    /// leaves it in place so the user can retry. A blank identity returns
    /// `false` without touching the store.
    pub fn validate(&self, identity: &str, code: &str) -> bool {
        if identity.trim().is_empty() {
            return false;
        }

        let now = Utc::now();
        let entry = match self.records.entry(identity.to_string()) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => {
                tracing::debug!(identity = identity, event = "otp_not_found", "No pending code");
                return false;
            }
        };

        let fresh = entry.get().is_fresh_at(now);
        let matches = entry.get().matches(code);

        if !fresh {
            entry.remove();
            tracing::info!(
                identity = identity,
                event = "otp_expired",
                "Removed expired code on validation"
            );
            return false;
        }

        if matches {
            entry.remove();
            tracing::info!(identity = identity, event = "otp_verified", "Code verified and consumed");
            true
        } else {
            tracing::warn!(identity = identity, event = "otp_mismatch", "Submitted code did not match");
            false
        }
    }

    /// Remove every record expired as of the start of the call
    ///
    /// Returns the number of records removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0;

        self.records.retain(|_, record| {
            let keep = record.is_fresh_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }

    /// Number of records currently held, including expired ones not yet swept
    pub fn pending_count(&self) -> usize {
        self.records.len()
    }

    /// Digits in every generated code
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Time-to-live applied to new codes
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Validity rounded up to whole minutes, for delivery messages
    pub fn validity_minutes(&self) -> u64 {
        let seconds = self.validity.num_seconds().max(0) as u64;
        seconds.div_ceil(60)
    }

    /// Issuance behaviour when a code is already pending
    pub fn issue_policy(&self) -> IssuePolicy {
        self.issue_policy
    }
}

impl Default for OtpManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
