//! One-time passcode configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest code the service will ever generate, whatever is configured
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code the verification endpoint accepts
pub const MAX_CODE_LENGTH: usize = 12;

/// Longest validity a code may be issued with (24 hours)
pub const MAX_VALIDITY_SECONDS: u64 = 86_400;

/// Behaviour of an issuance when the identity already has a pending code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssuePolicy {
    /// Discard the pending code and issue a new one
    #[default]
    Replace,
    /// Refuse to issue while an unexpired code is outstanding
    RejectPending,
}

impl std::str::FromStr for IssuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" | "overwrite" => Ok(IssuePolicy::Replace),
            "reject-pending" | "reject_pending" | "reject" => Ok(IssuePolicy::RejectPending),
            _ => Err(format!("Invalid issue policy: {}", s)),
        }
    }
}

/// Passcode generation and lifecycle settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code (floored at `MIN_CODE_LENGTH`)
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Time-to-live applied to every newly issued code, in seconds
    #[serde(default = "default_validity_seconds")]
    pub validity_seconds: u64,

    /// How often the background sweep purges expired codes, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Whether the background sweep runs at all
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// What to do when a code is already pending for the identity
    #[serde(default)]
    pub issue_policy: IssuePolicy,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            validity_seconds: default_validity_seconds(),
            sweep_interval_seconds: default_sweep_interval(),
            sweep_enabled: default_sweep_enabled(),
            issue_policy: IssuePolicy::default(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    ///
    /// `OTP_EXPIRY_SECONDS` takes precedence over `OTP_EXPIRY_MINUTES`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let minutes = super::env_parse("OTP_EXPIRY_MINUTES", defaults.validity_seconds / 60);
        let validity_seconds = super::env_parse("OTP_EXPIRY_SECONDS", minutes.saturating_mul(60));

        Self {
            code_length: super::env_parse("OTP_LENGTH", defaults.code_length),
            validity_seconds,
            sweep_interval_seconds: super::env_parse(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            sweep_enabled: super::env_parse("OTP_SWEEP_ENABLED", defaults.sweep_enabled),
            issue_policy: super::env_parse("OTP_ISSUE_POLICY", defaults.issue_policy),
        }
    }

    /// Code length actually used for generation, kept within
    /// `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`
    pub fn effective_code_length(&self) -> usize {
        self.code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH)
    }

    /// Validity as a `Duration`, capped at `MAX_VALIDITY_SECONDS`
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_seconds.min(MAX_VALIDITY_SECONDS))
    }

    /// Sweep interval as a `Duration`
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }

    /// Validity rounded up to whole minutes, for user-facing messages
    pub fn validity_minutes(&self) -> u64 {
        self.validity_seconds.div_ceil(60)
    }
}

fn default_code_length() -> usize {
    6
}

fn default_validity_seconds() -> u64 {
    300 // 5 minutes
}

fn default_sweep_interval() -> u64 {
    300 // 5 minutes
}

fn default_sweep_enabled() -> bool {
    true
}
