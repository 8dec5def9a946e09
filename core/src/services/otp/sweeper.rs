//! Background purge of expired challenges
//!
//! Validation already rejects expired codes on its own; the sweep only
//! bounds memory held by challenges nobody came back for.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use mfa_shared::config::OtpConfig;

use super::manager::OtpManager;

/// Configuration for the expiry sweeper
#[derive(Debug, Clone)]
pub struct OtpSweeperConfig {
    /// How often to run the sweep
    pub interval: Duration,
    /// Whether to run the background task at all
    pub enabled: bool,
}

impl Default for OtpSweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300), // Run every 5 minutes
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for OtpSweeperConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval: config.sweep_interval(),
            enabled: config.sweep_enabled,
        }
    }
}

/// Periodically removes expired records from an `OtpManager`
pub struct OtpSweeper {
    manager: Arc<OtpManager>,
    config: OtpSweeperConfig,
}

impl OtpSweeper {
    /// Create a new sweeper for the given manager
    pub fn new(manager: Arc<OtpManager>, config: OtpSweeperConfig) -> Self {
        Self { manager, config }
    }

    /// Run a single sweep, returning the number of records removed
    pub fn run_once(&self) -> usize {
        let removed = self.manager.sweep_expired();

        if removed > 0 {
            info!(
                removed = removed,
                remaining = self.manager.pending_count(),
                event = "otp_sweep",
                "Purged expired one-time passcodes"
            );
        } else {
            debug!(remaining = self.manager.pending_count(), "OTP sweep found nothing to purge");
        }

        removed
    }

    /// Start the sweeper as a background task
    ///
    /// The first sweep runs one interval after start. Ticks missed while the
    /// runtime was busy are skipped rather than replayed in a burst. Returns
    /// `None` when the sweeper is disabled; aborting the handle stops it.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP expiry sweeper is disabled");
            return None;
        }

        let period = self.config.interval.max(Duration::from_millis(1));

        Some(tokio::spawn(async move {
            info!(
                "OTP expiry sweeper started - will run every {} seconds",
                period.as_secs()
            );

            let mut timer = time::interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                timer.tick().await;
                self.run_once();
            }
        }))
    }
}
