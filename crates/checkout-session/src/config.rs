//! # Session Configuration
//!
//! TTL and sweep timing for the registry's eviction policy.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

/// Timing configuration for session eviction.
///
/// The reaper never hard-codes these; they are process configuration,
/// overridable from the environment.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle seconds after which an untouched session becomes eligible
    /// for eviction. Any successful lookup resets this clock.
    pub session_ttl_secs: u64,

    /// Seconds between reaper sweeps.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    /// Defaults suitable for development: 10 minute TTL, 30 second sweeps.
    fn default() -> Self {
        SessionConfig {
            session_ttl_secs: 600,
            sweep_interval_secs: 30,
        }
    }
}

impl SessionConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CHECKOUT_SESSION_TTL_SECS`: Override the idle TTL
    /// - `CHECKOUT_SWEEP_INTERVAL_SECS`: Override the sweep period
    pub fn from_env() -> Self {
        let mut config = SessionConfig::default();

        if let Ok(ttl) = std::env::var("CHECKOUT_SESSION_TTL_SECS") {
            if let Ok(secs) = ttl.parse::<u64>() {
                config.session_ttl_secs = secs;
            }
        }

        if let Ok(interval) = std::env::var("CHECKOUT_SWEEP_INTERVAL_SECS") {
            if let Ok(secs) = interval.parse::<u64>() {
                config.sweep_interval_secs = secs;
            }
        }

        config
    }

    /// The idle TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// The sweep period as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
