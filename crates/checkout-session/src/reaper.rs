//! # Session Reaper
//!
//! Periodic background eviction of sessions idle past the configured TTL.
//!
//! ## Sweep Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Reaper Sweep                                    │
//! │                                                                         │
//! │  every sweep_interval:                                                  │
//! │       cutoff = now − ttl                                                │
//! │       for (token, last_accessed) in registry.snapshot():                │
//! │           if last_accessed < cutoff:                                    │
//! │               registry.remove(token)                                    │
//! │                                                                         │
//! │  A remove racing a concurrent Lookup/Remove on the same token is        │
//! │  resolved by the registry's atomicity: at most one caller observes      │
//! │  the session. The reaper never blocks request threads beyond the        │
//! │  registry's own short critical sections.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `Reaper::spawn` returns a [`ReaperHandle`]; `shutdown().await` stops
//! the loop and resolves only after the task has exited, so no further
//! eviction runs execute afterwards.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::registry::SessionRegistry;

// =============================================================================
// Sweep
// =============================================================================

/// Runs one eviction pass and returns how many sessions were evicted.
///
/// Exposed separately from the periodic task so callers (and tests) can
/// sweep deterministically without timers.
pub fn sweep(registry: &SessionRegistry, ttl: Duration) -> usize {
    // An out-of-range TTL means nothing can be stale yet
    let ttl = match chrono::Duration::from_std(ttl) {
        Ok(ttl) => ttl,
        Err(_) => return 0,
    };
    let cutoff = match chrono::Utc::now().checked_sub_signed(ttl) {
        Some(cutoff) => cutoff,
        None => return 0,
    };

    let mut evicted = 0;
    for (token, last_accessed) in registry.snapshot() {
        if last_accessed < cutoff && registry.remove(token).is_some() {
            info!(%token, %last_accessed, "evicted idle session");
            evicted += 1;
        }
    }

    if evicted > 0 {
        debug!(evicted, live = registry.len(), "sweep finished");
    }
    evicted
}

// =============================================================================
// Reaper Task
// =============================================================================

/// The periodic eviction task.
pub struct Reaper {
    registry: Arc<SessionRegistry>,
    config: SessionConfig,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for stopping a running reaper.
pub struct ReaperHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Stops the reaper and waits for the loop to exit.
    ///
    /// After this resolves, no further sweeps will run.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

impl Reaper {
    /// Spawns the reaper on the current tokio runtime.
    pub fn spawn(registry: Arc<SessionRegistry>, config: SessionConfig) -> ReaperHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let reaper = Reaper {
            registry,
            config,
            shutdown_rx,
        };
        let task = tokio::spawn(reaper.run());

        ReaperHandle { shutdown_tx, task }
    }

    /// Runs the sweep loop until shutdown.
    async fn run(mut self) {
        info!(
            ttl_secs = self.config.session_ttl_secs,
            sweep_interval_secs = self.config.sweep_interval_secs,
            "reaper starting"
        );

        let mut interval = tokio::time::interval(self.config.sweep_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; consume it
        // so the first real sweep happens one full period after startup.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    sweep(&self.registry, self.config.ttl());
                }

                _ = self.shutdown_rx.recv() => {
                    info!("reaper shutting down");
                    break;
                }
            }
        }

        info!("reaper stopped");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::PricingEngine;

    fn registry() -> Arc<SessionRegistry> {
        Arc::new(SessionRegistry::new(Arc::new(PricingEngine::default())))
    }

    #[test]
    fn test_sweep_evicts_only_idle_sessions() {
        let registry = registry();
        let stale = registry.create().unwrap();
        let fresh = registry.create().unwrap();

        std::thread::sleep(Duration::from_millis(30));
        // Touch one session inside the window; the other stays idle
        registry.lookup(fresh);

        let evicted = sweep(&registry, Duration::from_millis(20));

        assert_eq!(evicted, 1);
        assert!(registry.lookup(stale).is_none());
        assert!(registry.lookup(fresh).is_some());
    }

    #[test]
    fn test_sweep_with_generous_ttl_evicts_nothing() {
        let registry = registry();
        registry.create().unwrap();

        assert_eq!(sweep(&registry, Duration::from_secs(3600)), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sweep_on_empty_registry_is_a_no_op() {
        let registry = registry();
        assert_eq!(sweep(&registry, Duration::from_secs(0)), 0);
    }

    #[tokio::test]
    async fn test_spawned_reaper_evicts_and_stops_cleanly() {
        let registry = registry();
        let token = registry.create().unwrap();

        let config = SessionConfig {
            session_ttl_secs: 0,
            sweep_interval_secs: 1,
        };
        let handle = Reaper::spawn(registry.clone(), config);

        // TTL 0 makes every session stale; wait for the first sweep.
        // (Interval ticks are driven by tokio's clock, so poll politely.)
        let mut waited = 0;
        while registry.lookup(token).is_some() && waited < 50 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            waited += 1;
        }
        assert!(registry.lookup(token).is_none(), "reaper must evict");

        handle.shutdown().await;

        // No further sweeps after shutdown: a new session stays live
        let survivor = registry.create().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(registry.lookup(survivor).is_some());
    }
}
