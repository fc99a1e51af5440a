//! `punchsync-scheduler` — periodic trigger for the sync engine.
//!
//! # Overview
//!
//! [`SyncScheduler`] is an explicit lifecycle object owned by the host
//! binary: it ticks on a fixed cadence, invokes one default-window sync per
//! tick, and logs each outcome. A failed tick never stops the loop — the
//! next tick is the retry, made safe by the engine's window overlap. The
//! host signals shutdown through a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};

use punchsync_engine::SyncEngine;

/// Drives scheduled sync runs until shutdown.
pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
}

impl SyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Main loop. The first sync fires immediately; subsequent ticks follow
    /// the configured cadence. Returns once `shutdown` broadcasts `true`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "sync scheduler started");

        let mut interval = tokio::time::interval(self.interval);
        // A long sync must not cause a burst of catch-up ticks afterwards.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.engine.sync_default_window(None).await {
                        Ok(report) => info!(%report, "scheduled sync finished"),
                        // Leave the loop running: the next tick re-covers
                        // this window through the look-back overlap.
                        Err(e) => error!(error = %e, "scheduled sync failed"),
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("sync scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }
}
