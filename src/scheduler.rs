//! Periodic trigger for the sync cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::app::{Result, TouchlineError};
use crate::syncer::Syncer;

/// Parse an interval string like "1h", "30m", "6h", "1d".
pub fn parse_interval(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        hours
            .parse::<u64>()
            .map(|h| h * 3600)
            .map_err(|_| TouchlineError::Config(format!("Invalid hours: {hours}")))
    } else if let Some(minutes) = s.strip_suffix('m') {
        minutes
            .parse::<u64>()
            .map(|m| m * 60)
            .map_err(|_| TouchlineError::Config(format!("Invalid minutes: {minutes}")))
    } else if let Some(days) = s.strip_suffix('d') {
        days.parse::<u64>()
            .map(|d| d * 86400)
            .map_err(|_| TouchlineError::Config(format!("Invalid days: {days}")))
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map_err(|_| TouchlineError::Config(format!("Invalid seconds: {secs}")))
    } else {
        s.parse::<u64>().map_err(|_| {
            TouchlineError::Config(format!(
                "Invalid interval: {s}. Use format like '1h', '30m', '1d'"
            ))
        })
    }
}

/// Format an interval for display.
pub fn format_interval(secs: u64) -> String {
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

pub struct Scheduler {
    syncer: Arc<dyn Syncer>,
    interval: Duration,
    sync_on_start: bool,
}

impl Scheduler {
    pub fn new(syncer: Arc<dyn Syncer>, interval: Duration, sync_on_start: bool) -> Self {
        Self {
            syncer,
            interval,
            sync_on_start,
        }
    }

    /// Tick until cancelled. A failed cycle is logged and retried on
    /// the next tick; there is no in-cycle retry.
    pub async fn run(&self, token: CancellationToken) {
        info!(
            interval = %format_interval(self.interval.as_secs()),
            "scheduler started"
        );

        if self.sync_on_start {
            self.run_cycle(&token).await;
        }

        let mut timer = interval(self.interval);
        timer.tick().await; // Skip the first immediate tick

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = timer.tick() => self.run_cycle(&token).await,
            }
        }

        info!("scheduler stopped");
    }

    async fn run_cycle(&self, token: &CancellationToken) {
        info!("synchronizing");
        if let Err(e) = self.syncer.sync(token).await {
            error!(error = %e, "sync cycle failed");
        }
    }
}
