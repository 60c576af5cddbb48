//! Pacing of registry traffic.
//!
//! Three waits layered on the sequential loop:
//! - a settle delay after every registry call, whatever its outcome;
//! - a floor on the wall-clock time spent per domain;
//! - a longer cooldown each time the run's success count reaches a multiple
//!   of the batch size.
//!
//! Time is measured with [`tokio::time::Instant`] so tests can run under a
//! paused clock.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PacingPolicy {
    pub settle_delay: Duration,
    pub base_interval: Duration,
    pub success_batch_size: u32,
    pub cooldown: Duration,
}

impl PacingPolicy {
    pub(crate) fn from_config(config: &brdomain_core::AppConfig) -> Self {
        Self {
            settle_delay: config.settle_delay(),
            base_interval: config.base_interval(),
            success_batch_size: config.success_batch_size,
            cooldown: config.cooldown(),
        }
    }

    pub(crate) async fn settle(&self) {
        sleep_unless_zero(self.settle_delay).await;
    }

    /// Sleeps whatever is left of the base interval since `started`.
    pub(crate) async fn hold_floor(&self, started: Instant) {
        let remaining = self.base_interval.saturating_sub(started.elapsed());
        sleep_unless_zero(remaining).await;
    }

    pub(crate) fn cooldown_due(&self, successes: u32) -> bool {
        successes > 0
            && self.success_batch_size > 0
            && successes.is_multiple_of(self.success_batch_size)
    }

    /// Runs the extended cooldown if the success just recorded in `ctx`
    /// completed a batch.
    pub(crate) async fn after_success(&self, ctx: &RunContext) {
        if self.cooldown_due(ctx.successes) {
            tracing::info!(
                successes = ctx.successes,
                cooldown_secs = self.cooldown.as_secs(),
                "success batch complete, cooling down"
            );
            sleep_unless_zero(self.cooldown).await;
        }
    }
}

/// State shared across the whole run, owned by the run loop.
#[derive(Debug, Default)]
pub(crate) struct RunContext {
    pub successes: u32,
}

impl RunContext {
    pub(crate) fn record_success(&mut self) {
        self.successes = self.successes.saturating_add(1);
    }
}

async fn sleep_unless_zero(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
