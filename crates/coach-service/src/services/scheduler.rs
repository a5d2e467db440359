//! Broadcast scheduler
//!
//! A recurring tokio task that polls for due broadcasts and processes them.
//! The scheduler owns its lifecycle; nothing here is global, so a test (or a
//! second server instance) can construct its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

use super::context::ServiceContext;
use super::processor::BroadcastProcessor;

/// Polls for due broadcasts on a fixed interval.
///
/// One pass runs immediately on `start()`, then every `interval`. Failures
/// inside a pass are logged and never terminate the loop; a failed broadcast
/// stays `scheduled` and is retried on the next pass.
pub struct BroadcastScheduler {
    ctx: ServiceContext,
    interval: Duration,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl BroadcastScheduler {
    /// Create a scheduler polling every `interval`
    pub fn new(ctx: ServiceContext, interval: Duration) -> Self {
        Self {
            ctx,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Whether the polling task is active
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start the polling task; no-op when already running
    pub fn start(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            return;
        }

        let ctx = self.ctx.clone();
        let interval = self.interval;
        let running = Arc::clone(&self.running);

        let handle = tokio::spawn(async move {
            info!(interval_secs = interval.as_secs(), "Broadcast scheduler started");

            // Immediate pass so already-due broadcasts don't wait a full tick
            Self::run_pass(&ctx).await;

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // first tick completes immediately

            while running.load(Ordering::Acquire) {
                ticker.tick().await;
                Self::run_pass(&ctx).await;
            }
        });

        if let Ok(mut slot) = self.handle.lock() {
            *slot = Some(handle);
        }
    }

    /// Stop the polling task; idempotent
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        if let Ok(mut slot) = self.handle.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
                info!("Broadcast scheduler stopped");
            }
        }
    }

    /// One scheduler pass: process every due broadcast sequentially.
    ///
    /// Each broadcast is isolated; one failure is logged and the pass moves
    /// on to the next.
    #[instrument(skip(ctx))]
    pub async fn run_pass(ctx: &ServiceContext) {
        let due = match ctx.broadcast_repo().find_due(Utc::now()).await {
            Ok(due) => due,
            Err(e) => {
                error!(error = %e, "Failed to query due broadcasts");
                return;
            }
        };

        if due.is_empty() {
            return;
        }
        debug!(count = due.len(), "Processing due broadcasts");

        let processor = BroadcastProcessor::new(ctx);
        for broadcast in due {
            if let Err(e) = processor.process(broadcast.id).await {
                error!(broadcast_id = %broadcast.id, error = %e, "Broadcast processing failed");
            }
        }
    }
}

impl Drop for BroadcastScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
