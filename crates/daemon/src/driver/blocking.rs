//! `BlockingDriver`: a plain sleep loop, used when `RERUN_SYSTEMD_SERVICE`
//! is set (systemd already supervises and restarts the process, so no
//! extra scheduler is needed).

use crate::shutdown::ShutdownSignal;
use rerun_engine::ReconcileLoop;
use std::time::{Duration, Instant};

/// How often the sleep is interrupted to re-check for a pending shutdown
/// signal. Keeps shutdown latency bounded well under the sweep interval
/// without busy-waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct BlockingDriver {
    interval: Duration,
}

impl BlockingDriver {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run sweeps until `SIGTERM`/`SIGINT` arrives. Each tick's error is
    /// logged and swallowed: a single failing sweep must never bring the
    /// supervisor down.
    pub fn run(&self, mut loop_: ReconcileLoop<'_>, mut shutdown: ShutdownSignal) {
        loop {
            match loop_.tick() {
                Ok(report) => tracing::info!(
                    live = report.live_count,
                    tracked = report.tracked_count,
                    reran = report.reran.len(),
                    completed = report.untracked_completed.len(),
                    missing_script = report.untracked_missing_script.len(),
                    "sweep complete"
                ),
                Err(e) => tracing::error!(error = %e, "sweep failed"),
            }

            if self.sleep_or_shutdown(&mut shutdown) {
                tracing::info!("shutdown signal received, stopping");
                return;
            }
        }
    }

    /// Sleeps in short increments so a pending shutdown signal is noticed
    /// promptly. Returns `true` once shutdown was requested.
    fn sleep_or_shutdown(&self, shutdown: &mut ShutdownSignal) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if shutdown.requested() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            std::thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}
