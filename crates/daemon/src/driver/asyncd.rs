//! `AsyncDriver`: a `tokio` runtime running `tokio::time::interval`
//! alongside `tokio::signal::unix::signal` for graceful shutdown. Used
//! for interactive/daemonized operation, as opposed to
//! [`crate::driver::BlockingDriver`]'s systemd-supervised mode.
//!
//! Each tick dispatches the synchronous sweep through
//! `tokio::task::block_in_place` rather than `spawn_blocking`: the sweep
//! borrows the channel/adapter/clock for the lifetime of one
//! `ReconcileLoop`, and `spawn_blocking`'s `'static` bound can't express
//! that borrow. `block_in_place` runs the closure in place on a
//! multi-threaded runtime, freeing this worker's peers to keep servicing
//! the signal futures, without requiring the sweep state to be `'static`.

use crate::error::DaemonError;
use rerun_engine::ReconcileLoop;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};

pub struct AsyncDriver {
    interval: Duration,
}

impl AsyncDriver {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn run(&self, mut loop_: ReconcileLoop<'_>) -> Result<(), DaemonError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_io()
            .enable_time()
            .build()?;

        runtime.block_on(async {
            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick fires immediately; consume it so the daemon
            // doesn't sweep twice in quick succession at startup.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match tokio::task::block_in_place(|| loop_.tick()) {
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
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("received SIGTERM, shutting down");
                        break;
                    }
                    _ = sigint.recv() => {
                        tracing::info!("received SIGINT, shutting down");
                        break;
                    }
                }
            }

            Ok::<(), std::io::Error>(())
        })?;

        Ok(())
    }
}
