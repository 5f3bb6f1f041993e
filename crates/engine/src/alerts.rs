//! Missing-alerts pass: an out-of-band scan, separate from the sweep,
//! intended to run via the local channel on the cluster's own head node.

use crate::error::EngineError;
use rerun_adapters::WorkloadManager;
use rerun_channel::CommandChannel;
use rerun_core::{Clock, JobId, State};
use rerun_storage::TrackingStore;

/// For every tracked job in `queued`, refreshed from the store, verify
/// membership in `adapter.get_jobs()`. Absent jobs are flagged `alert`
/// with a diagnostic comment. Returns the flagged job ids.
pub fn run_missing_alerts(
    channel: &dyn CommandChannel,
    adapter: &dyn WorkloadManager,
    store: &TrackingStore,
    clock: &dyn Clock,
) -> Result<Vec<JobId>, EngineError> {
    let live = adapter.get_jobs(channel)?;
    let mut flagged = Vec::new();

    for spec in store.all()? {
        if !spec.is_queued() {
            continue;
        }
        if live.contains(&spec) {
            continue;
        }

        let comment = format!("missing from live queue as of {}", clock.now().to_rfc3339());
        store.update_state(spec.id, State::Alert, Some(&comment))?;
        tracing::warn!(job_id = %spec.id, "flagged alert: queued job missing from live queue");
        flagged.push(spec.id);
    }

    Ok(flagged)
}

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;
