//! Duplicate deletion: given the live queue, identify duplicates by
//! identical `jobscript_path` (never by name — names are not unique),
//! keep the first encountered, and delete the rest. Swallows per-job
//! deletion failures so one stuck job never blocks the rest of the
//! sweep.

use rerun_adapters::WorkloadManager;
use rerun_channel::CommandChannel;
use rerun_core::{Job, JobId, Queue};
use std::collections::HashSet;

/// By default only `queued` jobs are considered; passing `count_running`
/// additionally considers `running` jobs. The "first encountered wins"
/// rule applies across whichever set is in scope, in `live`'s iteration
/// order.
pub fn delete_duplicates(
    channel: &dyn CommandChannel,
    adapter: &dyn WorkloadManager,
    live: &Queue<Job>,
    count_running: bool,
) -> Vec<JobId> {
    let in_scope = |job: &Job| {
        job.spec.is_queued() || (count_running && job.spec.is_running())
    };

    let mut seen_scripts = HashSet::new();
    let mut deleted = Vec::new();

    for job in live.iter().filter(|j| in_scope(j)) {
        let Some(path) = &job.spec.jobscript_path else { continue };

        if !seen_scripts.insert(path.clone()) {
            match adapter.delete_job(channel, &job.scheduler_id) {
                Ok(()) => {
                    tracing::info!(job_id = %job.spec.id, jobscript_path = %path, "deleted duplicate job");
                    deleted.push(job.spec.id);
                }
                Err(e) => {
                    tracing::warn!(job_id = %job.spec.id, error = %e, "failed to delete duplicate job; leaving it tracked");
                }
            }
        }
    }

    deleted
}

#[cfg(test)]
#[path = "duplicates_tests.rs"]
mod tests;
