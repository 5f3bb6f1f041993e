//! The reconciliation engine: the sweep loop. This is the hardest part
//! of the system — diffs the tracked set against the live scheduler
//! queue, decides rerun/delete/untrack, and persists results with a
//! local fallback on remote-mirror write failure.

use crate::error::EngineError;
use rerun_adapters::{AdapterError, JobSubmissionError, WorkloadManager};
use rerun_channel::CommandChannel;
use rerun_core::{Clock, Job, JobId, Queue};
use rerun_storage::{FallbackCache, OnConflict, RemoteMirror, TrackingStore};
use std::collections::HashMap;

/// Tuning knobs for one [`ReconcileEngine`].
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Inclusive percent-completion threshold for rerunning a still-live
    /// job.
    pub threshold: f64,
    /// If `false`, a successful rerun of an already-tracked, still-live
    /// job also deletes the original to prevent a running duplicate.
    pub continue_on_rerun: bool,
}

/// Outcome of one sweep, surfaced to the driver for logging/metrics.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub live_count: usize,
    pub tracked_count: usize,
    pub reran: Vec<JobId>,
    pub untracked_completed: Vec<JobId>,
    pub untracked_missing_script: Vec<JobId>,
    pub queue_full: bool,
    pub mirror_write_failed: bool,
}

/// The reconciling state machine over tracked jobs. Owns a per-host
/// in-memory history of the last-seen live [`Job`] records, since the
/// durable store only persists `JobSpec`-shaped columns but
/// `was_killed`/walltime-elapsed checks need the full `Job` (error path,
/// resource request, start time). A tracked job that vanished from the
/// live queue without ever having been observed live in this process's
/// lifetime (e.g. right after a daemon restart) can't be classified as
/// killed or elapsed; the engine conservatively leaves it tracked rather
/// than guessing.
pub struct ReconcileEngine<'a> {
    channel: &'a dyn CommandChannel,
    adapter: &'a dyn WorkloadManager,
    store: TrackingStore,
    fallback: FallbackCache,
    clock: &'a dyn Clock,
    history: HashMap<JobId, Job>,
}

impl<'a> ReconcileEngine<'a> {
    pub fn new(
        channel: &'a dyn CommandChannel,
        adapter: &'a dyn WorkloadManager,
        store: TrackingStore,
        fallback: FallbackCache,
        clock: &'a dyn Clock,
    ) -> Self {
        Self { channel, adapter, store, fallback, clock, history: HashMap::new() }
    }

    pub fn store(&self) -> &TrackingStore {
        &self.store
    }

    /// Run one sweep: fetch the live queue, reconcile it against the
    /// tracked set, issue reruns/deletes, and persist the result.
    pub fn sweep(&mut self, cfg: SweepConfig) -> Result<SweepReport, EngineError> {
        let mut report = SweepReport::default();

        // Step 1: acquire live view. Propagate without mutating anything.
        let live = self.adapter.get_jobs(self.channel)?;
        report.live_count = live.len();

        // Step 2: acquire tracked view, merged with the fallback cache.
        let mut tracked = Queue::from_vec(self.store.all()?);
        if self.fallback.exists() {
            let cached = self.fallback.read()?;
            tracked.merge(Queue::from_vec(cached));
            tracing::info!(count = tracked.len(), "replayed local fallback cache into tracked set");
        }
        report.tracked_count = tracked.len();

        // Jobs already tracked going into this sweep, snapshotted before the
        // live merge below. A rerun candidate is only untracked on success if
        // it was actually tracked beforehand — a job that is merely live and
        // near the threshold (never registered) stays tracked afterwards.
        let originally_tracked_ids: std::collections::HashSet<JobId> =
            tracked.iter().map(|spec| spec.id).collect();

        let history = self.history.clone();

        // Step 3: classify.
        let tracked_not_live: Vec<_> =
            tracked.iter().filter(|spec| !live.contains(*spec)).cloned().collect();

        let killed_tracked: Vec<Job> = tracked_not_live
            .iter()
            .filter_map(|spec| history.get(&spec.id))
            .filter(|job| self.adapter.was_killed(self.channel, job).unwrap_or(false))
            .cloned()
            .collect();

        let near_walltime_live: Vec<Job> =
            live.iter().filter(|job| job.percent_completion() >= cfg.threshold).cloned().collect();

        let completed: Vec<JobId> = tracked_not_live
            .iter()
            .filter(|spec| spec.is_running())
            .filter(|spec| {
                history
                    .get(&spec.id)
                    .map(|job| self.has_elapsed(job) && !self.adapter.was_killed(self.channel, job).unwrap_or(false))
                    .unwrap_or(false)
            })
            .map(|spec| spec.id)
            .collect();

        // Step 4: untrack completed.
        for id in &completed {
            self.store.pop(*id)?;
            tracked = Queue::from_vec(tracked.into_vec().into_iter().filter(|s| s.id != *id).collect());
            tracing::info!(job_id = %id, "untracked: completed (disappeared from live, was running, walltime elapsed, not killed)");
        }
        report.untracked_completed = completed;

        // Step 5: update tracked with live.
        tracked.merge(Queue::from_vec(live.iter().map(|j| j.spec.clone()).collect()));

        // Step 6: issue reruns, tracked-queue order first then live appended.
        'reruns: for job in killed_tracked.iter().chain(near_walltime_live.iter()) {
            match self.adapter.rerun_job(self.channel, job) {
                Ok(()) => {
                    report.reran.push(job.spec.id);

                    // Only untrack a job that was already tracked before this
                    // sweep. A job rerun purely because it showed up live
                    // near the threshold was never tracked in the first
                    // place, so it stays tracked (merged in at step 5) and
                    // is written to the mirror rather than dropped.
                    if originally_tracked_ids.contains(&job.spec.id) {
                        self.store.pop(job.spec.id)?;
                        tracked = Queue::from_vec(
                            tracked.into_vec().into_iter().filter(|s| s.id != job.spec.id).collect(),
                        );

                        if live.contains(&job.spec) && !cfg.continue_on_rerun {
                            if let Err(e) = self.adapter.delete_job(self.channel, &job.scheduler_id) {
                                tracing::warn!(job_id = %job.spec.id, error = %e, "failed to delete running duplicate after rerun");
                            }
                        }
                    }
                }
                Err(AdapterError::Submission(JobSubmissionError::QueueFull)) => {
                    report.queue_full = true;
                    tracing::warn!("scheduler queue full; stopping reruns for this sweep");
                    break 'reruns;
                }
                Err(AdapterError::Submission(JobSubmissionError::MissingJobScript(detail))) => {
                    self.store.pop(job.spec.id)?;
                    tracked = Queue::from_vec(
                        tracked.into_vec().into_iter().filter(|s| s.id != job.spec.id).collect(),
                    );
                    report.untracked_missing_script.push(job.spec.id);
                    tracing::warn!(job_id = %job.spec.id, detail = %detail, "untracked: jobscript missing, permanently unrecoverable");
                }
                Err(e) => {
                    tracing::warn!(job_id = %job.spec.id, error = %e, "rerun failed; leaving tracked for next sweep");
                }
            }
        }

        // Step 7: persist tracked.
        let tracked_specs = tracked.into_vec();
        let mirror = RemoteMirror::default_path(self.channel);
        match mirror.push(&tracked_specs) {
            Ok(()) => {
                self.fallback.clear()?;
            }
            Err(e) => {
                report.mirror_write_failed = true;
                tracing::warn!(error = %e, "remote mirror write failed; materializing local fallback cache");
                self.fallback
                    .write(&tracked_specs)
                    .map_err(|e| EngineError::FallbackCacheFatal(e.to_string()))?;
            }
        }
        // The local SQLite store is the primary durable record regardless
        // of the mirror outcome; keep it in sync with the merged set.
        self.store.upsert(&tracked_specs, OnConflict::Update)?;

        self.history = live.iter().map(|j| (j.spec.id, j.clone())).collect();

        Ok(report)
    }

    fn has_elapsed(&self, job: &Job) -> bool {
        match job.end_time() {
            Some(end) => self.clock.now() >= end,
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
