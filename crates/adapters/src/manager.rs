//! The workload-manager contract and the fixed-order capability probe.

use crate::error::AdapterError;
use crate::storage::PartitionStats;
use rerun_channel::CommandChannel;
use rerun_core::{Job, JobId, JobSpec, Queue, SchedulerId};
use std::collections::HashMap;

pub type StorageStats = HashMap<String, PartitionStats>;

/// Translates generic submit/rerun/delete/query operations to a specific
/// scheduler's CLI.
pub trait WorkloadManager {
    fn name(&self) -> &'static str;

    /// The command whose exit code decides whether this adapter is valid
    /// for a given channel. Exit 0 → valid; exit 127 → not installed
    /// (skip); any other non-zero → a channel fault surfaced to the
    /// caller.
    fn list_jobs_cmd(&self) -> &'static str;

    fn get_jobs(&self, channel: &dyn CommandChannel) -> Result<Queue<Job>, AdapterError>;

    fn query_jobs(
        &self,
        channel: &dyn CommandChannel,
        ids: &[SchedulerId],
    ) -> Result<Queue<Job>, AdapterError>;

    fn submit_job(&self, channel: &dyn CommandChannel, spec: &JobSpec) -> Result<SchedulerId, AdapterError>;

    fn delete_job(&self, channel: &dyn CommandChannel, id: &SchedulerId) -> Result<(), AdapterError>;

    /// Attempts `qrerun` first, falling back to resubmitting the original
    /// jobscript on a permanent rerun-denial. Returns `Ok(())` whichever
    /// path succeeds.
    fn rerun_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<(), AdapterError>;

    /// Submits a new instance of `job` and updates the original's tracked
    /// state to `queued` on success or `failed` on failure — the state
    /// transition itself is the caller's (engine's) responsibility; this
    /// method only performs the submission half.
    fn resubmit_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<SchedulerId, AdapterError>;

    /// Only valid from `queued`: submits a duplicate into `queue`/`project`
    /// then deletes the original.
    fn elevate_job(
        &self,
        channel: &dyn CommandChannel,
        job: &Job,
        queue: Option<&str>,
        project: Option<&str>,
    ) -> Result<SchedulerId, AdapterError>;

    /// True iff the tail of the job's error file contains a
    /// killed-by-mem/walltime marker.
    fn was_killed(&self, channel: &dyn CommandChannel, job: &Job) -> Result<bool, AdapterError>;

    /// Parses the login banner for partition usage. Fails soft: any parse
    /// failure returns an empty map rather than an error — login-message
    /// parsing is positional and brittle to MOTD changes.
    fn get_storage_stats(&self, login_message: &str) -> StorageStats {
        crate::storage::parse_storage_stats(login_message)
    }
}

/// Probes `candidates` in order, returning the first adapter whose
/// `list_jobs_cmd` exits 0 on `channel`. Exit 127 skips to the next
/// candidate; any other non-zero surfaces as a channel-level fault.
/// Retries up to 2 times on a channel fault, bypassed when
/// `RERUN_DISABLE_RETRY` is set.
pub fn detect<'a>(
    channel: &dyn CommandChannel,
    candidates: &[&'a dyn WorkloadManager],
) -> Result<&'a dyn WorkloadManager, AdapterError> {
    let max_attempts = if std::env::var("RERUN_DISABLE_RETRY").is_ok() { 1 } else { 3 };

    for candidate in candidates {
        let mut last_err = None;
        for attempt in 0..max_attempts {
            match channel.execute(candidate.list_jobs_cmd()) {
                Ok(result) if result.exit == 0 => return Ok(*candidate),
                Ok(result) if result.exit == 127 => {
                    last_err = None;
                    break;
                }
                Ok(result) => {
                    last_err = Some(AdapterError::parse(
                        "capability probe",
                        format!("{} exited {}", candidate.name(), result.exit),
                    ));
                }
                Err(e) => last_err = Some(AdapterError::Channel(e)),
            }
            if attempt + 1 < max_attempts {
                tracing::warn!(adapter = candidate.name(), attempt, "capability probe retrying");
            }
        }
        if let Some(err) = last_err {
            return Err(err);
        }
    }

    Err(AdapterError::NotInstalled)
}

/// Helper shared by adapters: extract `JOB_ID=...` / `EXPERIMENT_PATH=...`
/// out of a PBS `Variable_List` string.
pub fn parse_variable_list(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

pub fn job_id_from_variable_list(raw: &str) -> Option<JobId> {
    parse_variable_list(raw).get("JOB_ID").and_then(|s| JobId::from_string(s).ok())
}
