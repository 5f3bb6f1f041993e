//! Job data model: [`JobSpec`] (the user-tracked half) and [`Job`] (the
//! scheduler-observed half), plus the cross-cutting identity rule used
//! throughout the tracking store and reconciliation sweep.

use crate::{Cluster, JobId, SchedulerId, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequest {
    pub mem_bytes: u64,
    pub ncpus: u32,
    pub ngpus: u32,
    pub node_count: u32,
    pub place: String,
    pub priority: Option<i32>,
    pub select_statement: String,
    pub walltime: chrono::Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub cpu_percent: u32,
    pub cpu_time: chrono::Duration,
    pub mem_bytes: u64,
    pub vmem_bytes: u64,
    pub ncpus: u32,
    pub ngpus: u32,
    pub walltime: chrono::Duration,
}

/// The user-owned half of a job: what to track, independent of whatever
/// the scheduler currently reports (or whether the job has been
/// submitted at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: JobId,
    pub name: String,
    pub experiment_path: String,
    pub cluster: Cluster,
    pub state: State,
    pub modified_time: DateTime<Utc>,
    pub comment: Option<String>,
    pub queue: Option<String>,
    pub project: Option<String>,
    pub jobscript_path: Option<String>,
}

impl JobSpec {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_queued(&self) -> bool {
        self.state.is_queued()
    }

    pub fn percent_completion(&self) -> u32 {
        if self.state == State::Completed {
            100
        } else {
            0
        }
    }
}

crate::builder! {
    pub struct JobSpecBuilder => JobSpec {
        into {
            name: String = "",
            experiment_path: String = "",
        }
        set {
            id: JobId = JobId::new(),
            cluster: Cluster = Cluster::Unknown,
            state: State = State::Unsubmitted,
            modified_time: DateTime<Utc> = Utc::now(),
        }
        option {
            comment: String = None,
            queue: String = None,
            project: String = None,
            jobscript_path: String = None,
        }
    }
}

/// The scheduler-observed half of a job: everything `qstat` reports once
/// a job has actually been submitted, plus the [`JobSpec`] fields it
/// tracks alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub spec: JobSpec,
    pub scheduler_id: SchedulerId,
    pub owner: String,
    pub resource_request: ResourceRequest,
    pub resource_usage: Option<ResourceUsage>,
    pub server: String,
    pub start_time: Option<DateTime<Utc>>,
    pub creation_time: DateTime<Utc>,
    pub queue_time: DateTime<Utc>,
    pub checkpoint: String,
    pub submit_arguments: Option<Vec<String>>,
    pub error_path: String,
    pub output_path: String,
    pub priority: i32,
    pub run_count: u32,
}

impl Job {
    pub fn id(&self) -> JobId {
        self.spec.id
    }

    pub fn state(&self) -> State {
        self.spec.state
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
            .map(|start| start + self.resource_request.walltime)
    }

    /// The owner string is `user@host`; this strips the host.
    pub fn owner_name(&self) -> &str {
        self.owner.split('@').next().unwrap_or(&self.owner)
    }

    pub fn walltime(&self) -> chrono::Duration {
        self.resource_request.walltime
    }

    pub fn percent_completion(&self) -> f64 {
        match self.spec.state {
            State::Completed => 100.0,
            State::Failed => 0.0,
            _ => {
                let requested = self.resource_request.walltime.num_seconds();
                match (&self.resource_usage, requested) {
                    (Some(usage), requested) if requested > 0 => {
                        100.0 * usage.walltime.num_seconds() as f64 / requested as f64
                    }
                    _ => 0.0,
                }
            }
        }
    }
}

/// Anything with a stable identity usable for the `match_jobs` rule:
/// a user-owned [`JobId`] and, once submitted, a scheduler-assigned
/// [`SchedulerId`].
pub trait Identity {
    fn job_id(&self) -> JobId;
    fn scheduler_id(&self) -> Option<&SchedulerId>;
}

impl Identity for JobSpec {
    fn job_id(&self) -> JobId {
        self.id
    }

    fn scheduler_id(&self) -> Option<&SchedulerId> {
        None
    }
}

impl Identity for Job {
    fn job_id(&self) -> JobId {
        self.spec.id
    }

    fn scheduler_id(&self) -> Option<&SchedulerId> {
        Some(&self.scheduler_id)
    }
}

/// Two records refer to the same job if their `JobId`s match, or if both
/// expose a `SchedulerId` and those match. A `JobId` never matches a
/// `SchedulerId` on the opposite side — the two namespaces are distinct.
pub fn identity_match(a: &impl Identity, b: &impl Identity) -> bool {
    if a.job_id() == b.job_id() {
        return true;
    }
    matches!((a.scheduler_id(), b.scheduler_id()), (Some(x), Some(y)) if x == y)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
