//! Shared test factories for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]` so other
//! crates' test suites (adapters, storage, engine) can build minimal
//! [`JobSpec`]/[`Job`] fixtures without duplicating construction logic.

use crate::{Cluster, Job, JobId, JobSpec, ResourceRequest, ResourceUsage, SchedulerId, State};
use chrono::{Duration, Utc};

pub fn spec_with_id(id: JobId) -> JobSpec {
    JobSpec {
        id,
        name: "test-job".to_string(),
        experiment_path: "/home/test/experiment".to_string(),
        cluster: Cluster::Unknown,
        state: State::Unsubmitted,
        modified_time: Utc::now(),
        comment: None,
        queue: None,
        project: None,
        jobscript_path: Some("/home/test/job.pbs".to_string()),
    }
}

pub fn default_resource_request() -> ResourceRequest {
    ResourceRequest {
        mem_bytes: 4_000_000_000,
        ncpus: 4,
        ngpus: 0,
        node_count: 1,
        place: "free".to_string(),
        priority: None,
        select_statement: "1:ncpus=4:mem=4gb".to_string(),
        walltime: Duration::hours(72),
    }
}

pub fn resource_usage_at(walltime: Duration) -> ResourceUsage {
    ResourceUsage {
        cpu_percent: 100,
        cpu_time: walltime,
        mem_bytes: 1_000_000_000,
        vmem_bytes: 1_000_000_000,
        ncpus: 4,
        ngpus: 0,
        walltime,
    }
}

pub fn job_with_scheduler_id(scheduler_id: impl Into<String>) -> Job {
    let spec = spec_with_id(JobId::new());
    job_from_spec(spec, scheduler_id.into())
}

pub fn job_with_owner(owner: impl Into<String>) -> Job {
    let mut job = job_with_scheduler_id("1000.pbs-7");
    job.owner = owner.into();
    job
}

pub fn job_from_spec(spec: JobSpec, scheduler_id: impl Into<String>) -> Job {
    Job {
        spec,
        scheduler_id: SchedulerId::new(scheduler_id),
        owner: "testuser@login1".to_string(),
        resource_request: default_resource_request(),
        resource_usage: None,
        server: "pbs1.rcs.ic.ac.uk".to_string(),
        start_time: None,
        creation_time: Utc::now(),
        queue_time: Utc::now(),
        checkpoint: "u".to_string(),
        submit_arguments: None,
        error_path: "/home/test/job.e1000".to_string(),
        output_path: "/home/test/job.o1000".to_string(),
        priority: 0,
        run_count: 1,
    }
}
