//! The UCL PBS-dialect adapter. Intentionally partial: it delegates
//! straight through to [`PbsAdapter`] rather than diverging on dialect
//! quirks that haven't been pinned down yet.

use crate::error::AdapterError;
use crate::manager::WorkloadManager;
use crate::pbs::PbsAdapter;
use rerun_channel::CommandChannel;
use rerun_core::{Job, JobSpec, Queue, SchedulerId};

pub struct UclAdapter {
    inner: PbsAdapter,
}

impl Default for UclAdapter {
    fn default() -> Self {
        Self { inner: PbsAdapter::new() }
    }
}

impl UclAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkloadManager for UclAdapter {
    fn name(&self) -> &'static str {
        "ucl"
    }

    /// UCL clusters expose job history differently; `jobhist`'s presence
    /// is what distinguishes this dialect during capability probing.
    fn list_jobs_cmd(&self) -> &'static str {
        "jobhist"
    }

    fn get_jobs(&self, channel: &dyn CommandChannel) -> Result<Queue<Job>, AdapterError> {
        self.inner.get_jobs(channel)
    }

    fn query_jobs(&self, channel: &dyn CommandChannel, ids: &[SchedulerId]) -> Result<Queue<Job>, AdapterError> {
        self.inner.query_jobs(channel, ids)
    }

    fn submit_job(&self, channel: &dyn CommandChannel, spec: &JobSpec) -> Result<SchedulerId, AdapterError> {
        self.inner.submit_job(channel, spec)
    }

    fn delete_job(&self, channel: &dyn CommandChannel, id: &SchedulerId) -> Result<(), AdapterError> {
        self.inner.delete_job(channel, id)
    }

    fn rerun_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<(), AdapterError> {
        self.inner.rerun_job(channel, job)
    }

    fn resubmit_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<SchedulerId, AdapterError> {
        self.inner.resubmit_job(channel, job)
    }

    fn elevate_job(
        &self,
        channel: &dyn CommandChannel,
        job: &Job,
        queue: Option<&str>,
        project: Option<&str>,
    ) -> Result<SchedulerId, AdapterError> {
        self.inner.elevate_job(channel, job, queue, project)
    }

    fn was_killed(&self, channel: &dyn CommandChannel, job: &Job) -> Result<bool, AdapterError> {
        self.inner.was_killed(channel, job)
    }
}
