//! SLURM stub: wire strings only (`sinfo`, `sbatch --requeue`,
//! `scancel`); `get_jobs`/`was_killed` return a clear "not yet
//! supported" error rather than being silently wrong.

use crate::error::AdapterError;
use crate::manager::WorkloadManager;
use rerun_channel::CommandChannel;
use rerun_core::{Job, JobSpec, Queue, SchedulerId};

#[derive(Default)]
pub struct SlurmAdapter;

impl SlurmAdapter {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(op: &'static str) -> AdapterError {
        AdapterError::NotSupported(format!("slurm adapter does not yet implement {op}"))
    }
}

impl WorkloadManager for SlurmAdapter {
    fn name(&self) -> &'static str {
        "slurm"
    }

    fn list_jobs_cmd(&self) -> &'static str {
        "sinfo"
    }

    fn get_jobs(&self, _channel: &dyn CommandChannel) -> Result<Queue<Job>, AdapterError> {
        Err(Self::unsupported("get_jobs"))
    }

    fn query_jobs(&self, _channel: &dyn CommandChannel, _ids: &[SchedulerId]) -> Result<Queue<Job>, AdapterError> {
        Err(Self::unsupported("query_jobs"))
    }

    fn submit_job(&self, channel: &dyn CommandChannel, spec: &JobSpec) -> Result<SchedulerId, AdapterError> {
        let jobscript = spec
            .jobscript_path
            .as_ref()
            .ok_or_else(|| AdapterError::NotSupported("sbatch requires a jobscript_path".to_string()))?;
        let result = channel.execute(&format!("sbatch --requeue {jobscript}"))?;
        if !result.ok() {
            return Err(AdapterError::NotSupported(format!("sbatch exited {}: {}", result.exit, result.stderr)));
        }
        // "Submitted batch job 12345"
        let id = result.stdout.trim().rsplit(' ').next().unwrap_or_default();
        Ok(SchedulerId::new(id))
    }

    fn delete_job(&self, channel: &dyn CommandChannel, id: &SchedulerId) -> Result<(), AdapterError> {
        let result = channel.execute(&format!("scancel {id}"))?;
        if !result.ok() {
            return Err(AdapterError::Deletion(format!("scancel {id} exited {}: {}", result.exit, result.stderr)));
        }
        Ok(())
    }

    fn rerun_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<(), AdapterError> {
        self.submit_job(channel, &job.spec).map(|_| ())
    }

    fn resubmit_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<SchedulerId, AdapterError> {
        self.submit_job(channel, &job.spec)
    }

    fn elevate_job(
        &self,
        _channel: &dyn CommandChannel,
        _job: &Job,
        _queue: Option<&str>,
        _project: Option<&str>,
    ) -> Result<SchedulerId, AdapterError> {
        Err(Self::unsupported("elevate_job"))
    }

    fn was_killed(&self, _channel: &dyn CommandChannel, _job: &Job) -> Result<bool, AdapterError> {
        Err(Self::unsupported("was_killed"))
    }
}
