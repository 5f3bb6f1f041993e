//! The PBS adapter: `qstat -fF json`, `qsub`, `qdel`, `qrerun`.

use crate::error::{AdapterError, JobSubmissionError};
use crate::manager::{job_id_from_variable_list, WorkloadManager};
use crate::qstat::parse_qstat_json;
use rerun_channel::CommandChannel;
use rerun_core::{Job, JobId, JobSpec, Queue, SchedulerId};
use std::sync::atomic::{AtomicBool, Ordering};

/// PBS exit code for "scheduler queue is full", both on submit and
/// rerun. The same code carries both meanings, so implementers should
/// verify the exact mapping on their own cluster before relying on it.
const QUEUE_FULL_EXIT: i32 = 38;
/// PBS exit code for "not authorized to rerun this job" — permanently
/// disables `qrerun` for the remainder of this adapter's lifetime once
/// observed.
const RERUN_NOT_AUTHORIZED_EXIT: i32 = 159;

pub struct PbsAdapter {
    qrerun_allowed: AtomicBool,
}

impl Default for PbsAdapter {
    fn default() -> Self {
        Self { qrerun_allowed: AtomicBool::new(true) }
    }
}

impl PbsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn submit_command(spec: &JobSpec) -> Result<String, AdapterError> {
        let jobscript = spec.jobscript_path.as_ref().ok_or_else(|| {
            AdapterError::Submission(JobSubmissionError::MissingJobScript(
                "JobSpec has no jobscript_path".to_string(),
            ))
        })?;

        let mut cmd = format!(
            "qsub -v JOB_ID={},EXPERIMENT_PATH={}",
            spec.id, spec.experiment_path
        );
        if let Some(queue) = &spec.queue {
            cmd.push_str(&format!(" -q {queue}"));
        }
        if let Some(project) = &spec.project {
            cmd.push_str(&format!(" -P {project}"));
        }
        cmd.push(' ');
        cmd.push_str(jobscript);
        Ok(cmd)
    }

    fn classify_submission_failure(result: &rerun_channel::ExecResult) -> JobSubmissionError {
        if result.exit == QUEUE_FULL_EXIT {
            return JobSubmissionError::QueueFull;
        }
        if result.stderr.contains("script file:: No such") {
            return JobSubmissionError::MissingJobScript(result.stderr.clone());
        }
        JobSubmissionError::Other(format!("qsub exited {}: {}", result.exit, result.stderr))
    }
}

impl WorkloadManager for PbsAdapter {
    fn name(&self) -> &'static str {
        "pbs"
    }

    fn list_jobs_cmd(&self) -> &'static str {
        "qstat -fF json"
    }

    fn get_jobs(&self, channel: &dyn CommandChannel) -> Result<Queue<Job>, AdapterError> {
        let result = channel.execute("qstat -fF json")?;
        let jobs = parse_qstat_json(&result.stdout)?;
        Ok(Queue::from_vec(jobs))
    }

    fn query_jobs(
        &self,
        channel: &dyn CommandChannel,
        ids: &[SchedulerId],
    ) -> Result<Queue<Job>, AdapterError> {
        if ids.is_empty() {
            return Ok(Queue::new());
        }
        let id_list = ids.iter().map(SchedulerId::as_str).collect::<Vec<_>>().join(" ");
        let result = channel.execute(&format!("qstat -fF json {id_list}"))?;
        let jobs = parse_qstat_json(&result.stdout)?;
        Ok(Queue::from_vec(jobs))
    }

    fn submit_job(&self, channel: &dyn CommandChannel, spec: &JobSpec) -> Result<SchedulerId, AdapterError> {
        let cmd = Self::submit_command(spec)?;
        let result = channel.execute(&cmd)?;
        if !result.ok() {
            return Err(AdapterError::Submission(Self::classify_submission_failure(&result)));
        }
        Ok(SchedulerId::new(result.stdout.trim().to_string()))
    }

    fn delete_job(&self, channel: &dyn CommandChannel, id: &SchedulerId) -> Result<(), AdapterError> {
        let result = channel.execute(&format!("qdel {id}"))?;
        if !result.ok() {
            return Err(AdapterError::Deletion(format!("qdel {id} exited {}: {}", result.exit, result.stderr)));
        }
        Ok(())
    }

    fn rerun_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<(), AdapterError> {
        if self.qrerun_allowed.load(Ordering::Relaxed) {
            let result = channel.execute(&format!("qrerun {}", job.scheduler_id))?;
            if result.ok() {
                return Ok(());
            }
            if result.exit == RERUN_NOT_AUTHORIZED_EXIT {
                self.qrerun_allowed.store(false, Ordering::Relaxed);
                // Fall through to the resubmit-from-script path below.
            } else if result.exit == QUEUE_FULL_EXIT {
                return Err(AdapterError::Submission(JobSubmissionError::QueueFull));
            } else {
                return Err(AdapterError::Submission(JobSubmissionError::Other(format!(
                    "qrerun exited {}: {}",
                    result.exit, result.stderr
                ))));
            }
        }

        let jobscript = job.spec.jobscript_path.as_ref().ok_or_else(|| {
            AdapterError::Submission(JobSubmissionError::MissingJobScript(
                "job has no jobscript_path to fall back to".to_string(),
            ))
        })?;
        let result = channel.execute(&format!("qsub {jobscript}"))?;
        if !result.ok() {
            return Err(AdapterError::Submission(Self::classify_submission_failure(&result)));
        }
        Ok(())
    }

    fn resubmit_job(&self, channel: &dyn CommandChannel, job: &Job) -> Result<SchedulerId, AdapterError> {
        self.submit_job(channel, &job.spec)
    }

    fn elevate_job(
        &self,
        channel: &dyn CommandChannel,
        job: &Job,
        queue: Option<&str>,
        project: Option<&str>,
    ) -> Result<SchedulerId, AdapterError> {
        let mut elevated_spec = job.spec.clone();
        elevated_spec.queue = queue.map(str::to_string).or(elevated_spec.queue);
        elevated_spec.project = project.map(str::to_string).or(elevated_spec.project);

        let new_id = self.submit_job(channel, &elevated_spec)?;
        self.delete_job(channel, &job.scheduler_id)?;
        Ok(new_id)
    }

    fn was_killed(&self, channel: &dyn CommandChannel, job: &Job) -> Result<bool, AdapterError> {
        let result = channel.execute(&format!("tail -n 20 {}", job.error_path))?;
        let tail = result.stdout;
        Ok(tail.contains("PBS: job killed: mem") || tail.contains("PBS: job killed: walltime"))
    }
}

/// Extract the user-owned [`JobId`] from a raw `Variable_List` string, for
/// callers that only have the raw qstat fragment rather than a full [`Job`].
pub fn job_id_from_raw_variable_list(raw: &str) -> Option<JobId> {
    job_id_from_variable_list(raw)
}
