//! `rerun register` — create an `unsubmitted` tracked row.

use anyhow::Result;
use clap::Args;
use rerun_core::{Cluster, JobId, JobSpec, State};
use rerun_storage::{JobTrackingQueue, OnConflict, TrackingStore};

#[derive(Args)]
pub struct RegisterArgs {
    /// Human-readable job name.
    #[arg(long)]
    name: String,
    /// Path the jobscript writes its output/results under.
    #[arg(long)]
    experiment_path: String,
    /// Path to the jobscript `submit_job` will hand to `qsub`.
    #[arg(long)]
    jobscript: Option<String>,
    #[arg(long)]
    queue: Option<String>,
    #[arg(long)]
    project: Option<String>,
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let store = TrackingStore::open(rerun_daemon::tracking_db_path())?;
    let mut tracking = JobTrackingQueue::load(store)?;

    let spec = JobSpec {
        id: JobId::new(),
        name: args.name,
        experiment_path: args.experiment_path,
        cluster: Cluster::Unknown,
        state: State::Unsubmitted,
        modified_time: chrono::Utc::now(),
        comment: None,
        queue: args.queue,
        project: args.project,
        jobscript_path: args.jobscript,
    };

    let id = spec.id;
    tracking.register(spec, OnConflict::Throw)?;
    println!("registered {id}");
    Ok(())
}
