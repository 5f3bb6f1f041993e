//! `rerun submit` — hand a registered, still-`unsubmitted` job to the
//! scheduler via `WorkloadManager::submit_job`.

use anyhow::{bail, Context, Result};
use clap::Args;
use rerun_adapters::WorkloadManager;
use rerun_core::{JobId, State};
use rerun_daemon::{build_channel, tracking_db_path, AdapterSet, Config};
use rerun_storage::TrackingStore;

#[derive(Args)]
pub struct SubmitArgs {
    /// The `JobId` (as printed by `rerun register`) to submit.
    id: String,
}

pub fn run(host_override: Option<&str>, args: SubmitArgs) -> Result<()> {
    let id = JobId::from_string(&args.id).context("not a valid job id")?;

    let mut config = Config::load()?;
    if let Some(host) = host_override {
        config.host = Some(host.to_string());
    }

    let store = TrackingStore::open(tracking_db_path())?;
    let spec = store.get(id)?.with_context(|| format!("no tracked job with id {id}"))?;
    if spec.state != State::Unsubmitted {
        bail!("job {id} is already {} — only unsubmitted jobs can be submitted", spec.state);
    }

    let channel = build_channel(config.host.as_deref())?;
    let adapters = AdapterSet::new();
    let adapter = adapters.detect(channel.as_ref())?;

    let scheduler_id = adapter.submit_job(channel.as_ref(), &spec)?;
    store.update_state(id, State::Queued, None)?;
    println!("submitted {id} as scheduler job {scheduler_id}");
    Ok(())
}
