//! `rerun duplicates` — delete live jobs sharing a jobscript path,
//! keeping the first encountered.

use anyhow::Result;
use clap::Args;
use rerun_adapters::WorkloadManager;
use rerun_daemon::{build_channel, AdapterSet, Config};

#[derive(Args)]
pub struct DuplicatesArgs {
    /// Also consider running jobs, not just queued ones, when picking
    /// duplicates-to-delete.
    #[arg(long)]
    running: bool,
}

pub fn run(host_override: Option<&str>, args: DuplicatesArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(host) = host_override {
        config.host = Some(host.to_string());
    }

    let channel = build_channel(config.host.as_deref())?;
    let adapters = AdapterSet::new();
    let adapter = adapters.detect(channel.as_ref())?;

    let live = adapter.get_jobs(channel.as_ref())?;
    let deleted = rerun_engine::delete_duplicates(channel.as_ref(), adapter, &live, args.running);

    if deleted.is_empty() {
        println!("no duplicates found");
    } else {
        for id in &deleted {
            println!("deleted duplicate: {id}");
        }
    }
    Ok(())
}
