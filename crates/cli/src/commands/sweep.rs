//! `rerun sweep-now` — run a single reconciliation sweep synchronously
//! and print its report, instead of waiting for the daemon's next tick.

use anyhow::Result;
use rerun_daemon::{Config, Supervisor};

pub fn run(host_override: Option<&str>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(host) = host_override {
        config.host = Some(host.to_string());
    }

    let supervisor = Supervisor::build(&config, false)?;
    let mut reconcile_loop = supervisor.reconcile_loop()?;
    let report = reconcile_loop.tick()?;

    println!("live jobs:            {}", report.live_count);
    println!("tracked jobs:         {}", report.tracked_count);
    println!("reran:                {}", report.reran.len());
    println!("untracked (complete): {}", report.untracked_completed.len());
    println!("untracked (no script):{}", report.untracked_missing_script.len());
    if report.queue_full {
        println!("note: scheduler queue was full; some reruns were deferred to the next sweep");
    }
    if report.mirror_write_failed {
        println!("note: remote mirror write failed; results cached to the local fallback file");
    }
    Ok(())
}
