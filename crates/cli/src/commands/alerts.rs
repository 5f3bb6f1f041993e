//! `rerun missing-alerts` — the out-of-band pass meant to be installed as
//! a head-node cron entry, run via the local channel regardless of the
//! configured SSH host.

use anyhow::Result;
use rerun_adapters::PbsAdapter;
use rerun_channel::LocalChannel;
use rerun_core::SystemClock;
use rerun_storage::TrackingStore;

pub fn run() -> Result<()> {
    let channel = LocalChannel::new();
    let adapter = PbsAdapter::new();
    let store = TrackingStore::open(rerun_daemon::tracking_db_path())?;
    let clock = SystemClock;

    let flagged = rerun_engine::run_missing_alerts(&channel, &adapter, &store, &clock)?;
    if flagged.is_empty() {
        println!("no missing jobs found");
    } else {
        for id in &flagged {
            println!("flagged alert: {id}");
        }
    }
    Ok(())
}
