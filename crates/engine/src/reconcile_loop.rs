//! `ReconcileLoop`: the per-tick body shared by both periodic driver
//! implementations. `BlockingDriver` and `AsyncDriver` differ only in how
//! they schedule ticks and wait for a shutdown signal; the sweep itself,
//! plus the storage-quota watch that rides along with it, lives here
//! exactly once so neither driver can drift out of sync with the other.

use crate::error::EngineError;
use crate::quota::check_storage_quota;
use crate::sweep::{ReconcileEngine, SweepConfig, SweepReport};
use rerun_adapters::WorkloadManager;
use rerun_channel::CommandChannel;

pub struct ReconcileLoop<'a> {
    engine: ReconcileEngine<'a>,
    channel: &'a dyn CommandChannel,
    adapter: &'a dyn WorkloadManager,
    config: SweepConfig,
    quota_warn_percent: f64,
}

impl<'a> ReconcileLoop<'a> {
    pub fn new(
        engine: ReconcileEngine<'a>,
        channel: &'a dyn CommandChannel,
        adapter: &'a dyn WorkloadManager,
        config: SweepConfig,
        quota_warn_percent: f64,
    ) -> Self {
        Self { engine, channel, adapter, config, quota_warn_percent }
    }

    /// Run one sweep, then check storage quotas off the same login
    /// banner the adapter already has cached. The quota check never
    /// fails the tick: `get_storage_stats` degrades to an empty map on
    /// parse failure.
    pub fn tick(&mut self) -> Result<SweepReport, EngineError> {
        let report = self.engine.sweep(self.config)?;
        let stats = self.adapter.get_storage_stats(self.channel.login_message());
        check_storage_quota(&stats, self.quota_warn_percent);
        Ok(report)
    }
}
