//! Wiring: resolves a [`Config`] into a live [`rerun_channel::CommandChannel`],
//! detects the workload-manager adapter, and assembles the
//! [`rerun_engine::ReconcileLoop`] both drivers share.

use crate::config::Config;
use crate::error::DaemonError;
use rerun_adapters::{AdapterError, PbsAdapter, SlurmAdapter, UclAdapter, WorkloadManager};
use rerun_channel::{CommandChannel, HostConfig, LocalChannel, SshChannel};
use rerun_core::SystemClock;
use rerun_engine::{correct_threshold, ReconcileEngine, ReconcileLoop, SweepConfig, ThresholdConfig};
use rerun_storage::{FallbackCache, TrackingStore};
use std::path::PathBuf;

/// The three adapters probed in a fixed order: PBS, then its UCL
/// dialect, then the SLURM stub.
pub struct AdapterSet {
    pbs: PbsAdapter,
    ucl: UclAdapter,
    slurm: SlurmAdapter,
}

impl Default for AdapterSet {
    fn default() -> Self {
        Self { pbs: PbsAdapter::new(), ucl: UclAdapter::new(), slurm: SlurmAdapter::new() }
    }
}

impl AdapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detect(&self, channel: &dyn CommandChannel) -> Result<&dyn WorkloadManager, AdapterError> {
        rerun_adapters::detect(channel, &[&self.pbs, &self.ucl, &self.slurm])
    }
}

/// Build the command channel a [`Config`] targets: a local shell when
/// `host` is unset, otherwise an interactive SSH shell resolved either
/// from `~/.ssh/config` or an `ssh://user@host[:port]` URL.
pub fn build_channel(host: Option<&str>) -> Result<Box<dyn CommandChannel>, DaemonError> {
    match host {
        None => Ok(Box::new(LocalChannel::new())),
        Some(target) if target.starts_with("ssh://") => {
            let host_config = HostConfig::from_url(target)?;
            Ok(Box::new(SshChannel::connect(&host_config, None)?))
        }
        Some(alias) => {
            let host_config = HostConfig::from_config(alias)?;
            Ok(Box::new(SshChannel::connect(&host_config, None)?))
        }
    }
}

pub fn tracking_db_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("JOB_TRACKING_DB") {
        return PathBuf::from(explicit);
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".tracking").join("jobs.db")
}

/// Everything a driver needs across the process lifetime: the channel,
/// the adapter set, the fallback-cache location, and the corrected
/// sweep threshold. The tracking store itself is opened by
/// [`Self::reconcile_loop`] rather than held here, since it is owned by
/// the `ReconcileEngine` it feeds.
pub struct Supervisor {
    pub channel: Box<dyn CommandChannel>,
    pub adapters: AdapterSet,
    pub fallback_path: PathBuf,
    pub clock: SystemClock,
    pub sweep_config: SweepConfig,
    pub quota_warn_percent: f64,
    pub interval: std::time::Duration,
}

impl Supervisor {
    pub fn build(config: &Config, as_system_service: bool) -> Result<Self, DaemonError> {
        let channel = build_channel(config.host.as_deref())?;

        let threshold_cfg = ThresholdConfig {
            threshold: config.threshold,
            interval_hours: config.interval_hours,
            expected_walltime_hours: config.expected_walltime_hours,
            safe_buffer: config.safe_buffer,
        };
        let (corrected, warned) = correct_threshold(threshold_cfg);
        if warned {
            tracing::warn!(
                requested = config.threshold,
                corrected = corrected.threshold,
                "rerun threshold too tight for the configured interval; lowered to the safe boundary"
            );
        }

        Ok(Self {
            channel,
            adapters: AdapterSet::new(),
            fallback_path: FallbackCache::default_path("rerun-tracker", as_system_service),
            clock: SystemClock,
            sweep_config: SweepConfig {
                threshold: corrected.threshold,
                continue_on_rerun: config.continue_on_rerun,
            },
            quota_warn_percent: config.quota_warn_percent,
            interval: std::time::Duration::from_secs_f64(config.interval_hours * 3600.0),
        })
    }

    /// Detect the adapter, open the tracking store, and assemble the
    /// shared [`ReconcileLoop`]. Callers must call this exactly once and
    /// drive the returned value with repeated `tick()` calls: the
    /// `ReconcileEngine` inside it remembers which jobs it has already
    /// classified across sweeps, so rebuilding the loop on every tick
    /// would silently discard that history.
    pub fn reconcile_loop(&self) -> Result<ReconcileLoop<'_>, DaemonError> {
        let adapter = self.adapters.detect(self.channel.as_ref())?;
        let store = TrackingStore::open(tracking_db_path())?;
        let fallback = FallbackCache::new(self.fallback_path.clone());
        let engine = ReconcileEngine::new(self.channel.as_ref(), adapter, store, fallback, &self.clock);
        Ok(ReconcileLoop::new(engine, self.channel.as_ref(), adapter, self.sweep_config, self.quota_warn_percent))
    }
}
