use rerun_adapters::AdapterError;
use rerun_channel::ChannelError;
use rerun_engine::EngineError;
use rerun_storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level daemon faults. Configuration and channel-resolution errors
/// are fatal at startup; everything from the sweep loop itself is caught
/// and logged by the drivers rather than propagated here — the
/// supervisor must never self-terminate because of a single failing
/// sweep.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to install shutdown signal handler: {0}")]
    Signal(#[from] nix::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
