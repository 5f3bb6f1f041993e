use rerun_adapters::AdapterError;
use rerun_channel::ChannelError;
use rerun_storage::StoreError;
use thiserror::Error;

/// Sweep-level faults. A channel fault or store fault aborts the
/// current sweep without mutating durable state further; the driver
/// logs and continues scheduling on the next tick.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to materialize local fallback cache after a failed remote mirror write: {0}")]
    FallbackCacheFatal(String),
}
