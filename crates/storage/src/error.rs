use rerun_channel::ChannelError;
use thiserror::Error;

/// Store-level faults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("on_conflict=throw: row already exists for id {0}")]
    Conflict(rerun_core::JobId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize tracked payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("remote mirror write failed: {0}")]
    MirrorWrite(String),
}
