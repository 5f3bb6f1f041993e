use rerun_channel::ChannelError;
use thiserror::Error;

/// Submission faults. `QueueFull` and `MissingJobScript` are kept as
/// distinct variants rather than an exception subclass hierarchy (Rust
/// has no inheritance): the sweep matches on the variant directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobSubmissionError {
    #[error("scheduler queue is full")]
    QueueFull,
    #[error("jobscript is missing: {0}")]
    MissingJobScript(String),
    #[error("job submission failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Submission(#[from] JobSubmissionError),

    #[error("job deletion failed: {0}")]
    Deletion(String),

    #[error("adapter not installed on this channel (list_jobs_cmd exited 127)")]
    NotInstalled,

    #[error("operation not supported by this adapter: {0}")]
    NotSupported(String),

    #[error("failed to parse {what}: {detail}")]
    Parse { what: &'static str, detail: String },
}

impl AdapterError {
    pub fn parse(what: &'static str, detail: impl Into<String>) -> Self {
        AdapterError::Parse { what, detail: detail.into() }
    }
}
