use thiserror::Error;

/// Channel-level faults. These are reserved for faults in the transport
/// itself — a non-zero exit from the remote command is never an error,
/// it is carried in [`crate::ExecResult::exit`].
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("command must not be empty")]
    InvalidArgument,

    #[error("ssh session error: {0}")]
    Ssh(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shell desync: sentinel not observed within the read budget")]
    ShellDesync,

    #[error("no ssh authentication method succeeded for {host}")]
    AuthFailed { host: String },

    #[error("failed to parse ssh config: {0}")]
    SshConfig(String),

    #[error("remote helper failed: {0}")]
    RemoteHelper(String),
}

impl From<ssh2::Error> for ChannelError {
    fn from(e: ssh2::Error) -> Self {
        ChannelError::Ssh(e.to_string())
    }
}
