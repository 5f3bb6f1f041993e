use crate::ChannelError;
use rerun_core::{JobId, State};
use std::io::{Read, Write};

/// Result of [`CommandChannel::execute`]. Never constructed for a
/// channel-level fault — those are returned as `Err(ChannelError)` instead.
/// A non-zero exit is carried here, not raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit: i32,
}

impl ExecResult {
    pub fn ok(&self) -> bool {
        self.exit == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Read,
    Write,
    Append,
}

/// A readable/writable stream returned by [`CommandChannel::open_file`].
/// The caller is responsible for closing it (dropping it is sufficient —
/// both concrete implementations flush and close on `Drop`).
pub trait FileStream: Read + Write + Send {}
impl<T: Read + Write + Send> FileStream for T {}

/// What to do when a remote state-update helper invocation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFail {
    Raise,
    Warn,
    Ignore,
}

/// Uniform synchronous interface shared by [`crate::LocalChannel`] and
/// [`crate::SshChannel`].
pub trait CommandChannel: Send + Sync {
    /// Run `cmd`, returning its captured stdout/stderr/exit. Never returns
    /// `Err` for a non-zero exit — only for a fault in the channel itself.
    fn execute(&self, cmd: &str) -> Result<ExecResult, ChannelError>;

    /// Open a file on whatever filesystem this channel targets. The caller
    /// must close (drop) the returned stream.
    fn open_file(&self, path: &str, mode: FileMode) -> Result<Box<dyn FileStream>, ChannelError>;

    /// Invoke the remote `update-job-state` helper (or update the local DB
    /// directly, for a local channel).
    fn update_job_state(
        &self,
        job_id: JobId,
        state: State,
        comment: Option<&str>,
        on_fail: OnFail,
    ) -> Result<(), ChannelError> {
        let mut cmd = format!("update-job-state --job-id {job_id} --state {state}");
        if let Some(comment) = comment {
            cmd.push_str(&format!(" --comment {:?}", comment));
        }
        let on_fail_str = match on_fail {
            OnFail::Raise => "raise",
            OnFail::Warn => "warn",
            OnFail::Ignore => "ignore",
        };
        cmd.push_str(&format!(" --on-fail {on_fail_str}"));

        let result = self.execute(&cmd)?;
        if !result.ok() {
            let message = format!("update-job-state exited {}: {}", result.exit, result.stderr);
            return match on_fail {
                OnFail::Raise => Err(ChannelError::RemoteHelper(message)),
                OnFail::Warn => {
                    tracing::warn!(%job_id, %message, "update_job_state failed, continuing");
                    Ok(())
                }
                OnFail::Ignore => Ok(()),
            };
        }
        Ok(())
    }

    /// Invoke the remote `set-missing-alerts` helper.
    fn set_missing_alerts(&self) -> Result<ExecResult, ChannelError> {
        self.execute("set-missing-alerts")
    }

    /// Login-time informational lines captured once at construction.
    /// Used by the workload-manager adapter to compute storage quotas.
    /// Empty for channels with no login banner (local).
    fn login_message(&self) -> &str {
        ""
    }
}
