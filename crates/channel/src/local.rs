use crate::{ChannelError, CommandChannel, ExecResult, FileMode, FileStream};
use std::fs::OpenOptions;
use std::process::Command;

/// Runs commands via `sh -c <cmd>` using `std::process::Command`. Used for
/// the missing-alerts pass and duplicate-deletion helpers when invoked
/// directly on the cluster head node, where no SSH hop is needed.
#[derive(Debug, Default)]
pub struct LocalChannel;

impl LocalChannel {
    pub fn new() -> Self {
        Self
    }
}

impl CommandChannel for LocalChannel {
    fn execute(&self, cmd: &str) -> Result<ExecResult, ChannelError> {
        if cmd.trim().is_empty() {
            return Err(ChannelError::InvalidArgument);
        }

        let output = Command::new("sh").arg("-c").arg(cmd).output()?;
        Ok(ExecResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit: output.status.code().unwrap_or(-1),
        })
    }

    fn open_file(&self, path: &str, mode: FileMode) -> Result<Box<dyn FileStream>, ChannelError> {
        let file = match mode {
            FileMode::Read => OpenOptions::new().read(true).open(path)?,
            FileMode::Write => OpenOptions::new().write(true).create(true).truncate(true).open(path)?,
            FileMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
        };
        Ok(Box::new(file))
    }
}
