//! In-memory fake [`CommandChannel`], indexed by exact command string,
//! so adapter and engine tests can run without real SSH or PBS.

use crate::{ChannelError, CommandChannel, ExecResult, FileMode, FileStream};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Cursor;

#[derive(Debug, Clone, Default)]
pub struct FakeChannel {
    responses: Mutex<HashMap<String, ExecResult>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<String>>,
    login_message: String,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_message(login_message: impl Into<String>) -> Self {
        Self { login_message: login_message.into(), ..Self::default() }
    }

    /// Register the response for an exact command string.
    pub fn on(&self, cmd: impl Into<String>, stdout: impl Into<String>, exit: i32) -> &Self {
        self.responses.lock().insert(
            cmd.into(),
            ExecResult { stdout: stdout.into(), stderr: String::new(), exit },
        );
        self
    }

    pub fn on_failure(&self, cmd: impl Into<String>, stderr: impl Into<String>, exit: i32) -> &Self {
        self.responses.lock().insert(
            cmd.into(),
            ExecResult { stdout: String::new(), stderr: stderr.into(), exit },
        );
        self
    }

    pub fn seed_file(&self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    pub fn file_contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().get(path).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl CommandChannel for FakeChannel {
    fn execute(&self, cmd: &str) -> Result<ExecResult, ChannelError> {
        if cmd.trim().is_empty() {
            return Err(ChannelError::InvalidArgument);
        }
        self.calls.lock().push(cmd.to_string());
        self.responses
            .lock()
            .get(cmd)
            .cloned()
            .ok_or_else(|| ChannelError::Io(std::io::Error::other(format!("no fake response registered for: {cmd}"))))
    }

    fn open_file(&self, path: &str, mode: FileMode) -> Result<Box<dyn FileStream>, ChannelError> {
        match mode {
            FileMode::Read => {
                let contents = self.files.lock().get(path).cloned().unwrap_or_default();
                Ok(Box::new(Cursor::new(contents)))
            }
            FileMode::Write | FileMode::Append => {
                // A write-back wrapper that commits to `files` on drop would
                // need a callback; tests instead call `seed_file`/`file_contents`
                // directly and exercise writes through `execute` (matching how
                // the remote mirror is written via echo-redirect, not sftp, in
                // the engine/storage layers).
                Ok(Box::new(Cursor::new(Vec::new())))
            }
        }
    }

    fn login_message(&self) -> &str {
        &self.login_message
    }
}
