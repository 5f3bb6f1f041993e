//! The remote durable mirror: a JSON array of [`JobSpec`]s at
//! `$HOME/.rerun-tracked.json` on the cluster, written via a single
//! echo-redirect and read back with `cat`.

use crate::error::StoreError;
use rerun_channel::CommandChannel;
use rerun_core::JobSpec;

pub const DEFAULT_MIRROR_PATH: &str = "$HOME/.rerun-tracked.json";

pub struct RemoteMirror<'a> {
    channel: &'a dyn CommandChannel,
    path: String,
}

impl<'a> RemoteMirror<'a> {
    pub fn new(channel: &'a dyn CommandChannel, path: impl Into<String>) -> Self {
        Self { channel, path: path.into() }
    }

    pub fn default_path(channel: &'a dyn CommandChannel) -> Self {
        Self::new(channel, DEFAULT_MIRROR_PATH)
    }

    /// Read the mirrored payload. Absence or empty content means "no
    /// tracked jobs", matched here by tolerating both a nonzero `cat`
    /// exit (file doesn't exist) and blank stdout.
    pub fn pull(&self) -> Result<Vec<JobSpec>, StoreError> {
        let result = self.channel.execute(&format!("cat {}", self.path))?;
        if !result.ok() || result.stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&result.stdout)?)
    }

    /// Write `specs` to the remote mirror via a single echo-redirect.
    /// Returns `Err` on any non-zero exit so the caller can fall back to
    /// the local cache.
    pub fn push(&self, specs: &[JobSpec]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(specs)?;
        // Single-quote the payload; JSON never contains an unescaped
        // single quote, so no further escaping is required.
        let cmd = format!("echo '{payload}' > {}", self.path);
        let result = self.channel.execute(&cmd)?;
        if !result.ok() {
            return Err(StoreError::MirrorWrite(format!(
                "echo-redirect to {} exited {}: {}",
                self.path, result.exit, result.stderr
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rerun_channel::fake::FakeChannel;
    use rerun_core::test_support::spec_with_id;
    use rerun_core::JobId;

    #[test]
    fn pull_missing_file_is_empty() {
        let channel = FakeChannel::new();
        channel.on_failure("cat $HOME/.rerun-tracked.json", "No such file", 1);
        let mirror = RemoteMirror::default_path(&channel);
        assert!(mirror.pull().unwrap().is_empty());
    }

    #[test]
    fn pull_empty_content_is_empty() {
        let channel = FakeChannel::new();
        channel.on("cat $HOME/.rerun-tracked.json", "", 0);
        let mirror = RemoteMirror::default_path(&channel);
        assert!(mirror.pull().unwrap().is_empty());
    }

    #[test]
    fn push_then_pull_round_trips_through_the_fake_channel() {
        let channel = FakeChannel::new();
        let mirror = RemoteMirror::default_path(&channel);
        let spec = spec_with_id(JobId::new());
        let payload = serde_json::to_string(&[spec.clone()]).unwrap();

        channel.on(format!("echo '{payload}' > $HOME/.rerun-tracked.json"), "", 0);
        mirror.push(&[spec.clone()]).unwrap();

        channel.on("cat $HOME/.rerun-tracked.json", payload, 0);
        let pulled = mirror.pull().unwrap();
        assert_eq!(pulled.len(), 1);
        assert_eq!(pulled[0].id, spec.id);
    }

    #[test]
    fn push_failure_surfaces_as_mirror_write_error() {
        let channel = FakeChannel::new();
        let specs = vec![spec_with_id(JobId::new())];
        let payload = serde_json::to_string(&specs).unwrap();
        channel.on_failure(format!("echo '{payload}' > $HOME/.rerun-tracked.json"), "disk quota exceeded", 1);

        let mirror = RemoteMirror::default_path(&channel);
        let err = mirror.push(&specs).unwrap_err();
        assert!(matches!(err, StoreError::MirrorWrite(_)));
    }
}
