//! Local fallback cache: a JSON array of [`JobSpec`]s written atomically
//! (write-to-temp then rename) when the remote durable mirror write
//! fails.

use crate::error::StoreError;
use rerun_core::JobSpec;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FallbackCache {
    path: PathBuf,
}

impl FallbackCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the cached payload, or an empty vec if the file is absent.
    /// Absence or empty content both mean "no tracked jobs" — the same
    /// tolerance the remote mirror applies.
    pub fn read(&self) -> Result<Vec<JobSpec>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Materialize `specs` to the cache path, atomically (write-to-temp
    /// then rename).
    pub fn write(&self, specs: &[JobSpec]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string(specs)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Remove the cache file after a successful remote mirror write.
    /// A no-op if already absent.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The default path for this process: under `/var/tmp/<prog>/…` as
    /// a system service, otherwise `~/.<prog>/`.
    pub fn default_path(prog: &str, as_system_service: bool) -> PathBuf {
        if as_system_service {
            PathBuf::from("/var/tmp").join(prog).join("tracked-fallback.json")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{prog}"))
                .join("tracked-fallback.json")
        }
    }
}
