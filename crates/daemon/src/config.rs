//! Config file loading: TOML at `~/.config/rerun-tracker/config.toml`,
//! overridable via `$RERUN_CONFIG`. CLI flags (applied by the caller
//! after [`Config::load`]) override environment variables, which
//! override file values, which override these built-in defaults.

use crate::error::DaemonError;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SSH host alias (resolved via `~/.ssh/config`) or an `ssh://`
    /// URL. `None` targets the local machine directly.
    pub host: Option<String>,
    pub threshold: f64,
    pub interval_hours: f64,
    pub continue_on_rerun: bool,
    pub expected_walltime_hours: f64,
    pub safe_buffer: f64,
    pub quota_warn_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            threshold: 95.0,
            interval_hours: 1.0,
            continue_on_rerun: false,
            expected_walltime_hours: 72.0,
            safe_buffer: 1.5,
            quota_warn_percent: 90.0,
        }
    }
}

impl Config {
    /// Load the config file if present, then apply environment overrides.
    /// A missing file is not an error — the built-in defaults apply.
    pub fn load() -> Result<Self, DaemonError> {
        let path = Self::path();
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|source| DaemonError::ConfigParse { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(DaemonError::ConfigRead { path, source }),
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn path() -> PathBuf {
        if let Ok(explicit) = std::env::var("RERUN_CONFIG") {
            return PathBuf::from(explicit);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rerun-tracker")
            .join("config.toml")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("RERUN_HOST") {
            self.host = Some(host);
        }
        if let Some(v) = env_f64("RERUN_THRESHOLD") {
            self.threshold = v;
        }
        if let Some(v) = env_f64("RERUN_INTERVAL_HOURS") {
            self.interval_hours = v;
        }
        if let Ok(v) = std::env::var("RERUN_CONTINUE_ON_RERUN") {
            self.continue_on_rerun = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = env_f64("RERUN_EXPECTED_WALLTIME_HOURS") {
            self.expected_walltime_hours = v;
        }
        if let Some(v) = env_f64("RERUN_SAFE_BUFFER") {
            self.safe_buffer = v;
        }
        if let Some(v) = env_f64("RERUN_QUOTA_WARN_PERCENT") {
            self.quota_warn_percent = v;
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
