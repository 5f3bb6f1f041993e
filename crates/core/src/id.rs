//! Job identity types.
//!
//! `JobId` is the user-owned identifier that survives resubmission;
//! `SchedulerId` is whatever the scheduler hands back at submission time
//! and is never assumed to be numeric (PBS prints `7013474.pbs-7`, SLURM
//! prints a bare integer).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, user-owned job identifier. Stable across resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: impl AsRef<str>) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.as_ref())?))
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for JobId {
    fn from(u: Uuid) -> Self {
        Self(u)
    }
}

/// Scheduler-assigned job identifier (PBS/SLURM). Opaque string; never
/// parsed as a number since clusters format these differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchedulerId(pub String);

impl SchedulerId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchedulerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SchedulerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SchedulerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
