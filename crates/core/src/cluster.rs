//! Cluster tag: a closed enum of known cluster variants plus `Unknown`.
//!
//! Detection is deliberately fail-soft: a cluster that can't be identified
//! from `qstat --version` output or a known server hostname resolves to
//! [`Cluster::Unknown`] rather than erroring.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cluster {
    Cx3,
    Cx3Phase2,
    Unknown,
}

crate::simple_display! {
    Cluster {
        Cx3 => "cx3",
        Cx3Phase2 => "cx3_phase_2",
        Unknown => "unknown",
    }
}

impl Cluster {
    /// Parse a `pbs_version = ...`-style key/value dump (as produced by
    /// `qstat --version`) into a cluster tag. Never errors; an
    /// unrecognised version string is [`Cluster::Unknown`].
    pub fn from_version_output(stdout: &str) -> Self {
        let version = stdout
            .lines()
            .filter_map(|line| line.split_once('='))
            .find(|(key, _)| key.trim() == "pbs_version")
            .map(|(_, value)| value.trim().to_string());

        match version {
            Some(v) if v.starts_with("19") => Cluster::Cx3,
            Some(v) if v.starts_with("2024") => Cluster::Cx3Phase2,
            _ => Cluster::Unknown,
        }
    }

    /// Resolve a cluster tag from a known server hostname
    /// (`Job_Owner`/`server` field in `qstat` output).
    pub fn from_server(server: &str) -> Self {
        match server {
            "pbs1.rcs.ic.ac.uk" => Cluster::Cx3,
            "pbs-7" => Cluster::Cx3Phase2,
            _ => Cluster::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Cx3 => "cx3",
            Cluster::Cx3Phase2 => "cx3_phase_2",
            Cluster::Unknown => "unknown",
        }
    }

    pub fn from_str_or_unknown(s: &str) -> Self {
        match s {
            "cx3" => Cluster::Cx3,
            "cx3_phase_2" => Cluster::Cx3Phase2,
            _ => Cluster::Unknown,
        }
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Cluster::Unknown
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
