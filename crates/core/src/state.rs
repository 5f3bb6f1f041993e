//! Job state: the closed set of states a tracked job can occupy, and the
//! single-letter codes `qstat` reports them as.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Exiting,
    Held,
    Queued,
    Running,
    Moving,
    Waiting,
    Suspended,
    Unknown,
    Unsubmitted,
    Completed,
    Failed,
    Alert,
}

crate::simple_display! {
    State {
        Exiting => "exiting",
        Held => "held",
        Queued => "queued",
        Running => "running",
        Moving => "moving",
        Waiting => "waiting",
        Suspended => "suspended",
        Unknown => "unknown",
        Unsubmitted => "unsubmitted",
        Completed => "completed",
        Failed => "failed",
        Alert => "alert",
    }
}

impl State {
    /// Parse a `qstat` single-letter job state code (`job_state` field).
    /// Anything unrecognised maps to [`State::Unknown`] rather than erroring,
    /// since scheduler state codes are not a closed set we control.
    pub fn parse_code(code: &str) -> Self {
        match code {
            "E" => State::Exiting,
            "H" => State::Held,
            "Q" => State::Queued,
            "R" => State::Running,
            "T" => State::Moving,
            "W" => State::Waiting,
            "S" => State::Suspended,
            "U" => State::Unsubmitted,
            _ => State::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Exiting => "exiting",
            State::Held => "held",
            State::Queued => "queued",
            State::Running => "running",
            State::Moving => "moving",
            State::Waiting => "waiting",
            State::Suspended => "suspended",
            State::Unknown => "unknown",
            State::Unsubmitted => "unsubmitted",
            State::Completed => "completed",
            State::Failed => "failed",
            State::Alert => "alert",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "exiting" => Ok(State::Exiting),
            "held" => Ok(State::Held),
            "queued" => Ok(State::Queued),
            "running" => Ok(State::Running),
            "moving" => Ok(State::Moving),
            "waiting" => Ok(State::Waiting),
            "suspended" => Ok(State::Suspended),
            "unknown" => Ok(State::Unknown),
            "unsubmitted" => Ok(State::Unsubmitted),
            "completed" => Ok(State::Completed),
            "failed" => Ok(State::Failed),
            "alert" => Ok(State::Alert),
            other => Err(format!("unrecognised job state: {other}")),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, State::Running)
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, State::Queued)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Completed | State::Failed)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
