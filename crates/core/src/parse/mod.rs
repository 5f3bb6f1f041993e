//! Parsers for the scalar formats `qstat -f -F json` emits: memory
//! quantities, walltime periods, and timestamps.

mod datetime;
mod memory;
mod walltime;

pub use datetime::parse_datetime;
pub use memory::parse_memory;
pub use walltime::parse_walltime;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognised memory format: {0}")]
    Memory(String),
    #[error("unrecognised walltime format: {0}")]
    Walltime(String),
    #[error("unrecognised datetime format: {0}")]
    Datetime(String),
}
