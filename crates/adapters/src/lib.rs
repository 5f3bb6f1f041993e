//! rerun-adapters: translates generic workload-manager operations
//! (submit/rerun/delete/get_jobs) to a scheduler's CLI, over a
//! [`rerun_channel::CommandChannel`].

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod manager;
mod pbs;
mod qstat;
mod slurm;
mod storage;
mod ucl;

pub use error::{AdapterError, JobSubmissionError};
pub use manager::{detect, StorageStats, WorkloadManager};
pub use pbs::PbsAdapter;
pub use slurm::SlurmAdapter;
pub use storage::{PartitionStats, Quota};
pub use ucl::UclAdapter;
