//! rerun-daemon: configuration loading, logging setup, the
//! credential/channel/adapter wiring shared by both periodic driver
//! implementations, and the drivers themselves.
//!
//! The `rerund` binary (`src/main.rs`) is the thin entry point; this
//! library is what an embedder or test harness links against directly.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod driver;
mod error;
mod logging;
mod setup;
mod shutdown;

pub use config::Config;
pub use driver::{AsyncDriver, BlockingDriver};
pub use error::DaemonError;
pub use logging::init_logging;
pub use setup::{build_channel, tracking_db_path, AdapterSet, Supervisor};
pub use shutdown::ShutdownSignal;
