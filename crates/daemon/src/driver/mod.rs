//! The two periodic drivers. Both wrap the same
//! [`rerun_engine::ReconcileLoop`] and differ only in how they schedule
//! ticks and wait for a shutdown signal.

mod asyncd;
mod blocking;

pub use asyncd::AsyncDriver;
pub use blocking::BlockingDriver;
