//! Logging setup: `tracing` + `tracing-subscriber` with an `EnvFilter`
//! (`RUST_LOG`, default `info`). When running as a systemd service
//! (`RERUN_SYSTEMD_SERVICE` set), formatting drops ANSI colour codes and
//! timestamps, since journald already stamps every line it captures from
//! stdout.

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let under_systemd = std::env::var_os("RERUN_SYSTEMD_SERVICE").is_some();

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(!under_systemd);

    if under_systemd {
        subscriber.without_time().init();
    } else {
        subscriber.init();
    }
}
