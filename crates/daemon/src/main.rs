//! `rerund`: the periodic remote batch-job supervisor.
//!
//! Thin entry point. All the real wiring lives in the library half of
//! this crate so `rerun-cli`'s `service install` can share `Config`
//! resolution without re-implementing it.

use rerun_daemon::{init_logging, AsyncDriver, BlockingDriver, Config, Supervisor};

fn main() {
    init_logging();

    let as_system_service = std::env::var_os("RERUN_SYSTEMD_SERVICE").is_some();

    if let Err(e) = run(as_system_service) {
        tracing::error!(error = %e, "rerund exiting");
        std::process::exit(1);
    }
}

fn run(as_system_service: bool) -> Result<(), rerun_daemon::DaemonError> {
    let config = Config::load()?;
    let supervisor = Supervisor::build(&config, as_system_service)?;

    tracing::info!(
        host = config.host.as_deref().unwrap_or("localhost"),
        interval_hours = config.interval_hours,
        threshold = config.threshold,
        systemd = as_system_service,
        "rerund starting"
    );

    let reconcile_loop = supervisor.reconcile_loop()?;

    if as_system_service {
        let shutdown = rerun_daemon::ShutdownSignal::new()?;
        BlockingDriver::new(supervisor.interval).run(reconcile_loop, shutdown);
    } else {
        AsyncDriver::new(supervisor.interval).run(reconcile_loop)?;
    }

    Ok(())
}
