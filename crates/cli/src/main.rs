//! `rerun`: the thin CLI surface over the remote batch-job supervisor.
//! Each subcommand is a direct call into
//! `rerun-engine`/`rerun-storage`/`rerun-adapters`, not a new layer of
//! business logic.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rerun", version, about = "Remote batch-job supervisor and tracker")]
struct Cli {
    /// Override the configured SSH target (host alias or ssh://user@host[:port]).
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a job to be tracked (creates an `unsubmitted` row).
    Register(commands::register::RegisterArgs),
    /// List tracked jobs.
    List(commands::list::ListArgs),
    /// Submit a previously-registered job to the scheduler.
    Submit(commands::submit::SubmitArgs),
    /// Run one reconciliation sweep immediately and print its report.
    SweepNow,
    /// Scan for queued jobs missing from the live queue and flag them `alert`.
    MissingAlerts,
    /// Delete duplicate live jobs sharing a jobscript path.
    Duplicates(commands::duplicates::DuplicatesArgs),
    /// Manage the systemd user service.
    Service(commands::service::ServiceArgs),
}

fn main() {
    rerun_daemon::init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register(args) => commands::register::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Submit(args) => commands::submit::run(cli.host.as_deref(), args),
        Commands::SweepNow => commands::sweep::run(cli.host.as_deref()),
        Commands::MissingAlerts => commands::alerts::run(),
        Commands::Duplicates(args) => commands::duplicates::run(cli.host.as_deref(), args),
        Commands::Service(args) => commands::service::run(args),
    }
}
