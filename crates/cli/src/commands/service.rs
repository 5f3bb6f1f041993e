//! `rerun service install` — write a systemd user unit for `rerund`.
//! systemd already provides the detach-from-terminal and
//! supervise/restart behavior a hand-rolled daemonizing double-fork
//! would otherwise need to implement.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    command: ServiceCommand,
}

#[derive(Subcommand)]
enum ServiceCommand {
    /// Write the systemd user unit and print the enable/start commands.
    Install {
        /// SSH host the installed service should target.
        #[arg(long)]
        host: Option<String>,
    },
}

pub fn run(args: ServiceArgs) -> Result<()> {
    match args.command {
        ServiceCommand::Install { host } => install(host),
    }
}

fn unit_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("no config directory for this user")?;
    Ok(base.join("systemd/user/rerun-tracker.service"))
}

/// Path to the `rerund` binary: the sibling of whatever `rerun` binary
/// is currently running, falling back to a bare command name if that
/// can't be resolved (e.g. running from a non-standard install layout).
fn rerund_path() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join("rerund")))
        .filter(|p| p.exists())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "rerund".to_string())
}

fn install(host: Option<String>) -> Result<()> {
    let path = unit_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let exec_start = rerund_path();
    let host_env = host.map(|h| format!("Environment=RERUN_HOST={h}\n")).unwrap_or_default();

    let unit = format!(
        "[Unit]\n\
         Description=rerun-tracker batch job supervisor\n\
         After=network-online.target\n\
         Wants=network-online.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         ExecStart={exec_start}\n\
         Environment=RERUN_SYSTEMD_SERVICE=1\n\
         {host_env}\
         Restart=on-failure\n\
         RestartSec=5\n\
         \n\
         [Install]\n\
         WantedBy=default.target\n"
    );

    std::fs::write(&path, unit)?;
    println!("wrote {}", path.display());
    println!("run: systemctl --user daemon-reload && systemctl --user enable --now rerun-tracker.service");
    Ok(())
}
