//! `rerun list` — print the durable tracking store's current rows,
//! reusing `rerun_core::queue`'s filter predicates directly rather than
//! reimplementing them.

use anyhow::Result;
use clap::{Args, ValueEnum};
use rerun_core::{queue::filter_state, State};
use rerun_storage::TrackingStore;

#[derive(Clone, Copy, ValueEnum)]
pub enum StateFilter {
    Unsubmitted,
    Queued,
    Running,
    Held,
    Moving,
    Waiting,
    Suspended,
    Exiting,
    Completed,
    Failed,
    Alert,
    Unknown,
}

impl From<StateFilter> for State {
    fn from(f: StateFilter) -> Self {
        match f {
            StateFilter::Unsubmitted => State::Unsubmitted,
            StateFilter::Queued => State::Queued,
            StateFilter::Running => State::Running,
            StateFilter::Held => State::Held,
            StateFilter::Moving => State::Moving,
            StateFilter::Waiting => State::Waiting,
            StateFilter::Suspended => State::Suspended,
            StateFilter::Exiting => State::Exiting,
            StateFilter::Completed => State::Completed,
            StateFilter::Failed => State::Failed,
            StateFilter::Alert => State::Alert,
            StateFilter::Unknown => State::Unknown,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show jobs in this tracked state.
    #[arg(long, value_enum)]
    state: Option<StateFilter>,
    /// Print as JSON instead of a text table.
    #[arg(long)]
    json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let store = TrackingStore::open(rerun_daemon::tracking_db_path())?;
    let all = store.all()?;
    let rows = match args.state {
        Some(state) => filter_state(&all, state.into()).into_iter().cloned().collect::<Vec<_>>(),
        None => all,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<36}  {:<10}  {:<20}  {}", "id", "state", "name", "experiment_path");
    for spec in &rows {
        println!("{:<36}  {:<10}  {:<20}  {}", spec.id, spec.state, spec.name, spec.experiment_path);
    }
    Ok(())
}
