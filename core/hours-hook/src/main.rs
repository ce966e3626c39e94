//! hours-hook: CLI front end for Working Hours.
//!
//! Lets a host that cannot load the library directly stream its redraw ticks
//! through a pipe, and lets the user inspect or clear the ledger.
//!
//! ## Subcommands
//!
//! - `feed`: Reads tick events as JSON lines from stdin
//! - `report`: Prints one scope's totals per mode
//! - `days`: Lists work days and their totals
//! - `wipe`: Deletes the ledger (requires `--yes`)

mod feed;
mod logging;
mod report;

use clap::{Parser, Subcommand};
use hours_core::StorageConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hours-hook")]
#[command(about = "Working Hours active-time tracker")]
#[command(version)]
struct Cli {
    /// Directory holding work_hours.ini (default: beside this executable)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process tick events (JSON lines on stdin)
    Feed {
        /// Drive the clock from each event's `timestamp`/`wall_time` instead of the system clock
        #[arg(long)]
        replay: bool,
    },

    /// Print totals for one ledger scope (default: all documents)
    Report {
        /// Raw scope name (`ALL`, `YYYY-MM-DD`, a document path, `NoFile`)
        #[arg(long, conflicts_with_all = ["today", "document"])]
        scope: Option<String>,

        /// Report the current work day
        #[arg(long, conflicts_with = "document")]
        today: bool,

        /// Report one document; an empty path means the unsaved document
        #[arg(long, value_name = "PATH")]
        document: Option<String>,
    },

    /// List work days with their totals
    Days,

    /// Delete every record
    Wipe {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let storage = cli.root.map(StorageConfig::with_root).unwrap_or_default();
    let _logging_guard = logging::init(&storage);

    let result = match cli.command {
        Commands::Feed { replay } => feed::run(storage, replay).map(|stats| {
            tracing::debug!(
                recorded = stats.recorded,
                idle = stats.idle,
                regressed = stats.regressed,
                unknown_mode = stats.unknown_mode,
                failed = stats.failed,
                skipped = stats.skipped,
                "Feed finished"
            );
        }),
        Commands::Report {
            scope,
            today,
            document,
        } => report::run_report(storage, report::ReportScope::from_args(scope, today, document)),
        Commands::Days => report::run_days(storage),
        Commands::Wipe { yes } => report::run_wipe(storage, yes),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "hours-hook failed");
        std::process::exit(1);
    }
}
