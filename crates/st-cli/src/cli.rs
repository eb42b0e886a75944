//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::chart::ChartArgs;
use crate::commands::details::DetailsArgs;
use crate::commands::markers::MarkersArgs;

/// Seizure event log explorer.
///
/// Loads a caregiving event log and computes the chart data, marker
/// overlays and per-day details used to review seizure patterns.
#[derive(Debug, Parser)]
#[command(name = "st", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Event log to read instead of the configured `data_path`.
    ///
    /// `.jsonl` and `.ndjson` files are read as JSON Lines, anything else
    /// as CSV.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute chart data for one query.
    Chart(ChartArgs),

    /// Show the seizure records of one day.
    Details(DetailsArgs),

    /// List marker points (medication codes, dosage changes).
    Markers(MarkersArgs),

    /// List the event types in the log with their record counts.
    Types {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
