//! Details command.
//!
//! This module implements `st details`, the drill-down table listing the
//! seizure records behind one day of the per-day charts.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use st_core::{DateRange, DrillDown, FilterParams, Repository, SleepConstraint};

#[derive(Debug, Args)]
pub struct DetailsArgs {
    /// Day to show (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    /// Keep all seizures, only sleep-associated ones, or only awake ones.
    #[arg(long, default_value_t = SleepConstraint::All)]
    pub sleep: SleepConstraint,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Resolves the detail view for `args`.
pub fn resolve(repo: &Repository, args: &DetailsArgs) -> DrillDown {
    let params = FilterParams::new(DateRange::day(args.date)).with_sleep(args.sleep);
    DrillDown::resolve(repo, Some(args.date), &params)
}

/// Formats the detail view for human-readable output.
pub fn format_details(view: &DrillDown) -> String {
    let mut output = String::new();

    if matches!(view, DrillDown::NoSelection) {
        writeln!(output, "No day selected.").unwrap();
        return output;
    }

    writeln!(output, "{}", view.title()).unwrap();
    writeln!(output).unwrap();

    let rows = view.rows();
    if rows.is_empty() {
        writeln!(output, "No matching seizures on this day.").unwrap();
        return output;
    }

    writeln!(output, "{:<19}  {:>10}  Description", "Timestamp", "Value").unwrap();
    for row in rows {
        writeln!(
            output,
            "{:<19}  {:>10}  {}",
            row.timestamp,
            row.recorded_value.as_deref().unwrap_or("-"),
            row.description
        )
        .unwrap();
    }
    output
}

/// Runs the details command.
pub fn run(repo: &Repository, args: &DetailsArgs) -> Result<()> {
    let view = resolve(repo, args);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_details(&view));
    }
    Ok(())
}
