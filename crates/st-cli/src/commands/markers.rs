//! Markers command.
//!
//! This module implements `st markers`, which lists the annotation markers
//! (medication codes, dosage adjustments) in a date range.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use st_core::{MarkerPoint, Repository, locate_all_markers};

use super::util::resolve_range;

#[derive(Debug, Args)]
pub struct MarkersArgs {
    /// First date of the range (YYYY-MM-DD). Defaults to the first logged date.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date of the range (YYYY-MM-DD). Defaults to the last logged date.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Marker points for `args`, grouped by marker type in configuration order.
pub fn collect(repo: &Repository, args: &MarkersArgs) -> Result<Vec<MarkerPoint>> {
    Ok(resolve_range(repo, args.from, args.to)?
        .map(|range| locate_all_markers(repo, range))
        .unwrap_or_default())
}

/// Formats marker points for human-readable output.
pub fn format_markers(points: &[MarkerPoint]) -> String {
    let mut output = String::new();

    writeln!(output, "MARKERS").unwrap();
    writeln!(output).unwrap();

    if points.is_empty() {
        writeln!(output, "No markers in range.").unwrap();
        return output;
    }

    for point in points {
        writeln!(
            output,
            "{}  {}  {}",
            point.date, point.label, point.description
        )
        .unwrap();
    }
    output
}

/// Runs the markers command.
pub fn run(repo: &Repository, args: &MarkersArgs) -> Result<()> {
    let points = collect(repo, args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        print!("{}", format_markers(&points));
    }
    Ok(())
}
