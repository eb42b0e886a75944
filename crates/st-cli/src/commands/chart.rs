//! Chart command.
//!
//! This module implements `st chart`, which prints the data behind one
//! chart view: every event by time of day, or per-day seizure counts or
//! durations with their marker overlay.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use st_core::{
    AggregationBucket, Chart, ChartMode, ChartQuery, FilterParams, MarkerPoint, Metric,
    Repository, ScatterPoint, SleepConstraint, build_chart,
};

use super::util::{resolve_range, type_selection};

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Chart view: scatter, bar-count or bar-duration.
    #[arg(long, default_value_t = ChartMode::BarCount)]
    pub mode: ChartMode,

    /// First date of the range (YYYY-MM-DD). Defaults to the first logged date.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date of the range (YYYY-MM-DD). Defaults to the last logged date.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Event type to show in the scatter view. Repeatable.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Keep all seizures, only sleep-associated ones, or only awake ones.
    #[arg(long, default_value_t = SleepConstraint::All)]
    pub sleep: SleepConstraint,

    /// Split the per-day bars by sleep state.
    #[arg(long)]
    pub split_sleep: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Builds the query for `args`, or `None` for an empty log without an
/// explicit range.
pub fn build_query(repo: &Repository, args: &ChartArgs) -> Result<Option<ChartQuery>> {
    let Some(range) = resolve_range(repo, args.from, args.to)? else {
        return Ok(None);
    };
    let params = FilterParams::new(range)
        .with_event_types(type_selection(repo, &args.types)?)
        .with_sleep(args.sleep);
    Ok(Some(ChartQuery::new(args.mode, params, args.split_sleep)))
}

/// The chart of a view with nothing to show.
fn empty_chart(mode: ChartMode) -> Chart {
    match mode.metric() {
        None => Chart::Scatter { points: vec![] },
        Some(metric) => Chart::Bars {
            metric,
            buckets: vec![],
            markers: vec![],
        },
    }
}

// ========== Human-Readable Output ==========

fn sleep_label(sleep_associated: Option<bool>) -> &'static str {
    match sleep_associated {
        None => "all",
        Some(true) => "sleep",
        Some(false) => "awake",
    }
}

fn format_scatter(output: &mut String, points: &[ScatterPoint]) {
    writeln!(output, "EVENTS BY TIME OF DAY ({} events)", points.len()).unwrap();
    writeln!(output).unwrap();

    if points.is_empty() {
        writeln!(output, "No events in range.").unwrap();
        return;
    }

    writeln!(output, "Timestamp            Hour   Type / Value / Description").unwrap();
    for point in points {
        writeln!(
            output,
            "{}  {:>5.2}  {} / {} / {}",
            point.timestamp.format(st_core::event::TIMESTAMP_FORMAT),
            point.hour_of_day,
            point.event_type,
            point.recorded_value.as_deref().unwrap_or("-"),
            point.description,
        )
        .unwrap();
    }
}

fn format_bars(
    output: &mut String,
    metric: Metric,
    buckets: &[AggregationBucket],
    markers: &[MarkerPoint],
) {
    let title = match metric {
        Metric::Count => "SEIZURES PER DAY",
        Metric::DurationSum => "SEIZURE SECONDS PER DAY",
    };
    writeln!(output, "{title}").unwrap();
    writeln!(output).unwrap();

    if buckets.is_empty() {
        writeln!(output, "No seizures in range.").unwrap();
    } else {
        writeln!(output, "{:<10}  {:<5}  {:>8}", "Date", "Sleep", "Value").unwrap();
        for bucket in buckets {
            writeln!(
                output,
                "{:<10}  {:<5}  {:>8}",
                bucket.date,
                sleep_label(bucket.sleep_associated),
                bucket.value.to_string(),
            )
            .unwrap();
        }
    }

    if !markers.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "Markers").unwrap();
        for marker in markers {
            writeln!(
                output,
                "{}  {}  {}",
                marker.date, marker.label, marker.description
            )
            .unwrap();
        }
    }
}

/// Formats a chart for human-readable output.
pub fn format_chart(chart: &Chart) -> String {
    let mut output = String::new();
    match chart {
        Chart::Scatter { points } => format_scatter(&mut output, points),
        Chart::Bars {
            metric,
            buckets,
            markers,
        } => format_bars(&mut output, *metric, buckets, markers),
    }
    output
}

// ========== Public Interface ==========

/// Runs the chart command.
pub fn run(repo: &Repository, args: &ChartArgs) -> Result<()> {
    let chart = match build_query(repo, args)? {
        Some(query) => build_chart(repo, &query),
        None => empty_chart(args.mode),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        print!("{}", format_chart(&chart));
    }
    Ok(())
}
