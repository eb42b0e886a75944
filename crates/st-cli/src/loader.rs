//! Event log readers.
//!
//! Turns a CSV export or a JSON Lines file into raw rows and hands them to
//! the engine under the configured ingestion policy.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use st_core::{RawEvent, Repository};

use crate::config::{Columns, Config};

/// On-disk layout of an event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    JsonLines,
}

impl InputFormat {
    /// Picks the format from the file extension; CSV unless it is
    /// `.jsonl` or `.ndjson`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                Self::JsonLines
            }
            _ => Self::Csv,
        }
    }
}

/// Reads the log at `path` and builds the repository.
pub fn load_repository(path: &Path, config: &Config) -> Result<Repository> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let format = InputFormat::from_path(path);
    let raw = match format {
        InputFormat::Csv => read_csv(file, &config.columns),
        InputFormat::JsonLines => read_json_lines(BufReader::new(file)),
    }
    .with_context(|| format!("failed to read {}", path.display()))?;

    let (repo, report) =
        Repository::load_with_policy(raw, config.vocabulary.clone(), config.ingest_policy)
            .with_context(|| format!("failed to load events from {}", path.display()))?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = report.skipped.len(),
            loaded = report.loaded,
            "some rows were skipped"
        );
    }
    tracing::debug!(path = %path.display(), ?format, records = repo.len(), "loaded event log");
    Ok(repo)
}

// ========== CSV ==========

/// Position of each configured column in the header row.
struct ColumnIndex {
    timestamp: usize,
    event_type: usize,
    value: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &Columns) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let required = |name: &str| {
            find(name).with_context(|| format!("missing column {name:?} in header row"))
        };

        Ok(Self {
            timestamp: required(&columns.timestamp)?,
            event_type: required(&columns.event_type)?,
            value: find(&columns.value),
            description: find(&columns.description),
        })
    }
}

/// Reads CSV rows with a header line. Extra columns are ignored; the value
/// and description columns may be absent.
pub fn read_csv<R: Read>(reader: R, columns: &Columns) -> Result<Vec<RawEvent>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("failed to read CSV header")?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut events = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("invalid CSV on row {}", idx + 1))?;
        let field = |i: Option<usize>| i.and_then(|i| record.get(i)).map(str::to_string);
        events.push(RawEvent {
            timestamp: field(Some(index.timestamp)),
            event_type: field(Some(index.event_type)),
            value: field(index.value),
            description: field(index.description),
        });
    }
    Ok(events)
}

// ========== JSON Lines ==========

/// One JSON Lines row. The value may be written as a number or a string.
#[derive(Debug, Deserialize)]
struct JsonEvent {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default, rename = "type")]
    event_type: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

impl From<JsonEvent> for RawEvent {
    fn from(event: JsonEvent) -> Self {
        let value = event.value.and_then(|v| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        Self {
            timestamp: event.timestamp,
            event_type: event.event_type,
            value,
            description: event.description,
        }
    }
}

/// Reads one JSON object per line; blank lines are skipped.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<RawEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: JsonEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        events.push(parsed.into());
    }
    Ok(events)
}
