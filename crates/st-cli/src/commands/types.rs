//! Types command.
//!
//! This module implements `st types`, the catalogue of event types found in
//! the log: record counts, which types are selected by default, and the
//! logged date span.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use st_core::{DateRange, EventType, Repository};

use super::util::format_range;

/// One entry of the type catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct TypeEntry {
    pub event_type: EventType,
    pub count: usize,
    /// Selected when no `--type` is given.
    pub default_selected: bool,
}

/// Event types present in the log, sorted by label.
#[derive(Debug, Clone, Serialize)]
pub struct TypeCatalogue {
    pub span: Option<DateRange>,
    pub total: usize,
    pub types: Vec<TypeEntry>,
}

/// Builds the catalogue from a loaded repository.
pub fn catalogue(repo: &Repository) -> TypeCatalogue {
    let defaults = repo.default_event_types();
    let types = repo
        .type_counts()
        .into_iter()
        .map(|(event_type, count)| TypeEntry {
            default_selected: defaults.contains(&event_type),
            event_type: event_type.clone(),
            count,
        })
        .collect();

    TypeCatalogue {
        span: repo.date_span(),
        total: repo.len(),
        types,
    }
}

/// Formats the catalogue for human-readable output.
pub fn format_catalogue(catalogue: &TypeCatalogue) -> String {
    let mut output = String::new();

    let Some(span) = catalogue.span else {
        writeln!(output, "EVENT TYPES").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "No events logged.").unwrap();
        return output;
    };

    writeln!(
        output,
        "EVENT TYPES  {}  ({} records)",
        format_range(span),
        catalogue.total
    )
    .unwrap();
    writeln!(output).unwrap();

    for entry in &catalogue.types {
        let marker = if entry.default_selected { "*" } else { " " };
        writeln!(output, "{marker} {:>6}  {}", entry.count, entry.event_type).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(output, "* selected by default").unwrap();
    output
}

/// Runs the types command.
pub fn run(repo: &Repository, json: bool) -> Result<()> {
    let catalogue = catalogue(repo);

    if json {
        println!("{}", serde_json::to_string_pretty(&catalogue)?);
    } else {
        print!("{}", format_catalogue(&catalogue));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use st_core::{RawEvent, Vocabulary};

    fn raw(timestamp: &str, event_type: &str) -> RawEvent {
        RawEvent {
            timestamp: Some(timestamp.to_string()),
            event_type: Some(event_type.to_string()),
            ..RawEvent::default()
        }
    }

    fn sample_repo() -> Repository {
        Repository::load(
            vec![
                raw("2024-01-01 03:00", "癲癇"),
                raw("2024-01-01 07:30", "起床"),
                raw("2024-01-02 10:00", "癲癇"),
                raw("2024-01-03 09:00", "S101"),
            ],
            Vocabulary::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_catalogue_counts_and_defaults() {
        let catalogue = catalogue(&sample_repo());

        assert_eq!(catalogue.total, 4);
        let entries: Vec<_> = catalogue
            .types
            .iter()
            .map(|e| (e.event_type.as_str(), e.count, e.default_selected))
            .collect();
        assert_eq!(
            entries,
            vec![("S101", 1, false), ("癲癇", 2, true), ("起床", 1, true)]
        );
    }

    #[test]
    fn test_format_catalogue() {
        let output = format_catalogue(&catalogue(&sample_repo()));

        assert_snapshot!(output, @r"
        EVENT TYPES  2024-01-01 .. 2024-01-03  (4 records)

               1  S101
        *      2  癲癇
        *      1  起床

        * selected by default
        ");
    }

    #[test]
    fn test_empty_catalogue() {
        let repo = Repository::load(vec![], Vocabulary::default()).unwrap();
        let catalogue = catalogue(&repo);

        assert!(catalogue.span.is_none());
        assert!(catalogue.types.is_empty());
        assert_eq!(
            format_catalogue(&catalogue),
            "EVENT TYPES\n\nNo events logged.\n"
        );
    }
}
