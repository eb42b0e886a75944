//! Shared helpers for query commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use st_core::{DateRange, EventType, Repository, TypeSelection};

/// Resolves the query date range.
///
/// A missing bound falls back to the repository's date span, widened so the
/// given bound stays inside the range. Only an explicit `from` after an
/// explicit `to` is an error. Returns `None` when neither bound is given and
/// the log is empty.
pub fn resolve_range(
    repo: &Repository,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<DateRange>> {
    let span = repo.date_span();

    let range = match (from, to) {
        (Some(start), Some(end)) => DateRange::new(start, end)?,
        (Some(start), None) => {
            let end = span.map_or(start, |s| s.end().max(start));
            DateRange::new(start, end)?
        }
        (None, Some(end)) => {
            let start = span.map_or(end, |s| s.start().min(end));
            DateRange::new(start, end)?
        }
        (None, None) => return Ok(span),
    };
    Ok(Some(range))
}

/// Builds the type selection from `--type` arguments.
///
/// Without arguments the vocabulary's default types present in the log are
/// selected, or every type when none of them is present.
pub fn type_selection(repo: &Repository, requested: &[String]) -> Result<TypeSelection> {
    if requested.is_empty() {
        let defaults = repo.default_event_types();
        if defaults.is_empty() {
            return Ok(TypeSelection::All);
        }
        return Ok(TypeSelection::only(defaults.into_iter().cloned()));
    }

    let types = requested
        .iter()
        .map(|t| EventType::new(t.as_str()).with_context(|| format!("invalid event type {t:?}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeSelection::only(types))
}

/// Formats a range as `start .. end`, or the single date.
pub fn format_range(range: DateRange) -> String {
    if range.start() == range.end() {
        range.start().to_string()
    } else {
        format!("{} .. {}", range.start(), range.end())
    }
}
