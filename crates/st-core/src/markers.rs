//! Overlay markers for annotation events.

use chrono::NaiveDate;
use serde::Serialize;

use crate::filter::DateRange;
use crate::repository::Repository;
use crate::types::EventType;

/// One overlay mark, drawn at the chart baseline on its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerPoint {
    pub date: NaiveDate,
    pub marker_type: EventType,
    pub label: String,
    /// Hover text, copied from the record.
    pub description: String,
}

/// Points for every record of `marker_type` dated within `range`.
///
/// Several markers on one date each get their own point.
pub fn locate_markers(
    repo: &Repository,
    marker_type: &EventType,
    range: DateRange,
) -> Vec<MarkerPoint> {
    let label = repo
        .vocabulary()
        .marker(marker_type)
        .map_or_else(|| marker_type.to_string(), |m| m.display_label().to_string());

    repo.of_type(marker_type)
        .filter(|r| range.contains(r.date()))
        .map(|r| MarkerPoint {
            date: r.date(),
            marker_type: marker_type.clone(),
            label: label.clone(),
            description: r.description().to_string(),
        })
        .collect()
}

/// Points for all configured marker types, grouped by type in
/// configuration order.
pub fn locate_all_markers(repo: &Repository, range: DateRange) -> Vec<MarkerPoint> {
    repo.vocabulary()
        .markers
        .iter()
        .flat_map(|m| locate_markers(repo, &m.event_type, range))
        .collect()
}
