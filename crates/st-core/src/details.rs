//! Drill-down from a selected day to its raw seizure records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::{EventRecord, TIMESTAMP_FORMAT};
use crate::filter::FilterParams;
use crate::repository::Repository;

/// Seizure records on `date` that match the sleep constraint of `params`,
/// in timestamp order.
///
/// A date without matching records yields an empty list.
pub fn resolve_details<'a>(
    repo: &'a Repository,
    date: NaiveDate,
    params: &FilterParams,
) -> Vec<&'a EventRecord> {
    repo.seizures()
        .filter(|r| r.date() == date)
        .filter(|r| params.sleep.matches(r.is_sleep_associated()))
        .collect()
}

/// One row of the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// The value as logged, numeric or not.
    pub recorded_value: Option<String>,
    pub description: String,
}

impl From<&EventRecord> for DetailRow {
    fn from(record: &EventRecord) -> Self {
        Self {
            timestamp: record.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            recorded_value: record.recorded_value().map(String::from),
            description: record.description().to_string(),
        }
    }
}

/// State of the detail view.
///
/// "Nothing selected yet" and "a day with no matching records" are different
/// states and render differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DrillDown {
    NoSelection,
    Day { date: NaiveDate, rows: Vec<DetailRow> },
}

impl DrillDown {
    /// Resolves an optional selection against the active filters.
    pub fn resolve(
        repo: &Repository,
        selection: Option<NaiveDate>,
        params: &FilterParams,
    ) -> Self {
        match selection {
            None => Self::NoSelection,
            Some(date) => Self::Day {
                date,
                rows: resolve_details(repo, date, params)
                    .into_iter()
                    .map(DetailRow::from)
                    .collect(),
            },
        }
    }

    /// Heading for the detail table; empty when nothing is selected.
    pub fn title(&self) -> String {
        match self {
            Self::NoSelection => String::new(),
            Self::Day { date, .. } => format!("{date} seizure details"),
        }
    }

    pub fn rows(&self) -> &[DetailRow] {
        match self {
            Self::NoSelection => &[],
            Self::Day { rows, .. } => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawEvent;
    use crate::filter::DateRange;
    use crate::types::SleepConstraint;
    use crate::vocabulary::Vocabulary;

    fn raw(timestamp: &str, event_type: &str, value: &str, description: &str) -> RawEvent {
        RawEvent {
            timestamp: Some(timestamp.to_string()),
            event_type: Some(event_type.to_string()),
            value: Some(value.to_string()),
            description: Some(description.to_string()),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_repo() -> Repository {
        Repository::load(
            vec![
                raw("2024-01-01 18:00", "癲癇", "x", "吃飯時"),
                raw("2024-01-01 03:00", "癲癇", "30", "夜間"),
                raw("2024-01-01 07:00", "起床", "", ""),
                raw("2024-01-02 10:00", "癲癇", "20", "玩耍"),
            ],
            Vocabulary::default(),
        )
        .unwrap()
    }

    fn params(sleep: SleepConstraint) -> FilterParams {
        FilterParams::new(DateRange::day(date(2024, 1, 1))).with_sleep(sleep)
    }

    #[test]
    fn resolves_seizures_of_the_day_in_order() {
        let repo = sample_repo();
        let records = resolve_details(&repo, date(2024, 1, 1), &params(SleepConstraint::All));
        let descriptions: Vec<_> = records.iter().map(|r| r.description()).collect();
        assert_eq!(descriptions, vec!["夜間", "吃飯時"]);
    }

    #[test]
    fn honours_sleep_constraint() {
        let repo = sample_repo();
        let records = resolve_details(&repo, date(2024, 1, 1), &params(SleepConstraint::Awake));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description(), "吃飯時");
    }

    #[test]
    fn no_selection_differs_from_empty_day() {
        let repo = sample_repo();
        let none = DrillDown::resolve(&repo, None, &params(SleepConstraint::All));
        let empty = DrillDown::resolve(&repo, Some(date(2030, 1, 1)), &params(SleepConstraint::All));

        assert_eq!(none, DrillDown::NoSelection);
        assert_eq!(none.title(), "");
        assert!(none.rows().is_empty());

        assert_ne!(none, empty);
        assert_eq!(empty.title(), "2030-01-01 seizure details");
        assert!(empty.rows().is_empty());
    }

    #[test]
    fn rows_carry_raw_text() {
        let repo = sample_repo();
        let view = DrillDown::resolve(&repo, Some(date(2024, 1, 1)), &params(SleepConstraint::All));
        assert_eq!(
            view.rows(),
            &[
                DetailRow {
                    timestamp: "2024-01-01 03:00:00".to_string(),
                    recorded_value: Some("30".to_string()),
                    description: "夜間".to_string(),
                },
                DetailRow {
                    timestamp: "2024-01-01 18:00:00".to_string(),
                    recorded_value: Some("x".to_string()),
                    description: "吃飯時".to_string(),
                },
            ]
        );
    }

    #[test]
    fn drill_down_serializes_with_state_tag() {
        let json = serde_json::to_string(&DrillDown::NoSelection).unwrap();
        assert_eq!(json, r#"{"state":"no_selection"}"#);
    }

    #[test]
    fn day_view_json() {
        let repo = sample_repo();
        let view = DrillDown::resolve(&repo, Some(date(2024, 1, 2)), &params(SleepConstraint::All));

        insta::assert_snapshot!(serde_json::to_string_pretty(&view).unwrap(), @r#"
        {
          "state": "day",
          "date": "2024-01-02",
          "rows": [
            {
              "timestamp": "2024-01-02 10:00:00",
              "recorded_value": "20",
              "description": "玩耍"
            }
          ]
        }
        "#);
    }
}
