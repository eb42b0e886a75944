//! Logged caregiving events.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::classify::is_sleep_associated;
use crate::error::IngestionError;
use crate::types::EventType;
use crate::vocabulary::Vocabulary;

/// Display format for timestamps in detail rows and text output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive date-time layouts accepted at ingestion, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// One row of the log as read from the source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default, rename = "type")]
    pub event_type: Option<String>,

    /// Recorded value as written in the log.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A validated, immutable event.
///
/// The date bucket and the sleep flag are derived once at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    timestamp: NaiveDateTime,
    event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    recorded_value: Option<String>,
    description: String,
    date: NaiveDate,
    sleep_associated: bool,
}

impl EventRecord {
    /// Validates a raw row and derives its cached fields.
    ///
    /// `row` is the 1-based position of the row, used in errors.
    pub fn from_raw(
        raw: RawEvent,
        vocabulary: &Vocabulary,
        row: usize,
    ) -> Result<Self, IngestionError> {
        let timestamp_text = raw
            .timestamp
            .filter(|t| !t.trim().is_empty())
            .ok_or(IngestionError::MissingTimestamp { row })?;
        let timestamp = parse_timestamp(&timestamp_text).ok_or_else(|| {
            IngestionError::InvalidTimestamp {
                row,
                value: timestamp_text,
            }
        })?;

        let event_type = raw
            .event_type
            .and_then(|t| EventType::new(t).ok())
            .ok_or(IngestionError::MissingEventType { row })?;

        let description = raw.description.unwrap_or_default();
        let sleep_associated = is_sleep_associated(&event_type, &description, vocabulary);

        Ok(Self {
            timestamp,
            date: timestamp.date(),
            event_type,
            recorded_value: raw.value.filter(|v| !v.is_empty()),
            description,
            sleep_associated,
        })
    }

    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub const fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// The recorded value exactly as logged.
    pub fn recorded_value(&self) -> Option<&str> {
        self.recorded_value.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Calendar date of the timestamp.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Always false for non-seizure events.
    pub const fn is_sleep_associated(&self) -> bool {
        self.sleep_associated
    }

    /// The recorded value as seconds, or `None` when it is absent or not
    /// numeric.
    pub fn value_seconds(&self) -> Option<f64> {
        self.recorded_value.as_deref().and_then(coerce_seconds)
    }

    /// Time of day in fractional hours (minutes included, seconds dropped).
    pub fn hour_of_day(&self) -> f64 {
        f64::from(self.timestamp.hour()) + f64::from(self.timestamp.minute()) / 60.0
    }
}

/// Parses a log timestamp into a naive local date-time.
///
/// An explicit UTC offset is accepted and dropped; the wall-clock time is
/// kept so the date bucket matches what was written.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Coerces recorded text to seconds. Non-numeric and non-finite text
/// yields `None`.
pub fn coerce_seconds(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
