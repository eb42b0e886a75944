//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid sleep constraint value.
    #[error("invalid sleep constraint: {value} (expected all, sleep or awake)")]
    InvalidSleepConstraint { value: String },

    /// Invalid aggregation metric value.
    #[error("invalid metric: {value} (expected count or duration)")]
    InvalidMetric { value: String },

    /// Invalid chart mode value.
    #[error("invalid chart mode: {value} (expected scatter, bar-count or bar-duration)")]
    InvalidChartMode { value: String },
}

/// A validated event type label.
///
/// The vocabulary is open: any non-blank label from the log is accepted.
/// Only the configured seizure and marker types carry special meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventType(String);

impl EventType {
    /// Creates a new event type after validation.
    pub fn new(label: impl Into<String>) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "event type",
            });
        }
        Ok(Self(label))
    }

    /// Builds a type from a known non-blank constant.
    pub(crate) fn from_const(label: &str) -> Self {
        debug_assert!(!label.trim().is_empty());
        Self(label.to_string())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which seizure events to keep, by sleep state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepConstraint {
    /// No constraint.
    #[default]
    All,
    /// Only sleep-associated seizures.
    Sleep,
    /// Only seizures not associated with sleep.
    Awake,
}

impl SleepConstraint {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Sleep => "sleep",
            Self::Awake => "awake",
        }
    }

    /// Returns true if a record with the given sleep flag passes.
    #[must_use]
    pub const fn matches(self, sleep_associated: bool) -> bool {
        match self {
            Self::All => true,
            Self::Sleep => sleep_associated,
            Self::Awake => !sleep_associated,
        }
    }
}

impl fmt::Display for SleepConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SleepConstraint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "sleep" => Ok(Self::Sleep),
            "awake" => Ok(Self::Awake),
            _ => Err(ValidationError::InvalidSleepConstraint {
                value: s.to_string(),
            }),
        }
    }
}

/// Per-day statistic computed by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Number of records.
    #[default]
    Count,
    /// Sum of recorded values in seconds.
    #[serde(rename = "duration")]
    DurationSum,
}

impl Metric {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::DurationSum => "duration",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "duration" => Ok(Self::DurationSum),
            _ => Err(ValidationError::InvalidMetric {
                value: s.to_string(),
            }),
        }
    }
}
