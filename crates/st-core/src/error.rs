//! Engine error types.
//!
//! Only malformed input and caller contract violations are errors. A value
//! that does not coerce to a number and a query with no matches are normal
//! outcomes and never show up here.

use chrono::NaiveDate;
use thiserror::Error;

/// A raw record could not be turned into an [`EventRecord`](crate::EventRecord).
///
/// Rows are 1-based positions in the input batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestionError {
    #[error("row {row}: missing timestamp")]
    MissingTimestamp { row: usize },

    #[error("row {row}: invalid timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: missing event type")]
    MissingEventType { row: usize },
}

impl IngestionError {
    /// The input row the error refers to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::MissingTimestamp { row }
            | Self::InvalidTimestamp { row, .. }
            | Self::MissingEventType { row } => *row,
        }
    }
}

/// A query was built with parameters that violate its contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidFilterRange { start: NaiveDate, end: NaiveDate },
}

/// The configured vocabulary is unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("sleep keywords cannot contain an empty string")]
    EmptyKeyword,

    #[error("marker type {0} is listed more than once")]
    DuplicateMarker(String),

    #[error("marker type {0} cannot also be the seizure type")]
    MarkerIsSeizureType(String),
}

/// A batch could not be loaded into a [`Repository`](crate::Repository).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),

    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}
