//! The in-memory event repository.
//!
//! Built once from the raw log and never mutated afterwards. Every query in
//! the engine borrows it immutably.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{IngestionError, LoadError};
use crate::event::{EventRecord, RawEvent};
use crate::filter::DateRange;
use crate::types::EventType;
use crate::vocabulary::Vocabulary;

/// What to do with a raw row that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
    /// Fail the whole batch on the first bad row.
    #[default]
    Reject,
    /// Drop bad rows, log each one and report them.
    Skip,
}

/// Outcome of a load under [`IngestPolicy::Skip`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records kept.
    pub loaded: usize,
    /// Rows that were dropped, in input order.
    pub skipped: Vec<IngestionError>,
}

/// Immutable, timestamp-ordered set of event records.
#[derive(Debug, Clone)]
pub struct Repository {
    records: Vec<EventRecord>,
    vocabulary: Vocabulary,
}

impl Repository {
    /// Loads a batch, rejecting it on the first invalid row.
    pub fn load(raw: Vec<RawEvent>, vocabulary: Vocabulary) -> Result<Self, LoadError> {
        Self::load_with_policy(raw, vocabulary, IngestPolicy::Reject).map(|(repo, _)| repo)
    }

    /// Loads a batch under an explicit ingestion policy.
    ///
    /// The vocabulary is validated first. Records are then validated and
    /// classified in parallel. The result is sorted by timestamp; rows with
    /// equal timestamps keep input order.
    pub fn load_with_policy(
        raw: Vec<RawEvent>,
        vocabulary: Vocabulary,
        policy: IngestPolicy,
    ) -> Result<(Self, LoadReport), LoadError> {
        vocabulary.validate()?;

        let total = raw.len();
        let parsed: Vec<Result<EventRecord, IngestionError>> = raw
            .into_par_iter()
            .enumerate()
            .map(|(idx, event)| EventRecord::from_raw(event, &vocabulary, idx + 1))
            .collect();

        let mut records = Vec::with_capacity(total);
        let mut report = LoadReport::default();
        for result in parsed {
            match result {
                Ok(record) => records.push(record),
                Err(err) => match policy {
                    IngestPolicy::Reject => return Err(err.into()),
                    IngestPolicy::Skip => {
                        tracing::warn!(row = err.row(), error = %err, "skipping invalid row");
                        report.skipped.push(err);
                    }
                },
            }
        }

        records.sort_by_key(EventRecord::timestamp);
        report.loaded = records.len();

        tracing::debug!(
            total,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded event repository"
        );

        Ok((
            Self {
                records,
                vocabulary,
            },
            report,
        ))
    }

    /// All records in timestamp order.
    pub fn all(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records of one type, in timestamp order.
    pub fn of_type<'a>(
        &'a self,
        event_type: &'a EventType,
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.event_type() == event_type)
    }

    /// Seizure records, in timestamp order.
    pub fn seizures(&self) -> impl Iterator<Item = &EventRecord> {
        self.of_type(&self.vocabulary.seizure_type)
    }

    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per event type, ordered by type label.
    pub fn type_counts(&self) -> BTreeMap<&EventType, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.event_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Sorted, de-duplicated event types present in the log.
    pub fn event_types(&self) -> Vec<&EventType> {
        self.type_counts().into_keys().collect()
    }

    /// Earliest to latest date bucket, or `None` for an empty log.
    pub fn date_span(&self) -> Option<DateRange> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        DateRange::new(first.date(), last.date()).ok()
    }

    /// The vocabulary's default type selection, limited to types present.
    pub fn default_event_types(&self) -> Vec<&EventType> {
        let counts = self.type_counts();
        self.vocabulary
            .default_event_types
            .iter()
            .filter(|t| counts.contains_key(t))
            .collect()
    }
}
