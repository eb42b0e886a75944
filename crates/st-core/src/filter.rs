//! Query parameters and record selection.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::QueryError;
use crate::event::EventRecord;
use crate::repository::Repository;
use crate::types::{EventType, Metric, SleepConstraint};

/// An inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::InvalidFilterRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day.
    pub const fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which event types a query admits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeSelection {
    #[default]
    All,
    Only(BTreeSet<EventType>),
}

impl TypeSelection {
    pub fn only<I: IntoIterator<Item = EventType>>(types: I) -> Self {
        Self::Only(types.into_iter().collect())
    }

    pub fn allows(&self, event_type: &EventType) -> bool {
        match self {
            Self::All => true,
            Self::Only(types) => types.contains(event_type),
        }
    }
}

/// Parameters of one query. Rebuilt for every recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub range: DateRange,
    pub event_types: TypeSelection,
    pub sleep: SleepConstraint,
    pub metric: Metric,
}

impl FilterParams {
    /// All types, no sleep constraint, counting.
    pub const fn new(range: DateRange) -> Self {
        Self {
            range,
            event_types: TypeSelection::All,
            sleep: SleepConstraint::All,
            metric: Metric::Count,
        }
    }

    #[must_use]
    pub fn with_event_types(mut self, event_types: TypeSelection) -> Self {
        self.event_types = event_types;
        self
    }

    #[must_use]
    pub const fn with_sleep(mut self, sleep: SleepConstraint) -> Self {
        self.sleep = sleep;
        self
    }

    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

/// Selects the records matching `params`, in repository order.
///
/// The sleep constraint is only checked on seizure records; other types
/// have no sleep state and pass it unconditionally.
pub fn filter<'a>(repo: &'a Repository, params: &FilterParams) -> Vec<&'a EventRecord> {
    let vocabulary = repo.vocabulary();
    let selected: Vec<_> = repo
        .all()
        .iter()
        .filter(|r| params.range.contains(r.date()))
        .filter(|r| params.event_types.allows(r.event_type()))
        .filter(|r| {
            !vocabulary.is_seizure(r.event_type()) || params.sleep.matches(r.is_sleep_associated())
        })
        .collect();

    tracing::debug!(
        start = %params.range.start(),
        end = %params.range.end(),
        sleep = %params.sleep,
        matched = selected.len(),
        "filtered events"
    );
    selected
}

/// Seizure records in `params.range` matching the sleep constraint.
///
/// The per-day charts are seizure-only, so the type selection in `params`
/// is ignored here.
pub fn filter_seizures<'a>(repo: &'a Repository, params: &FilterParams) -> Vec<&'a EventRecord> {
    repo.seizures()
        .filter(|r| params.range.contains(r.date()))
        .filter(|r| params.sleep.matches(r.is_sleep_associated()))
        .collect()
}
