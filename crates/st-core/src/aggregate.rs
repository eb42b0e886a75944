//! Per-day aggregation of seizure events.
//!
//! Records are grouped by date bucket, optionally split by sleep state.
//! Only dates with at least one record produce a bucket; gaps are left to
//! the consumer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::EventRecord;
use crate::types::Metric;

/// The value of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    /// Summed seconds of the numeric recorded values.
    Seconds(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Seconds(s) => write!(f, "{s}"),
        }
    }
}

/// One row of aggregation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationBucket {
    pub date: NaiveDate,

    /// Present only when the aggregation is split by sleep state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_associated: Option<bool>,

    pub value: MetricValue,
}

#[derive(Debug, Default)]
struct Group {
    count: u64,
    seconds: f64,
}

/// Aggregates records into per-day buckets.
///
/// With [`Metric::Count`] every record counts, numeric value or not. With
/// [`Metric::DurationSum`] only values that coerce to a number are summed;
/// a group with none of them still yields a bucket valued `0`.
///
/// Output is ordered by date, then awake before sleep.
pub fn aggregate<'a, I>(
    events: I,
    metric: Metric,
    partition_by_sleep: bool,
) -> Vec<AggregationBucket>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    // `None < Some(false) < Some(true)` gives the required ordering.
    let mut groups: BTreeMap<(NaiveDate, Option<bool>), Group> = BTreeMap::new();

    for event in events {
        let key = (
            event.date(),
            partition_by_sleep.then_some(event.is_sleep_associated()),
        );
        let group = groups.entry(key).or_default();
        group.count += 1;
        if let Some(seconds) = event.value_seconds() {
            group.seconds += seconds;
        }
    }

    groups
        .into_iter()
        .map(|((date, sleep_associated), group)| AggregationBucket {
            date,
            sleep_associated,
            value: match metric {
                Metric::Count => MetricValue::Count(group.count),
                Metric::DurationSum => MetricValue::Seconds(group.seconds),
            },
        })
        .collect()
}
