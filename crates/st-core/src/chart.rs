//! Chart queries.
//!
//! One entry point for the three views of the log: every event as a point
//! by time of day, per-day seizure counts, and per-day seizure durations.
//! The bar views carry the marker overlay.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::aggregate::{AggregationBucket, aggregate};
use crate::details::DrillDown;
use crate::event::EventRecord;
use crate::filter::{FilterParams, filter, filter_seizures};
use crate::markers::{MarkerPoint, locate_all_markers};
use crate::repository::Repository;
use crate::types::{EventType, Metric, ValidationError};

/// Which view to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartMode {
    /// Every filtered event, by date and time of day.
    Scatter,
    /// Seizures per day.
    #[default]
    BarCount,
    /// Summed seizure seconds per day.
    BarDuration,
}

impl ChartMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::BarCount => "bar-count",
            Self::BarDuration => "bar-duration",
        }
    }

    /// The aggregation metric of a bar view.
    pub const fn metric(self) -> Option<Metric> {
        match self {
            Self::Scatter => None,
            Self::BarCount => Some(Metric::Count),
            Self::BarDuration => Some(Metric::DurationSum),
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChartMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scatter" => Ok(Self::Scatter),
            "bar-count" => Ok(Self::BarCount),
            "bar-duration" => Ok(Self::BarDuration),
            _ => Err(ValidationError::InvalidChartMode {
                value: s.to_string(),
            }),
        }
    }
}

/// A chart query: view, filters, and whether bars split by sleep state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartQuery {
    pub mode: ChartMode,
    pub params: FilterParams,
    pub split_sleep: bool,
}

impl ChartQuery {
    /// Builds a query. For bar views the metric in `params` follows the mode.
    pub fn new(mode: ChartMode, params: FilterParams, split_sleep: bool) -> Self {
        let params = match mode.metric() {
            Some(metric) => params.with_metric(metric),
            None => params,
        };
        Self {
            mode,
            params,
            split_sleep,
        }
    }
}

/// One event of the scatter view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    /// Hour plus minutes as a fraction.
    pub hour_of_day: f64,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_value: Option<String>,
    pub description: String,
}

impl From<&EventRecord> for ScatterPoint {
    fn from(record: &EventRecord) -> Self {
        Self {
            timestamp: record.timestamp(),
            date: record.date(),
            hour_of_day: record.hour_of_day(),
            event_type: record.event_type().clone(),
            recorded_value: record.recorded_value().map(String::from),
            description: record.description().to_string(),
        }
    }
}

/// Computed chart data, ready for a renderer.
///
/// Serialized with a `kind` tag of `scatter` or `bars`; the bar metric is
/// carried in `metric`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Chart {
    Scatter {
        points: Vec<ScatterPoint>,
    },
    Bars {
        metric: Metric,
        buckets: Vec<AggregationBucket>,
        markers: Vec<MarkerPoint>,
    },
}

/// Computes the chart for `query`.
pub fn build_chart(repo: &Repository, query: &ChartQuery) -> Chart {
    let params = &query.params;
    match query.mode {
        ChartMode::Scatter => Chart::Scatter {
            points: filter(repo, params)
                .into_iter()
                .map(ScatterPoint::from)
                .collect(),
        },
        ChartMode::BarCount | ChartMode::BarDuration => {
            let seizures = filter_seizures(repo, params);
            let buckets = aggregate(seizures, params.metric, query.split_sleep);
            let markers = locate_all_markers(repo, params.range);
            tracing::debug!(
                mode = %query.mode,
                buckets = buckets.len(),
                markers = markers.len(),
                "built bar chart"
            );
            Chart::Bars {
                metric: params.metric,
                buckets,
                markers,
            }
        }
    }
}

/// Resolves a selected day for the detail table.
///
/// Only bar views support selection; the scatter view always yields
/// [`DrillDown::NoSelection`].
pub fn drill_down(
    repo: &Repository,
    query: &ChartQuery,
    selection: Option<NaiveDate>,
) -> DrillDown {
    match query.mode {
        ChartMode::Scatter => DrillDown::NoSelection,
        ChartMode::BarCount | ChartMode::BarDuration => {
            DrillDown::resolve(repo, selection, &query.params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MetricValue;
    use crate::event::RawEvent;
    use crate::filter::{DateRange, TypeSelection};
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
                raw("2024-01-01 03:00", "癲癇", "30", "夜間睡覺中"),
                raw("2024-01-01 07:30", "起床", "", ""),
                raw("2024-01-01 08:00", "S101", "", "新藥"),
                raw("2024-01-01 14:00", "癲癇", "45", "午睡"),
                raw("2024-01-01 18:00", "癲癇", "大約半分鐘", "吃飯時"),
                raw("2024-01-02 10:00", "癲癇", "20", "玩耍"),
                raw("2024-01-03 09:00", "藥量調整", "", "加量"),
            ],
            Vocabulary::default(),
        )
        .unwrap()
    }

    fn first_two_days() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap()
    }

    #[test]
    fn chart_mode_from_str() {
        assert_eq!("scatter".parse::<ChartMode>().unwrap(), ChartMode::Scatter);
        assert_eq!(
            "bar-duration".parse::<ChartMode>().unwrap(),
            ChartMode::BarDuration
        );
        assert!("pie".parse::<ChartMode>().is_err());
    }

    #[test]
    fn query_metric_follows_bar_mode() {
        let params = FilterParams::new(first_two_days());
        let query = ChartQuery::new(ChartMode::BarDuration, params, false);
        assert_eq!(query.params.metric, Metric::DurationSum);
    }

    #[test]
    fn bar_duration_chart_with_markers() {
        let repo = sample_repo();
        let query = ChartQuery::new(
            ChartMode::BarDuration,
            FilterParams::new(first_two_days()),
            true,
        );

        let Chart::Bars {
            metric,
            buckets,
            markers,
        } = build_chart(&repo, &query)
        else {
            panic!("expected bars");
        };

        assert_eq!(metric, Metric::DurationSum);
        let values: Vec<_> = buckets
            .iter()
            .map(|b| (b.date, b.sleep_associated, b.value))
            .collect();
        assert_eq!(
            values,
            vec![
                (date(2024, 1, 1), Some(false), MetricValue::Seconds(0.0)),
                (date(2024, 1, 1), Some(true), MetricValue::Seconds(75.0)),
                (date(2024, 1, 2), Some(false), MetricValue::Seconds(20.0)),
            ]
        );
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].description, "新藥");
    }

    #[test]
    fn bar_chart_ignores_type_selection_and_applies_sleep_filter() {
        let repo = sample_repo();
        let params = FilterParams::new(first_two_days())
            .with_event_types(TypeSelection::only([EventType::new("起床").unwrap()]))
            .with_sleep(SleepConstraint::Sleep);
        let query = ChartQuery::new(ChartMode::BarCount, params, false);

        let Chart::Bars { buckets, .. } = build_chart(&repo, &query) else {
            panic!("expected bars");
        };
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].value, MetricValue::Count(2));
    }

    #[test]
    fn scatter_chart_uses_type_selection() {
        let repo = sample_repo();
        let params = FilterParams::new(repo.date_span().unwrap()).with_event_types(
            TypeSelection::only(repo.default_event_types().into_iter().cloned()),
        );
        let query = ChartQuery::new(ChartMode::Scatter, params, false);

        let Chart::Scatter { points } = build_chart(&repo, &query) else {
            panic!("expected scatter");
        };
        let types: Vec<_> = points.iter().map(|p| p.event_type.as_str()).collect();
        assert_eq!(types, vec!["癲癇", "起床", "癲癇", "癲癇", "癲癇"]);
        assert!((points[1].hour_of_day - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn drill_down_only_for_bar_modes() {
        let repo = sample_repo();
        let params = FilterParams::new(first_two_days());

        let scatter = ChartQuery::new(ChartMode::Scatter, params.clone(), false);
        assert_eq!(
            drill_down(&repo, &scatter, Some(date(2024, 1, 1))),
            DrillDown::NoSelection
        );

        let bars = ChartQuery::new(ChartMode::BarCount, params, true);
        let view = drill_down(&repo, &bars, Some(date(2024, 1, 1)));
        assert_eq!(view.rows().len(), 3);
        assert_eq!(view.title(), "2024-01-01 seizure details");
    }

    #[test]
    fn chart_serializes_with_kind_tag() {
        let chart = Chart::Bars {
            metric: Metric::DurationSum,
            buckets: vec![],
            markers: vec![],
        };
        let json = serde_json::to_string(&chart).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"bars","metric":"duration","buckets":[],"markers":[]}"#
        );

        let json = serde_json::to_value(Chart::Scatter { points: vec![] }).unwrap();
        assert_eq!(json["kind"], "scatter");
        assert!(json.get("mode").is_none());
    }
}
