//! Core engine for the seizure event log.
//!
//! This crate contains the pure, side-effect-free logic for:
//! - Ingestion: validating raw rows into an immutable [`Repository`]
//! - Sleep classification of seizure events from their descriptions
//! - Filtering by date range, event type and sleep state
//! - Per-day aggregation (counts or summed durations)
//! - Marker overlays and drill-down from a selected day

mod aggregate;
pub mod chart;
mod classify;
mod details;
mod error;
pub mod event;
mod filter;
mod markers;
mod repository;
pub mod types;
pub mod vocabulary;

pub use aggregate::{AggregationBucket, MetricValue, aggregate};
pub use chart::{Chart, ChartMode, ChartQuery, ScatterPoint, build_chart, drill_down};
pub use classify::is_sleep_associated;
pub use details::{DetailRow, DrillDown, resolve_details};
pub use error::{IngestionError, LoadError, QueryError, VocabularyError};
pub use event::{EventRecord, RawEvent};
pub use filter::{DateRange, FilterParams, TypeSelection, filter, filter_seizures};
pub use markers::{MarkerPoint, locate_all_markers, locate_markers};
pub use repository::{IngestPolicy, LoadReport, Repository};
pub use types::{EventType, Metric, SleepConstraint, ValidationError};
pub use vocabulary::{MarkerSpec, Vocabulary};
