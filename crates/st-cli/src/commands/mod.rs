//! CLI subcommand implementations.

pub mod chart;
pub mod details;
pub mod markers;
pub mod types;
pub mod util;
