//! Seizure log CLI library.
//!
//! This crate provides the command-line interface over the `st-core` engine:
//! configuration, log readers and the subcommands.

mod cli;
pub mod commands;
mod config;
pub mod loader;

pub use cli::{Cli, Commands};
pub use config::{Columns, Config};
