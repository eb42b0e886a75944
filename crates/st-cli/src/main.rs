use anyhow::{Context, Result};
use clap::Parser;
use st_core::Repository;
use tracing_subscriber::EnvFilter;

use st_cli::commands::{chart, details, markers, types};
use st_cli::loader::load_repository;
use st_cli::{Cli, Commands, Config};

/// Load config and read the event log named by `--input` or `data_path`.
fn open_repository(cli: &Cli) -> Result<Repository> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = cli.input.as_deref().unwrap_or(config.data_path.as_path());
    load_repository(path, &config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Chart(args)) => {
            let repo = open_repository(&cli)?;
            chart::run(&repo, args)?;
        }
        Some(Commands::Details(args)) => {
            let repo = open_repository(&cli)?;
            details::run(&repo, args)?;
        }
        Some(Commands::Markers(args)) => {
            let repo = open_repository(&cli)?;
            markers::run(&repo, args)?;
        }
        Some(Commands::Types { json }) => {
            let repo = open_repository(&cli)?;
            types::run(&repo, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
