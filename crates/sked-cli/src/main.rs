use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sked_cli::commands::{check, run, show};
use sked_cli::{Cli, Commands, Config};

/// Runs the selected subcommand with times interpreted in `tz`.
fn dispatch<Tz: TimeZone>(command: &Commands, config: &Config, tz: Tz) -> Result<()> {
    match command {
        Commands::Run { json, no_clear } => run::run(config, tz, *json, !*no_clear),
        Commands::Show { at, json } => {
            show::run(&mut std::io::stdout().lock(), config, tz, at.as_deref(), *json)
        }
        Commands::Check { json } => check::run(&mut std::io::stdout().lock(), config, tz, *json),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; stdout carries frames
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match config.fixed_offset()? {
        Some(offset) => dispatch(command, &config, offset),
        None => dispatch(command, &config, Local),
    }
}
