use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use navi_cli::commands::{calendar, check, session, util};
use navi_cli::{Cli, Commands, Config};
use navi_core::AvailabilityStore;

/// Load config and build an empty store governed by its policy.
fn open_store(config_path: Option<&Path>) -> Result<(AvailabilityStore, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let policy = config.policy().context("invalid availability policy")?;
    Ok((AvailabilityStore::new(policy), config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let today: NaiveDate = util::resolve_today(cli.today.as_deref())?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Check { date }) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            let date = util::parse_date(date, today)?;
            check::run(&mut stdout, &store, date, today)?;
        }
        Some(Commands::Calendar { json }) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            calendar::run(&mut stdout, &store, today, *json)?;
        }
        Some(Commands::Session { script, json }) => {
            let (store, config) = open_store(cli.config.as_deref())?;
            let mut state = session::Session::new(store, today, config.upcoming_limit);
            match script {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    session::run(BufReader::new(file), &mut stdout, &mut state, *json)?;
                }
                None => session::run(io::stdin().lock(), &mut stdout, &mut state, *json)?,
            }
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
