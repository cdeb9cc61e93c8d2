//! pantry - Cooklang recipe highlighting, autocomplete and search
//!
//! This is the main entry point. It parses CLI arguments, sets up logging
//! and configuration, and delegates to the command runners.

mod cli;
mod run;

use std::fs::File;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use pantry::config::Config;
use pantry::user_config;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // Load configuration, then apply CLI overrides
    let mut config = Config::default();
    user_config::configure(&mut config);
    cli.apply_to_config(&mut config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Highlight { file, json } => {
            let theme = run::theme_from_config(&config)?;
            run::run_highlight(file, *json, &theme, &mut out)
                .with_context(|| format!("Failed to highlight {}", file.display()))?;
        }
        Commands::Names { file, json } => {
            run::run_names(file, *json, &mut out)
                .with_context(|| format!("Failed to read names from {}", file.display()))?;
        }
        Commands::Complete {
            file,
            cursor,
            library,
            json,
        } => {
            run::run_complete(file, *cursor, library.as_deref(), *json, &mut out)
                .with_context(|| format!("Failed to complete in {}", file.display()))?;
        }
        Commands::Query { phrase } => {
            run::run_query(phrase, &mut out)?;
        }
        Commands::Search {
            library,
            title,
            ingredients,
            json,
        } => {
            run::run_search(library, title.as_deref(), ingredients, *json, &mut out)
                .with_context(|| format!("Failed to search {}", library.display()))?;
        }
        Commands::Edit { file, library } => {
            drop(out);
            run::run_editor(file, library.as_deref(), &config)
                .with_context(|| format!("Failed to edit {}", file.display()))?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// Default level is `warn` (`debug` with `--verbose`); `RUST_LOG` wins over
/// both. The interactive editor only logs when `--log-file` is given.
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if cli.is_interactive() => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
