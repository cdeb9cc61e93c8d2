//! Command-line argument parsing for pantry.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and the conversion of global flags into configuration overrides.

use clap::{Parser, Subcommand};
use pantry::config::{Config, ConfigValue};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pantry")]
#[command(version)]
#[command(about = "Cooklang recipe highlighting, autocomplete and search", long_about = None)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Color theme (default, mono)
    #[arg(short, long, global = true)]
    pub theme: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a recipe with syntax highlighting
    Highlight {
        file: PathBuf,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// List ingredient and cookware names used in a recipe
    Names {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show completion candidates at a byte offset
    Complete {
        file: PathBuf,

        /// Cursor byte offset
        #[arg(short, long)]
        cursor: usize,

        /// Recipe directory providing known names
        #[arg(short, long)]
        library: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Split a search phrase into ingredient terms
    Query {
        /// Search phrase; quote multi-word names
        #[arg(required = true)]
        phrase: Vec<String>,
    },

    /// Search a recipe directory by title and/or ingredients
    Search {
        #[arg(short, long)]
        library: PathBuf,

        /// Title substring
        #[arg(long)]
        title: Option<String>,

        /// Ingredient terms (same syntax as `query`)
        ingredients: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Edit a recipe interactively
    Edit {
        file: PathBuf,

        #[arg(short, long)]
        library: Option<PathBuf>,
    },
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.set("theme", ConfigValue::String(theme.clone()));
        }
    }

    /// Interactive sessions must keep the screen free of log output
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Edit { .. })
    }
}
