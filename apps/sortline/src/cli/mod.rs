//! # Sortline CLI Module
//!
//! This module implements the CLI interface for Sortline.
//!
//! ## Available Commands
//!
//! - `run` - Run the sorting line until Ctrl-C (default)
//! - `sample` - Tally many readings without the belt delay
//! - `table` - Show the signature table
//! - `stages` - Show the stage list

mod commands;

use clap::{Parser, Subcommand};
use sortline_core::SortlineError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Sortline - multi-stage waste sorting simulation
///
/// Items arrive on a conveyor belt, an infrared scan identifies their
/// material, and a row of air guns diverts each one to its bin.
#[derive(Parser, Debug)]
#[command(name = "sortline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Plant configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (table, stages, sample)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sorting line until interrupted
    Run {
        /// RNG seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Belt travel time between items, in milliseconds
        #[arg(short = 't', long)]
        travel_ms: Option<u64>,

        /// Stop after this many items
        #[arg(short = 'n', long)]
        max_items: Option<u64>,
    },

    /// Tally many readings and where they end up
    Sample {
        /// Number of readings to draw
        #[arg(short = 'n', long, default_value = "10000")]
        count: u64,

        /// RNG seed for reproducible tallies
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show the signature table
    Table,

    /// Show the sorting stages in belt order
    Stages,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), SortlineError> {
    let plant = load_plant(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run {
            seed,
            travel_ms,
            max_items,
        }) => cmd_run(plant, seed, travel_ms, max_items).await,
        Some(Commands::Sample { count, seed }) => cmd_sample(&plant, json_mode, count, seed),
        Some(Commands::Table) => cmd_table(&plant, json_mode),
        Some(Commands::Stages) => cmd_stages(&plant, json_mode),
        None => {
            // No subcommand - run the line with the plant defaults
            cmd_run(plant, None, None, None).await
        }
    }
}
