//! # Sortline - Waste Sorting Line Simulation
//!
//! The main binary for the Sortline simulation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 apps/sortline (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────┐   │
//! │  │    CLI      │    │ Belt Runner  │    │  Config    │   │
//! │  │   (clap)    │    │   (tokio)    │    │  (toml)    │   │
//! │  └──────┬──────┘    └──────┬───────┘    └─────┬──────┘   │
//! │         └──────────────────┼──────────────────┘          │
//! │                            ▼                             │
//! │                   ┌─────────────────┐                    │
//! │                   │  sortline-core  │                    │
//! │                   │   (THE LOGIC)   │                    │
//! │                   └─────────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run the line until Ctrl-C
//! sortline
//!
//! # Reproducible, fast run of 20 items
//! sortline run --seed 7 --travel-ms 0 --max-items 20
//!
//! # Check the reading distribution
//! sortline sample -n 100000
//! ```

use clap::Parser;
use sortline::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments first so --verbose can shape the log filter.
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr — stdout carries the belt transcript.
///
/// SORTLINE_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("SORTLINE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "sortline=debug,sortline_core=debug"
    } else {
        "sortline=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
