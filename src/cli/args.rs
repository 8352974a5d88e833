//! CLI argument definitions using clap
//!
//! Commands:
//! - cellquery validate --file <payload.json>
//! - cellquery decode --response <response.json> [--metric <id>]
//! - cellquery run --file <payload.json> [--config <api.json>] [--metric <id>] [--skip-validation]
//! - cellquery batch --config <batch.json> [--api-config <api.json>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cellquery - validate, send and flatten aggregate analytics queries
#[derive(Parser, Debug)]
#[command(name = "cellquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a payload file without sending it
    Validate {
        /// Path to the payload JSON
        #[arg(long)]
        file: PathBuf,
    },

    /// Flatten a saved cell set response into records
    Decode {
        /// Path to the response JSON
        #[arg(long)]
        response: PathBuf,

        /// Metric id for the Measures column
        #[arg(long)]
        metric: Option<String>,
    },

    /// Validate, send and decode a single payload
    Run {
        /// Path to the payload JSON
        #[arg(long)]
        file: PathBuf,

        /// API credentials file; falls back to VISIER_* environment variables
        #[arg(long)]
        config: Option<PathBuf>,

        /// Metric id for the Measures column; defaults to the payload's source metric
        #[arg(long)]
        metric: Option<String>,

        /// Send the payload even if validation fails
        #[arg(long)]
        skip_validation: bool,
    },

    /// Run one query per metric and concatenate the rows
    Batch {
        /// Path to the multi-metric config
        #[arg(long)]
        config: PathBuf,

        /// API credentials file; falls back to VISIER_* environment variables
        #[arg(long)]
        api_config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
