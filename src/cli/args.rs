//! CLI argument definitions using clap
//!
//! Commands:
//! - scholaris init --config <path>
//! - scholaris serve --config <path> [--port <port>]
//! - scholaris predict --config <path>
//! - scholaris validate --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scholaris - student enrollment outcome prediction service
#[derive(Parser, Debug)]
#[command(name = "scholaris")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config if missing and create the account store
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./scholaris.json")]
        config: PathBuf,
    },

    /// Load the model and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./scholaris.json")]
        config: PathBuf,

        /// Overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Predict the outcome of one JSON record read from stdin
    Predict {
        /// Path to configuration file
        #[arg(long, default_value = "./scholaris.json")]
        config: PathBuf,
    },

    /// Run the advisory checks on one JSON record read from stdin
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./scholaris.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
