//! CLI module for Scholaris
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the account store
//! - serve: Load the model and serve the HTTP API
//! - predict: One-shot assessment of a record on stdin
//! - validate: One-shot advisory checks of a record on stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, predict, run, run_command, serve, validate};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_record, read_record, write_error, write_response};
