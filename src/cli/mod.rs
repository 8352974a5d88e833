//! CLI module for cellquery
//!
//! Provides command-line interface for:
//! - validate: Check a payload file offline
//! - decode: Flatten a saved response
//! - run: Send one payload and flatten the response
//! - batch: Run a multi-metric config

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, decode_file, run, run_command, run_file, run_query, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json_file, write_error, write_response};
