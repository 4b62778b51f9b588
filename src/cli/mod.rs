//! CLI module for content-schema
//!
//! Provides command-line interface for:
//! - check: validate a whole content directory
//! - validate: validate one file
//! - schema: export the registered schemas

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run_command, schema, validate};
pub use config::ContentConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
