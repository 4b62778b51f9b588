//! CLI argument definitions using clap
//!
//! Commands:
//! - content-schema check [--config <path>] [--content-dir <path>] [--fail-fast]
//! - content-schema validate --collection <name> <file>
//! - content-schema schema [--collection <name>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// content-schema - Strict schema validation for content collections
#[derive(Parser, Debug)]
#[command(name = "content-schema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every entry under the content directory
    Check {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Content directory (overrides the configuration file)
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Stop at the first invalid entry
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a single content file
    Validate {
        /// Collection the file belongs to
        #[arg(long)]
        collection: String,

        /// Markdown file with front matter
        file: PathBuf,
    },

    /// Print the registered schemas as JSON
    Schema {
        /// Only print this collection
        #[arg(long)]
        collection: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
