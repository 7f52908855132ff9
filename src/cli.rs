//! CLI definitions for statuswatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// statuswatch CLI.
#[derive(Parser)]
#[command(name = "statuswatch")]
#[command(about = "Health endpoint monitor with up/down alerts")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (TOML, or JSON when it ends in .json)
    #[arg(
        short,
        long,
        default_value = "config/default.toml",
        env = "STATUSWATCH_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Poll the health endpoint forever (default)
    Run,

    /// Probe the health endpoint once and print the status
    Check,

    /// Validate the configuration file
    Validate,
}
