//! Command-line argument parsing for Cellar Dump
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cellar Dump - export your CellarTracker tables to CSV
#[derive(Parser, Debug)]
#[command(
    name = "cellar_dump",
    version,
    about = "Export CellarTracker tables to local CSV files",
    long_about = "Logs in to CellarTracker with credentials kept in the OS keychain and saves
every exportable table (inventory, notes, purchases, ...) as a CSV file."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prompt for CellarTracker credentials and store them in the OS keychain
    Login,

    /// Remove stored credentials
    Logout,

    /// Download every table into an existing directory
    Dump(DumpArgs),
}

/// Arguments for the dump command
#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// Output directory (must already exist)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Print every parsed row while validating
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from verbosity flags, `None` to defer to config
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl DumpArgs {
    /// Output directory with a leading `~` expanded
    pub fn output_dir(&self) -> PathBuf {
        match self.output.strip_prefix("~") {
            Ok(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| self.output.clone()),
            Err(_) => self.output.clone(),
        }
    }
}
