//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// FairSplit - optimized cost sharing calculator
#[derive(Debug, Parser)]
#[command(name = "fairsplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute balances and settlements from a JSON document
    File {
        /// Path to JSON input file
        #[arg(long, short)]
        input: PathBuf,

        /// Only print balances, skip the settlement optimizer
        #[arg(long)]
        no_optimize: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Collect people and expenses interactively
    Wizard {
        /// Also write the collected data to a JSON document
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
