//! `fairsplit-cli`: the `fairsplit` command over JSON documents and the interactive wizard.

pub mod cli;
pub mod commands;
pub mod render;
pub mod wizard;

use std::io::{BufRead, Write};

use fairsplit_infra::AppConfig;

pub use cli::{Cli, Command, OutputFormat};
pub use commands::Report;

/// Dispatch a parsed command line.
pub fn run<R: BufRead, W: Write>(
    cli: Cli,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    match cli.command {
        Command::File {
            input: path,
            no_optimize,
            format,
        } => commands::run_file(&path, no_optimize, format, config, out),
        Command::Wizard { save } => commands::run_wizard(save.as_deref(), config, input, out),
    }
}
