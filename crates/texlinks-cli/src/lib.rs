//! texlinks CLI - LaTeX hyperlink macros for source declarations
//!
//! Argument parsing, config layering, logging setup and summaries live here;
//! the generation itself is done by `texlinks-core`.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use crate::utils::initialize_logging;
use cli::{Cli, Commands};

/// Execute the texlinks CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging setup or the selected command fails. Errors
/// carry a category that `error::exit_code_from_error` turns into an exit code.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Generate(args) => commands::generate(args, config, cli.quiet),
        Commands::Scan(args) => commands::scan_file(args, config),
        Commands::Config { format } => commands::show_config(config, *format),
        Commands::Completions { shell } => {
            commands::generate_completions(*shell);
            Ok(())
        },
    }
}
