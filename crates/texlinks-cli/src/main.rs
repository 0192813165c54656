//! texlinks CLI - LaTeX hyperlink macros for source declarations
//!
//! Thin entry point; everything else lives in the library so integration
//! tests and the binary share one code path.

use std::process::ExitCode;

use colored::Colorize;
use texlinks_cli::error::exit_code_from_error;

fn main() -> ExitCode {
    match texlinks_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
