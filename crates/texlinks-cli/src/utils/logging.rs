//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber and color control based on CLI flags and
//! environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Log level for the given flags.
///
/// Machine-readable output drops to ERROR unless `--verbose` asked for more,
/// so JSON on stdout is not interleaved with warnings a script has to filter.
pub fn log_level(cli: &Cli) -> Level {
    let machine_output = cli.command.format().is_some_and(|f| f.is_machine());
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    let machine_output = cli.command.format().is_some_and(|f| f.is_machine());
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn level_for(args: &[&str]) -> Level {
        let cli = Cli::try_parse_from(args).unwrap();
        log_level(&cli)
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(level_for(&["texlinks", "generate"]), Level::WARN);
        assert_eq!(level_for(&["texlinks", "-v", "generate"]), Level::DEBUG);
        assert_eq!(level_for(&["texlinks", "-q", "generate"]), Level::ERROR);
        assert_eq!(
            level_for(&["texlinks", "generate", "--format", "json"]),
            Level::ERROR
        );
        assert_eq!(
            level_for(&["texlinks", "-v", "scan", "a.lean", "--format", "json"]),
            Level::DEBUG
        );
        assert_eq!(level_for(&["texlinks", "completions", "bash"]), Level::WARN);
    }
}
