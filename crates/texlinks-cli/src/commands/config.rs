//! `texlinks config`: print the effective configuration

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::error::CliError;
use crate::output::{OutputFormat, write_json};
use crate::utils::settings::{self, LoadedConfig};

fn write_config<W: Write>(writer: &mut W, loaded: &LoadedConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(
            writer,
            &json!({
                "source": loaded.source,
                "config": loaded.config,
            }),
        ),
        OutputFormat::Text => {
            match &loaded.source {
                Some(path) => writeln!(writer, "# Loaded from {}", path.display())?,
                None => writeln!(writer, "# Built-in defaults")?,
            }
            let toml = loaded.config.to_toml_string().map_err(CliError::from)?;
            write!(writer, "{toml}")?;
            Ok(())
        },
    }
}

/// Execute the config command
pub fn execute(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let loaded = settings::load(config_path)?;
    write_config(&mut io::stdout().lock(), &loaded, format)
}
