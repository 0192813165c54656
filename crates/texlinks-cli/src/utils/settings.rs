//! Config file resolution.
//!
//! Precedence, lowest first: built-in defaults, the config file, command-line
//! flags. The config file is the one named by `--config`/`TEXLINKS_CONFIG`,
//! otherwise `texlinks.toml` in the working directory if it exists.

use std::path::{Path, PathBuf};

use anyhow::Result;
use texlinks_core::GeneratorConfig;
use tracing::debug;

use crate::error::CliError;

/// Configuration before command-line flags are applied.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GeneratorConfig,
    /// File the values came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

/// Resolve the config file and load it.
///
/// An explicit path must exist; a missing discovered file just means defaults.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => GeneratorConfig::discover(&std::env::current_dir()?),
    };

    let Some(path) = path else {
        debug!("no config file, using defaults");
        return Ok(LoadedConfig {
            config: GeneratorConfig::default(),
            source: None,
        });
    };

    debug!(path = %path.display(), "loading config file");
    let config = GeneratorConfig::load(&path).map_err(CliError::from)?;
    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::exit_code_from_error;
    use texlinks_core::ScanMode;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alt.toml");
        std::fs::write(&path, "mode = \"namespace-aware\"\n").unwrap();

        let loaded = load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.config.mode, ScanMode::NamespaceAware);
        assert_eq!(loaded.source, Some(path));
    }

    #[test]
    fn test_missing_explicit_file_is_usage_error() {
        let dir = tempdir().unwrap();
        let err = load(Some(dir.path().join("missing.toml").as_path())).unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
    }

    #[test]
    fn test_invalid_file_is_usage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "mode = \"sideways\"\n").unwrap();

        let err = load(Some(path.as_path())).unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
        assert!(err.to_string().contains("bad.toml"));
    }
}
