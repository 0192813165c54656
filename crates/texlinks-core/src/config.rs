//! Configuration for a generation run.
//!
//! A [`GeneratorConfig`] is passed explicitly into the traversal entry point;
//! nothing is read from module-level state. The defaults match the
//! CertifyingDatalog project layout, so that repository needs no config file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! root = "CertifyingDatalog"
//! output = "codeCommands.tex"
//! extensions = [".lean"]
//! exclude = [".lake", "lake-packages"]
//! mode = "namespace-aware"
//! on_error = "keep-going"
//!
//! [links]
//! repo_url = "https://github.com/knowsys/CertifyingDatalog/tree/main"
//! code_prefix = "CertifyingDatalog"
//! symbol_color = "leansymbolcolor"
//!
//! [overrides]
//! root = "treeRoot"
//! rule = "datalogrule"
//! ```
//!
//! ```rust
//! use texlinks_core::{GeneratorConfig, ScanMode};
//!
//! let config = GeneratorConfig::from_toml_str("mode = \"namespace-aware\"")?;
//! assert_eq!(config.mode, ScanMode::NamespaceAware);
//! assert_eq!(config.extensions, vec![".py", ".lean"]);
//! # Ok::<(), texlinks_core::Error>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File name of the generated document when no output path is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "codeCommands.tex";

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "texlinks.toml";

const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".lean"];

const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".lake",
    "lake-packages",
    "transitiveClosureBenchmarkExponentialExtension",
    "transitiveClosureBenchmarkAllFacts",
    "transitiveClosureBenchmarkSingleFact",
    "transitiveClosureToyExample",
    "elReasoning",
    "OUTDATED-transitiveClosureBenchmarkExtreme",
];

/// How declaration lines are recognised and names are rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Keywords must start at column 0; no namespace tracking, digits kept,
    /// apostrophes become `2`.
    #[default]
    Flat,
    /// Leading whitespace is ignored, `namespace`/`end` blocks prefix macro
    /// names, `noncomputable` declarations are recognised, `?` is dropped and
    /// digits are spelled out.
    NamespaceAware,
}

/// What happens when a declaration line has no usable name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Abort the whole run on the first malformed line. Nothing is written.
    #[default]
    FailFast,
    /// Report the line, skip it, and keep scanning.
    KeepGoing,
}

/// Which path text goes into the `\#L` link of each macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPathStyle {
    /// Path relative to the scan root, `/`-separated.
    Relative,
    /// Bare file name, ignoring the directory the file lives in. The
    /// `\repoLinkCode` prefix is expected to point at the right directory.
    #[default]
    FileName,
}

/// How strictly `end <name>` must match to close a namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamespaceClose {
    /// The whitespace-stripped line must equal `end <name>` exactly.
    #[default]
    Exact,
    /// Also accept extra whitespace after `end` and a trailing `--` comment.
    Lenient,
}

macro_rules! kebab_enum_str {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// All accepted spellings, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            /// Canonical kebab-case spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(Error::Config(format!(
                        "invalid value '{other}', expected one of: {}",
                        Self::NAMES.join(", ")
                    ))),
                }
            }
        }
    };
}

kebab_enum_str!(ScanMode { Flat => "flat", NamespaceAware => "namespace-aware" });
kebab_enum_str!(ErrorPolicy { FailFast => "fail-fast", KeepGoing => "keep-going" });
kebab_enum_str!(LinkPathStyle { Relative => "relative", FileName => "file-name" });
kebab_enum_str!(NamespaceClose { Exact => "exact", Lenient => "lenient" });

/// Settings for the three header macros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Base URL bound to `\repoUrl`.
    pub repo_url: String,
    /// Directory inside the repository that `\repoLinkCode` paths are relative to.
    pub code_prefix: String,
    /// Color name used by `\repoLinkBase` for the link text.
    pub symbol_color: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/knowsys/CertifyingDatalog/tree/main".to_string(),
            code_prefix: "CertifyingDatalog".to_string(),
            symbol_color: "leansymbolcolor".to_string(),
        }
    }
}

/// Everything a generation run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory the traversal starts from.
    pub root: PathBuf,
    /// Where the generated document is written.
    pub output: PathBuf,
    /// File name suffixes selecting which files are scanned, tried in order.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into.
    pub exclude: BTreeSet<String>,
    /// Scanner behaviour.
    pub mode: ScanMode,
    /// Reaction to malformed declaration lines.
    pub on_error: ErrorPolicy,
    /// Path text used in links.
    pub link_path: LinkPathStyle,
    /// Namespace close matching.
    pub namespace_close: NamespaceClose,
    /// Follow symbolic links during traversal.
    pub follow_links: bool,
    /// Header macro settings.
    pub links: LinkConfig,
    /// Sanitized names that map to a fixed macro name, bypassing namespace prefixes.
    pub overrides: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            exclude: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(ToString::to_string)
                .collect(),
            mode: ScanMode::default(),
            on_error: ErrorPolicy::default(),
            link_path: LinkPathStyle::default(),
            namespace_close: NamespaceClose::default(),
            follow_links: false,
            links: LinkConfig::default(),
            overrides: BTreeMap::from([
                ("root".to_string(), "treeRoot".to_string()),
                ("rule".to_string(), "datalogrule".to_string()),
            ]),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    ///
    /// Keys missing from the file keep their default values. A present
    /// `[overrides]` table replaces the default overrides entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, contains
    /// unknown keys, or fails [`GeneratorConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Look for [`CONFIG_FILE_NAME`] in `dir`.
    #[must_use]
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(Error::Config(
                "at least one file extension is required".into(),
            ));
        }
        if self.extensions.iter().any(String::is_empty) {
            return Err(Error::Config("file extensions must not be empty".into()));
        }
        if let Some(dir) = self
            .exclude
            .iter()
            .find(|d| d.is_empty() || d.contains(['/', '\\']))
        {
            return Err(Error::Config(format!(
                "excluded directory '{dir}' must be a single directory name"
            )));
        }
        for (name, macro_name) in &self.overrides {
            if macro_name.is_empty() || !macro_name.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::Config(format!(
                    "override for '{name}' must be a non-empty ASCII letter macro name, got '{macro_name}'"
                )));
            }
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output path must not be empty".into()));
        }
        Ok(())
    }

    /// Extension matching `file_name`, trying extensions in configured order.
    #[must_use]
    pub fn matching_extension(&self, file_name: &str) -> Option<&str> {
        self.extensions
            .iter()
            .map(String::as_str)
            .find(|ext| file_name.ends_with(ext))
    }

    /// Whether a directory with this name is pruned from traversal.
    #[must_use]
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude.contains(dir_name)
    }
}
