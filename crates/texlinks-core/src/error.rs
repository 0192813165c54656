//! Error types and handling for texlinks-core operations.
//!
//! A single error enum covers every failure of a generation run. Errors are
//! categorized so the CLI can map them onto exit codes without matching on
//! message text.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading source files, writing the output document
//! - **Walk Errors**: directory traversal failures (permissions, loops)
//! - **Configuration Errors**: unreadable or invalid TOML configuration
//! - **Malformed Declarations**: a declaration line that cannot be split into a name
//! - **Serialization Errors**: JSON/TOML conversion of reports and configs
//!
//! ```rust
//! use texlinks_core::{Error, Result};
//!
//! fn run() -> Result<()> {
//!     Err(Error::Config("missing root".into()))
//! }
//!
//! match run() {
//!     Err(e) if e.category() == "config" => eprintln!("fix your config: {e}"),
//!     Err(e) => eprintln!("failed: {e}"),
//!     Ok(()) => {},
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for texlinks-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Used for failures that are not tied to a specific source file, such as
    /// writing the output document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file selected by the traversal could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configured root is missing or not a directory.
    #[error("Root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Directory traversal failed.
    ///
    /// ## Common Causes
    ///
    /// - Permission denied while listing a directory
    /// - Symlink loop when following links
    #[error("Walk error: {0}")]
    Walk(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A declaration line did not contain a usable name.
    ///
    /// Raised only under the fail-fast error policy, for a line that ends
    /// before its name. Every other malformed line is reported and skipped.
    #[error("Malformed declaration at {path}:{line}: {reason}")]
    MalformedDeclaration {
        /// Link path of the file.
        path: String,
        /// 1-based line number.
        line: usize,
        /// Why the line could not be turned into a record.
        reason: String,
    },

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        // walkdir's Display already names the offending path
        Self::Walk(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// - `"io"` - reading sources or writing output
    /// - `"not_found"` - the scan root does not exist
    /// - `"walk"` - directory traversal
    /// - `"config"` - configuration loading and validation
    /// - `"malformed"` - declaration lines without a usable name
    /// - `"serialization"` - data format conversion
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::ReadFile { .. } => "io",
            Self::RootNotFound(_) => "not_found",
            Self::Walk(_) => "walk",
            Self::Config(_) => "config",
            Self::MalformedDeclaration { .. } => "malformed",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
