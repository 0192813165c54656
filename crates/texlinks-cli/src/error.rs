//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so scripts and CI jobs can tell a bad invocation
//! from a malformed source tree without parsing stderr.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 3 | `NotFound` | Root directory or input file does not exist |
//! | 4 | `Malformed` | A declaration line has no usable name |
//! | 5 | `Io` | Reading sources, walking the tree, or writing output failed |
//!
//! # Usage
//!
//! ```bash
//! texlinks generate CertifyingDatalog
//! case $? in
//!     0) echo "macros written" ;;
//!     4) echo "fix the declaration named in the error" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Covers config files with unknown keys or invalid values as well as
    /// flag combinations clap cannot reject on its own.
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Malformed declaration in the scanned sources (exit code 4).
    Malformed = 4,

    /// File system failure (exit code 5).
    Io = 5,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Malformed => "malformed input",
            Self::Io => "I/O error",
        }
    }

    /// Map a core error onto its category.
    #[must_use]
    pub fn from_core(err: &texlinks_core::Error) -> Self {
        match err.category() {
            "config" => Self::Usage,
            "not_found" => Self::NotFound,
            "malformed" => Self::Malformed,
            "io" | "walk" => Self::Io,
            _ => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Fallback for errors that were never categorized explicitly.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("malformed declaration") {
            return Self::Malformed;
        }

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("permission denied")
            || msg_lower.contains("failed to read")
            || msg_lower.contains("failed to write")
        {
            return Self::Io;
        }

        if msg_lower.contains("configuration error")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("invalid argument")
            || msg_lower.contains("cannot use")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// ```rust,ignore
/// use texlinks_cli::error::CliError;
///
/// let err = CliError::usage(anyhow::anyhow!("cannot use --stdout with --format json"));
/// assert_eq!(err.exit_code(), 2);
/// ```
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl From<texlinks_core::Error> for CliError {
    fn from(err: texlinks_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit [`CliError`]s win, then uncategorized core errors, then the
/// message heuristic.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.downcast_ref::<texlinks_core::Error>() {
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
