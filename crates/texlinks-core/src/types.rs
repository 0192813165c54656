use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One declaration found in a source file, ready to be rendered as a macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    /// Name exactly as it appears in the source line.
    pub raw_name: String,
    /// Name after sanitization, before overrides and namespace prefixing.
    pub sanitized_name: String,
    /// Name of the generated TeX macro (without the leading backslash).
    pub macro_name: String,
    /// Escaped form of the raw name used as link text.
    pub display_text: String,
    /// File the declaration was found in, as visited by the traversal.
    pub source_file: PathBuf,
    /// Path text placed in the link.
    pub link_path: String,
    /// 1-based line number.
    pub line_number: usize,
    /// Sanitized enclosing namespace, empty outside a namespace.
    pub namespace_prefix: String,
}

/// Where a scanned text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    /// Path on disk.
    pub path: PathBuf,
    /// Path text used in links and diagnostics.
    pub link_path: String,
}

impl SourceRef {
    /// Source whose link path is its own display path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let link_path = path.to_string_lossy().replace('\\', "/");
        Self { path, link_path }
    }

    /// Source with an explicit link path.
    pub fn with_link_path(path: impl Into<PathBuf>, link_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            link_path: link_path.into(),
        }
    }
}

/// Why a declaration line was intentionally left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The raw name contains an apostrophe.
    PrimedName,
}

/// Why a declaration line could not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    /// The line ends before the name token.
    MissingName,
    /// The name token is empty, e.g. two separators in a row.
    EmptyName,
    /// Sanitization removed every character of the name.
    EmptyAfterSanitizing,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingName => "missing declaration name",
            Self::EmptyName => "empty declaration name",
            Self::EmptyAfterSanitizing => "name has no characters left after sanitizing",
        })
    }
}

impl MalformedReason {
    /// Whether the fail-fast policy aborts the run on this line.
    ///
    /// Only a line that ends before its name is fatal. Empty names are
    /// reported and skipped under either policy.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::MissingName)
    }
}

/// A declaration-looking line that did not yield a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// What went wrong.
    pub reason: MalformedReason,
    /// The offending line, without its terminator.
    pub text: String,
}

/// Result of scanning a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Not a declaration; includes namespace bookkeeping lines.
    Ignored,
    /// A declaration that becomes a macro.
    Record(DeclarationRecord),
    /// A declaration left out on purpose.
    Skipped(SkipReason),
    /// A declaration line without a usable name.
    Malformed(MalformedLine),
}

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A declaration line was dropped.
    Error,
    /// Output was produced but may not be what the author meant.
    Warn,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
        })
    }
}

/// Something worth telling the user about a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious it is.
    pub severity: DiagnosticSeverity,
    /// Link path of the file.
    pub path: String,
    /// 1-based line number, when the diagnostic is about a single line.
    pub line: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}: {}", self.path, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}
