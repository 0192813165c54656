//! # texlinks-core
//!
//! Core functionality for texlinks - LaTeX hyperlink macros for declarations
//! in a source tree.
//!
//! Given a root directory, the crate finds every line that introduces a
//! declaration (`def`, `lemma`, `theorem`, `structure`, `inductive`, `abbrev`,
//! `class`), turns the declared name into a TeX-safe macro name, and renders a
//! `\newcommand` that links to that line in a hosted repository.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]): one explicit [`GeneratorConfig`] value per run
//! - **Traversal** ([`walker`]): deterministic top-down walk with directory pruning
//! - **Scanning** ([`scanner`], [`naming`]): per-line declaration detection,
//!   namespace tracking, and name sanitization
//! - **Rendering** ([`render`]): header macros and per-record macro lines
//! - **Driver** ([`generator`]): ties the above together and reports what happened
//!
//! ## Quick Start
//!
//! ```rust
//! use texlinks_core::{DeclarationScanner, GeneratorConfig, SourceRef, render};
//!
//! let config = GeneratorConfig::default();
//! let scan = DeclarationScanner::new(&config)
//!     .scan("def my_lemma : Nat := 0\n", &SourceRef::new("foo.lean"));
//!
//! assert_eq!(
//!     render::record_line(&scan.records[0]),
//!     r"\newcommand{\mylemma}{\repoLinkCode{foo.lean\#L1}{my\_lemma}}"
//! );
//! ```

/// Run configuration and its TOML representation
pub mod config;
/// Error types and result aliases
pub mod error;
/// Generation driver and run reports
pub mod generator;
/// Name sanitization and macro naming
pub mod naming;
/// LaTeX output rendering
pub mod render;
/// Per-line declaration scanner
pub mod scanner;
/// Core data types
pub mod types;
/// Source tree traversal
pub mod walker;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_OUTPUT_FILE, ErrorPolicy, GeneratorConfig, LinkConfig,
    LinkPathStyle, NamespaceClose, ScanMode,
};
pub use error::{Error, Result};
pub use generator::{Generation, GenerationReport, Generator};
pub use render::OutputDocument;
pub use scanner::{DECLARATION_KEYWORDS, DeclarationScanner, FileScan, NamespaceContext};
pub use types::*;
pub use walker::{SourceFile, SourceWalker};
