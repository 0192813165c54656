//! # CLI Structure and Argument Parsing
//!
//! ```bash
//! # Write codeCommands.tex for a Lean project
//! texlinks generate CertifyingDatalog
//!
//! # Namespace-aware scan, report malformed lines instead of aborting
//! texlinks generate src --mode namespace-aware --keep-going
//!
//! # Inspect a single file
//! texlinks scan src/Tree.lean --format json
//!
//! # Show the configuration a run would use
//! texlinks --config texlinks.toml config
//! ```
//!
//! Flags override the config file, which overrides the built-in defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use texlinks_core::{LinkPathStyle, ScanMode};

use crate::output::OutputFormat;

/// Main CLI structure for the `texlinks` command
#[derive(Parser, Clone, Debug)]
#[command(name = "texlinks")]
#[command(version)]
#[command(
    about = "texlinks - LaTeX hyperlink macros for declarations in a source tree",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ./texlinks.toml when present)
    #[arg(long, global = true, env = "TEXLINKS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Walk a source tree and write the macro document
    Generate(GenerateArgs),

    /// Scan a single file and print what it declares
    Scan(ScanArgs),

    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for `texlinks generate`
#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Directory to scan
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Output file
    #[arg(short = 'o', long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// File suffix to scan, replacing the configured list (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Additional directory name to skip (repeatable)
    #[arg(long, value_name = "DIR")]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub scan: ScanOptions,

    /// Report malformed declarations and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Repository base URL for `\repoUrl`
    #[arg(long, value_name = "URL")]
    pub repo_url: Option<String>,

    /// Directory inside the repository that links are relative to
    #[arg(long, value_name = "PREFIX")]
    pub code_prefix: Option<String>,

    /// Path text placed in each link
    #[arg(long, value_enum, value_name = "STYLE")]
    pub link_path: Option<LinkPathArg>,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `texlinks scan`
#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub scan: ScanOptions,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Scanner options shared by `generate` and `scan`
#[derive(Args, Clone, Debug, Default)]
pub struct ScanOptions {
    /// Scanner mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Accept `end <name>` with extra whitespace or a trailing comment
    #[arg(long)]
    pub lenient_end: bool,
}

/// Scanner mode as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Column-0 keywords, no namespaces
    Flat,
    /// Indented declarations, namespace prefixes, spelled-out digits
    NamespaceAware,
}

impl From<ModeArg> for ScanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flat => Self::Flat,
            ModeArg::NamespaceAware => Self::NamespaceAware,
        }
    }
}

/// Link path style as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkPathArg {
    /// Path relative to the scan root
    Relative,
    /// Bare file name (default)
    FileName,
}

impl From<LinkPathArg> for LinkPathStyle {
    fn from(style: LinkPathArg) -> Self {
        match style {
            LinkPathArg::Relative => Self::Relative,
            LinkPathArg::FileName => Self::FileName,
        }
    }
}

impl Commands {
    /// Output format requested by the command, if it has one.
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Generate(args) => Some(args.format),
            Self::Scan(args) => Some(args.format),
            Self::Config { format } => Some(*format),
            Self::Completions { .. } => None,
        }
    }
}
