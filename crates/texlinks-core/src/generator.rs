//! Generation run: walk, scan, render, write.
//!
//! ```rust,no_run
//! use texlinks_core::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     root: "CertifyingDatalog".into(),
//!     ..GeneratorConfig::default()
//! };
//! let report = Generator::new(&config).run()?;
//! println!("{} macros from {} files", report.records, report.files_scanned);
//! # Ok::<(), texlinks_core::Error>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ErrorPolicy, GeneratorConfig, ScanMode};
use crate::render::OutputDocument;
use crate::scanner::{DeclarationScanner, FileScan};
use crate::types::{DeclarationRecord, Diagnostic, DiagnosticSeverity};
use crate::walker::{SourceFile, SourceWalker};
use crate::{Error, Result};

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Root directory that was walked.
    pub root: PathBuf,
    /// Set once the document has been written.
    pub output: Option<PathBuf>,
    /// Scanner mode used for every file.
    pub mode: ScanMode,
    /// Source files read, whether or not they held declarations.
    pub files_scanned: usize,
    /// Declaration macros emitted, excluding the header.
    pub records: usize,
    /// Declarations left out on purpose (primed names).
    pub skipped: usize,
    /// Malformed lines reported and left out of the document.
    pub malformed: usize,
    /// Records whose macro name was already defined earlier in the document.
    pub duplicates: usize,
    /// Everything reported along the way, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Everything produced by [`Generator::generate`], before anything is written.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Rendered header and record lines.
    pub document: OutputDocument,
    /// Records in document order.
    pub records: Vec<DeclarationRecord>,
    /// Counts and diagnostics for the run.
    pub report: GenerationReport,
}

/// Drives one generation run for a configuration.
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Generator for one configuration.
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Walk the tree and build the document in memory.
    ///
    /// # Errors
    ///
    /// Fails on a missing root, traversal errors and unreadable files. Under
    /// [`ErrorPolicy::FailFast`] it also fails on the first declaration line
    /// that ends before its name; other malformed lines are only reported.
    pub fn generate(&self) -> Result<Generation> {
        let config = self.config;
        let scanner = DeclarationScanner::new(config);
        let mut document = OutputDocument::new(&config.links);
        let mut records = Vec::new();
        let mut defined: HashMap<String, (String, usize)> = HashMap::new();
        let mut report = GenerationReport {
            root: config.root.clone(),
            mode: config.mode,
            ..GenerationReport::default()
        };

        for file in SourceWalker::new(config).files()? {
            let file = file?;
            let scan = Self::scan_file(&scanner, &file)?;
            report.files_scanned += 1;
            debug!(
                path = %file.link_path,
                records = scan.records.len(),
                skipped = scan.skipped,
                "scanned file"
            );

            for malformed in scan.malformed {
                if config.on_error == ErrorPolicy::FailFast && malformed.reason.is_fatal() {
                    return Err(Error::MalformedDeclaration {
                        path: file.link_path.clone(),
                        line: malformed.line_number,
                        reason: malformed.reason.to_string(),
                    });
                }
                let diagnostic = Diagnostic {
                    severity: DiagnosticSeverity::Error,
                    path: file.link_path.clone(),
                    line: Some(malformed.line_number),
                    message: format!("{}: `{}`", malformed.reason, malformed.text.trim()),
                };
                warn!("{diagnostic}");
                report.malformed += 1;
                report.diagnostics.push(diagnostic);
            }

            for diagnostic in scan.diagnostics {
                warn!("{diagnostic}");
                report.diagnostics.push(diagnostic);
            }
            report.skipped += scan.skipped;

            for record in scan.records {
                if let Some((path, line)) = defined.get(&record.macro_name) {
                    let diagnostic = Diagnostic {
                        severity: DiagnosticSeverity::Warn,
                        path: record.link_path.clone(),
                        line: Some(record.line_number),
                        message: format!(
                            "macro '\\{}' already defined at {path}:{line}",
                            record.macro_name
                        ),
                    };
                    warn!("{diagnostic}");
                    report.duplicates += 1;
                    report.diagnostics.push(diagnostic);
                } else {
                    defined.insert(
                        record.macro_name.clone(),
                        (record.link_path.clone(), record.line_number),
                    );
                }
                document.push_record(&record);
                records.push(record);
            }
        }

        report.records = records.len();
        info!(
            files = report.files_scanned,
            records = report.records,
            skipped = report.skipped,
            "generated declaration macros"
        );

        Ok(Generation {
            document,
            records,
            report,
        })
    }

    /// Generate and write the document to the configured output path.
    pub fn run(&self) -> Result<GenerationReport> {
        let Generation {
            document,
            mut report,
            ..
        } = self.generate()?;
        document.write_to(&self.config.output)?;
        info!(path = %self.config.output.display(), "wrote output document");
        report.output = Some(self.config.output.clone());
        Ok(report)
    }

    fn scan_file(scanner: &DeclarationScanner<'_>, file: &SourceFile) -> Result<FileScan> {
        let text = fs::read_to_string(&file.path).map_err(|source| Error::ReadFile {
            path: file.path.clone(),
            source,
        })?;
        Ok(scanner.scan(&text, &file.source_ref()))
    }
}
