//! Human-readable summaries

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use texlinks_core::{DiagnosticSeverity, FileScan, GenerationReport};

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// One-paragraph summary of a generation run.
///
/// Individual issues are already logged as they are found, so only counts
/// are repeated here.
pub fn write_generation_summary<W: Write>(writer: &mut W, report: &GenerationReport) -> Result<()> {
    let macros = format!(
        "{} {}",
        report.records,
        plural(report.records, "macro", "macros")
    );
    let files = format!(
        "{} {}",
        report.files_scanned,
        plural(report.files_scanned, "file", "files")
    );

    match &report.output {
        Some(path) => writeln!(
            writer,
            "{} Wrote {} from {files} to {}",
            "✓".green(),
            macros.bold(),
            path.display()
        )?,
        None => writeln!(writer, "{} Generated {} from {files}", "✓".green(), macros.bold())?,
    }

    if report.skipped > 0 {
        writeln!(
            writer,
            "  {} {} skipped (primed names)",
            report.skipped,
            plural(report.skipped, "declaration", "declarations")
        )?;
    }
    if report.malformed > 0 {
        writeln!(
            writer,
            "  {} {} {} without a usable name",
            "⚠".yellow(),
            report.malformed,
            plural(report.malformed, "declaration", "declarations")
        )?;
    }
    if report.duplicates > 0 {
        writeln!(
            writer,
            "  {} {} duplicate macro {}",
            "⚠".yellow(),
            report.duplicates,
            plural(report.duplicates, "name", "names")
        )?;
    }
    Ok(())
}

/// Records and issues found in a single file, one per line.
pub fn write_scan_listing<W: Write>(writer: &mut W, path: &str, scan: &FileScan) -> Result<()> {
    for record in &scan.records {
        writeln!(
            writer,
            "{}:{}  {}  {}",
            record.link_path,
            record.line_number,
            format!("\\{}", record.macro_name).cyan(),
            record.raw_name
        )?;
    }

    for malformed in &scan.malformed {
        writeln!(
            writer,
            "{} {path}:{}: {}: `{}`",
            "✗".red(),
            malformed.line_number,
            malformed.reason,
            malformed.text.trim()
        )?;
    }

    for diagnostic in &scan.diagnostics {
        let marker = match diagnostic.severity {
            DiagnosticSeverity::Error => "✗".red(),
            DiagnosticSeverity::Warn => "⚠".yellow(),
        };
        writeln!(writer, "{marker} {diagnostic}")?;
    }

    writeln!(
        writer,
        "{} {}, {} skipped, {} malformed",
        scan.records.len(),
        plural(scan.records.len(), "record", "records"),
        scan.skipped,
        scan.malformed.len()
    )?;
    Ok(())
}
