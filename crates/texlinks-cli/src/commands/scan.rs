//! `texlinks scan`: inspect a single file without writing anything

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use texlinks_core::{
    DeclarationRecord, DeclarationScanner, Diagnostic, MalformedLine, NamespaceClose, ScanMode,
    SourceRef,
};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputFormat, write_json, write_scan_listing};
use crate::utils::settings;

#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    file: &'a str,
    mode: ScanMode,
    records: &'a [DeclarationRecord],
    skipped: usize,
    malformed: &'a [MalformedLine],
    diagnostics: &'a [Diagnostic],
}

fn read_source(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| {
        let missing = source.kind() == ErrorKind::NotFound;
        let err = texlinks_core::Error::ReadFile {
            path: path.to_path_buf(),
            source,
        };
        if missing {
            CliError::not_found(err)
        } else {
            CliError::from(err)
        }
    })
}

/// Execute the scan command
///
/// Malformed lines are listed, never fatal.
pub fn execute(args: &ScanArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = settings::load(config_path)?.config;
    if let Some(mode) = args.scan.mode {
        config.mode = mode.into();
    }
    if args.scan.lenient_end {
        config.namespace_close = NamespaceClose::Lenient;
    }

    let text = read_source(&args.file)?;
    let source = SourceRef::new(&args.file);
    let scan = DeclarationScanner::new(&config).scan(&text, &source);

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Json => write_json(
            &mut stdout,
            &ScanOutput {
                file: &source.link_path,
                mode: config.mode,
                records: &scan.records,
                skipped: scan.skipped,
                malformed: &scan.malformed,
                diagnostics: &scan.diagnostics,
            },
        )?,
        OutputFormat::Text => write_scan_listing(&mut stdout, &source.link_path, &scan)?,
    }
    Ok(())
}
