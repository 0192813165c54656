//! Line-oriented declaration scanner.
//!
//! The scanner looks at one line at a time and never parses the source
//! language. A line is a declaration when its first token is one of
//! [`DECLARATION_KEYWORDS`]; the declared name is the next token. In
//! namespace-aware mode a single active namespace is tracked per file and
//! prefixed to macro names:
//!
//! ```text
//! no-namespace --"namespace Foo"--> in-namespace(Foo)
//! in-namespace(Foo) --"end Foo"--> no-namespace
//! in-namespace(Foo) --"namespace Bar"--> in-namespace(Bar)
//! ```
//!
//! ```rust
//! use texlinks_core::{DeclarationScanner, GeneratorConfig, ScanMode, SourceRef};
//!
//! let config = GeneratorConfig { mode: ScanMode::NamespaceAware, ..GeneratorConfig::default() };
//! let scanner = DeclarationScanner::new(&config);
//! let scan = scanner.scan(
//!     "namespace Graph\ndef edges : Nat := 0\nend Graph\n",
//!     &SourceRef::new("Graph.lean"),
//! );
//! assert_eq!(scan.records[0].macro_name, "Graphedges");
//! ```

use std::collections::BTreeMap;

use tracing::trace;

use crate::config::{GeneratorConfig, NamespaceClose, ScanMode};
use crate::naming::{
    display_text, is_valid_macro_name, macro_name, sanitize, split_tokens,
};
use crate::types::{
    DeclarationRecord, Diagnostic, DiagnosticSeverity, LineOutcome, MalformedLine,
    MalformedReason, SkipReason, SourceRef,
};

/// Keywords that introduce a declaration.
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "def",
    "lemma",
    "theorem",
    "structure",
    "inductive",
    "abbrev",
    "class",
];

const NAMESPACE_KEYWORD: &str = "namespace";
const END_KEYWORD: &str = "end";
const NONCOMPUTABLE_KEYWORD: &str = "noncomputable";

fn is_declaration_keyword(token: &str) -> bool {
    DECLARATION_KEYWORDS.contains(&token)
}

/// Lines split on `\n`, `\r\n` or a lone `\r`, without terminators.
fn source_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(end) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..end];
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
        Some(line)
    })
}

/// The active namespace of one file. Only one namespace is tracked at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    name: Option<String>,
    prefix: String,
}

impl NamespaceContext {
    /// Sanitized prefix for macro names; empty outside a namespace.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn open(&mut self, name: &str) {
        self.prefix = sanitize(name, ScanMode::NamespaceAware);
        self.name = Some(name.to_string());
    }

    fn close(&mut self) {
        self.name = None;
        self.prefix.clear();
    }

    fn closes(&self, trimmed: &str, policy: NamespaceClose) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };
        match policy {
            NamespaceClose::Exact => trimmed
                .strip_prefix(END_KEYWORD)
                .and_then(|rest| rest.strip_prefix(' '))
                .is_some_and(|rest| rest == name),
            NamespaceClose::Lenient => {
                let code = trimmed
                    .split_once("--")
                    .map_or(trimmed, |(code, _comment)| code);
                let mut words = code.split_whitespace();
                words.next() == Some(END_KEYWORD)
                    && words.next() == Some(name)
                    && words.next().is_none()
            },
        }
    }
}

/// Everything the scanner found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    /// Records in line order.
    pub records: Vec<DeclarationRecord>,
    /// Number of declarations skipped on purpose.
    pub skipped: usize,
    /// Declaration lines without a usable name, in line order.
    pub malformed: Vec<MalformedLine>,
    /// Warnings about records that were emitted anyway.
    pub diagnostics: Vec<Diagnostic>,
}

/// Scans file contents for declarations according to a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct DeclarationScanner<'a> {
    mode: ScanMode,
    namespace_close: NamespaceClose,
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> DeclarationScanner<'a> {
    /// Scanner using the mode, close policy and overrides of `config`.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            mode: config.mode,
            namespace_close: config.namespace_close,
            overrides: &config.overrides,
        }
    }

    /// Scan a whole file. Namespace state starts empty.
    pub fn scan(&self, text: &str, source: &SourceRef) -> FileScan {
        let mut context = NamespaceContext::default();
        let mut scan = FileScan::default();

        for (index, line) in source_lines(text).enumerate() {
            let line_number = index + 1;
            match self.scan_line(&mut context, line, line_number, source) {
                LineOutcome::Ignored => {},
                LineOutcome::Record(record) => {
                    if !is_valid_macro_name(&record.macro_name) {
                        scan.diagnostics.push(Diagnostic {
                            severity: DiagnosticSeverity::Warn,
                            path: source.link_path.clone(),
                            line: Some(line_number),
                            message: format!(
                                "macro name '{}' is not a valid TeX control word",
                                record.macro_name
                            ),
                        });
                    }
                    scan.records.push(record);
                },
                LineOutcome::Skipped(reason) => {
                    trace!(path = %source.link_path, line = line_number, ?reason, "skipped declaration");
                    scan.skipped += 1;
                },
                LineOutcome::Malformed(malformed) => scan.malformed.push(malformed),
            }
        }

        scan
    }

    /// Scan one line, updating the namespace context.
    pub fn scan_line(
        &self,
        context: &mut NamespaceContext,
        line: &str,
        line_number: usize,
        source: &SourceRef,
    ) -> LineOutcome {
        match self.mode {
            ScanMode::Flat => self.scan_declaration(line, 1, "", line_number, source),
            ScanMode::NamespaceAware => {
                let trimmed = line.trim();

                if let Some(name) = namespace_opened(trimmed) {
                    context.open(name);
                    return LineOutcome::Ignored;
                }
                if context.closes(trimmed, self.namespace_close) {
                    context.close();
                    return LineOutcome::Ignored;
                }

                let mut tokens = split_tokens(trimmed);
                if tokens.next() == Some(NONCOMPUTABLE_KEYWORD) {
                    if !tokens.next().is_some_and(is_declaration_keyword) {
                        return LineOutcome::Ignored;
                    }
                    return self.scan_declaration(
                        trimmed,
                        2,
                        context.prefix(),
                        line_number,
                        source,
                    );
                }

                self.scan_declaration(trimmed, 1, context.prefix(), line_number, source)
            },
        }
    }

    /// Extract the token at `name_index` from a declaration line and build a record.
    fn scan_declaration(
        &self,
        line: &str,
        name_index: usize,
        namespace_prefix: &str,
        line_number: usize,
        source: &SourceRef,
    ) -> LineOutcome {
        let mut tokens = split_tokens(line);
        if !tokens.next().is_some_and(|first| {
            is_declaration_keyword(first) || (name_index == 2 && first == NONCOMPUTABLE_KEYWORD)
        }) {
            return LineOutcome::Ignored;
        }

        let malformed = |reason| {
            LineOutcome::Malformed(MalformedLine {
                line_number,
                reason,
                text: line.to_string(),
            })
        };

        let Some(raw_name) = tokens.nth(name_index - 1) else {
            return malformed(MalformedReason::MissingName);
        };
        if raw_name.is_empty() {
            return malformed(MalformedReason::EmptyName);
        }
        if raw_name.contains('\'') {
            return LineOutcome::Skipped(SkipReason::PrimedName);
        }

        let sanitized_name = sanitize(raw_name, self.mode);
        if sanitized_name.is_empty() {
            return malformed(MalformedReason::EmptyAfterSanitizing);
        }

        LineOutcome::Record(DeclarationRecord {
            raw_name: raw_name.to_string(),
            macro_name: macro_name(&sanitized_name, namespace_prefix, self.overrides),
            display_text: display_text(raw_name),
            sanitized_name,
            source_file: source.path.clone(),
            link_path: source.link_path.clone(),
            line_number,
            namespace_prefix: namespace_prefix.to_string(),
        })
    }
}

/// Name opened by a `namespace <name>` line, if this is one.
fn namespace_opened(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix(NAMESPACE_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim();
    (!name.is_empty()).then_some(name)
}
