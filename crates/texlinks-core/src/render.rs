//! LaTeX rendering of the output document.
//!
//! The document starts with three header macros:
//!
//! - `\repoUrl`: base URL of the hosted repository
//! - `\repoLinkBase{path}{text}`: colored, monospaced hyperlink
//! - `\repoLinkCode{path}{text}`: `\repoLinkBase` below the code directory
//!
//! followed by one `\newcommand` per declaration. The escaping here is
//! consumed by existing documents and must stay byte-for-byte stable.

use std::fs;
use std::path::Path;

use crate::config::LinkConfig;
use crate::types::DeclarationRecord;
use crate::{Error, Result};

/// The three fixed header lines.
#[must_use]
pub fn header_lines(links: &LinkConfig) -> [String; 3] {
    let code_base = if links.code_prefix.is_empty() {
        "#1".to_string()
    } else {
        format!("{}/#1", links.code_prefix.trim_end_matches('/'))
    };
    [
        format!("\\newcommand{{\\repoUrl}}{{{}}}", links.repo_url),
        format!(
            "\\newcommand{{\\repoLinkBase}}[2]{{\\href{{\\repoUrl/#1}}{{\\textcolor{{{}}}{{\\texttt{{#2}}}}}}\\xspace}}",
            links.symbol_color
        ),
        format!("\\newcommand{{\\repoLinkCode}}[2]{{\\repoLinkBase{{{code_base}}}{{#2}}}}"),
    ]
}

/// Macro definition for one declaration.
///
/// ```rust
/// use texlinks_core::{render::record_line, DeclarationRecord};
///
/// let record = DeclarationRecord {
///     raw_name: "my_lemma".into(),
///     sanitized_name: "mylemma".into(),
///     macro_name: "mylemma".into(),
///     display_text: "my\\_lemma".into(),
///     source_file: "foo.lean".into(),
///     link_path: "foo.lean".into(),
///     line_number: 1,
///     namespace_prefix: String::new(),
/// };
/// assert_eq!(
///     record_line(&record),
///     r"\newcommand{\mylemma}{\repoLinkCode{foo.lean\#L1}{my\_lemma}}"
/// );
/// ```
#[must_use]
pub fn record_line(record: &DeclarationRecord) -> String {
    format!(
        "\\newcommand{{\\{}}}{{\\repoLinkCode{{{}\\#L{}}}{{{}}}}}",
        record.macro_name, record.link_path, record.line_number, record.display_text
    )
}

/// Ordered macro-definition lines, written in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    lines: Vec<String>,
}

impl OutputDocument {
    /// Document holding only the header lines.
    pub fn new(links: &LinkConfig) -> Self {
        Self {
            lines: header_lines(links).into(),
        }
    }

    /// Append the macro for a record.
    pub fn push_record(&mut self, record: &DeclarationRecord) {
        self.lines.push(record_line(record));
    }

    /// Header lines followed by one line per record, without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full document text, every line terminated by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Write the document to `path`, replacing any previous content.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {e}", path.display()),
            ))
        })
    }
}
