//! Turning declared names into TeX macro names and display text.
//!
//! TeX control words may only contain letters, so declared names are
//! sanitized before they become `\newcommand` targets. The display form keeps
//! the name as written and only escapes what TeX would otherwise interpret.

use std::collections::BTreeMap;

use crate::config::ScanMode;

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Split a line the way declaration names are extracted: on every single
/// `(`, `:` or whitespace character. Adjacent separators yield empty tokens.
///
/// ```rust
/// use texlinks_core::naming::split_tokens;
///
/// let tokens: Vec<_> = split_tokens("def my_lemma : Nat := 0").collect();
/// assert_eq!(tokens, ["def", "my_lemma", "", "", "Nat", "", "=", "0"]);
/// ```
pub fn split_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == '(' || c == ':' || c.is_whitespace())
}

/// Rewrite a raw declared name into a macro-safe name.
///
/// Both modes drop `_` and `.`. Flat mode replaces `'` with `2`;
/// namespace-aware mode replaces it with `prime`, drops `?`, and spells out
/// each decimal digit. The result is stable under repeated application.
///
/// ```rust
/// use texlinks_core::{naming::sanitize, ScanMode};
///
/// assert_eq!(sanitize("my_lemma", ScanMode::Flat), "mylemma");
/// assert_eq!(sanitize("lemma2ways", ScanMode::NamespaceAware), "lemmatwoways");
/// assert_eq!(sanitize("List.isEmpty?", ScanMode::NamespaceAware), "ListisEmpty");
/// ```
#[must_use]
pub fn sanitize(raw: &str, mode: ScanMode) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match (c, mode) {
            ('_' | '.', _) | ('?', ScanMode::NamespaceAware) => {},
            ('\'', ScanMode::Flat) => out.push('2'),
            ('\'', ScanMode::NamespaceAware) => out.push_str("prime"),
            ('0'..='9', ScanMode::NamespaceAware) => {
                out.push_str(DIGIT_WORDS[usize::from(c as u8 - b'0')]);
            },
            _ => out.push(c),
        }
    }
    out
}

/// Human-readable form of a raw name for typesetting: `_` becomes `\_` and
/// `'` becomes `\textsc{\char13}`.
#[must_use]
pub fn display_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '_' => out.push_str("\\_"),
            '\'' => out.push_str("\\textsc{\\char13}"),
            _ => out.push(c),
        }
    }
    out
}

/// Final macro name for a sanitized declaration name.
///
/// Overrides win and are never prefixed. Otherwise the sanitized namespace
/// (possibly empty) is prepended.
#[must_use]
pub fn macro_name(
    sanitized: &str,
    namespace_prefix: &str,
    overrides: &BTreeMap<String, String>,
) -> String {
    overrides.get(sanitized).map_or_else(
        || format!("{namespace_prefix}{sanitized}"),
        Clone::clone,
    )
}

/// Whether TeX accepts `name` as a control word defined by `\newcommand`.
#[must_use]
pub fn is_valid_macro_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}
