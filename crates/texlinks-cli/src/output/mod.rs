//! # Output Formatting
//!
//! - **Text**: colored summary for people
//! - **JSON**: one pretty-printed object for scripts
//!
//! The generated LaTeX document itself is not formatted here; it is written
//! verbatim by the core renderer.

mod text;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

pub use text::{write_generation_summary, write_scan_listing};

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Single pretty-printed JSON object
    Json,
}

impl OutputFormat {
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_is_terminated() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"records": 3})).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["records"], 3);
    }

    #[test]
    fn test_only_json_is_machine_output() {
        assert!(OutputFormat::Json.is_machine());
        assert!(!OutputFormat::Text.is_machine());
    }
}
