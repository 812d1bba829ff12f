//! Rendering of compiled fragments for display and hand-off.
//!
//! # Features
//!
//! - **Plain output** via [`to_lines()`] - one fragment per line, in phrase order
//! - **Compact JSON** via [`to_json()`] - fragments with their aliases and shape
//! - **Pretty JSON** via [`to_json_pretty()`] - the same, indented for reading
//!
//! # Examples
//!
//! ```
//! use cql_lang::{compile, parse, ResultShape};
//! use cql_lang::output::to_lines;
//!
//! let query = parse("spe(thee)|spe(thou)").unwrap();
//! let fragments = compile(&query, ResultShape::WordId, None);
//! assert_eq!(to_lines(&fragments).lines().count(), 2);
//! ```

use crate::codegen::QueryFragment;

/// Output format for compiled fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Lines,
    Json,
    PrettyJson,
}

pub struct FragmentPrinter {
    format: OutputFormat,
}

impl FragmentPrinter {
    pub fn new(format: OutputFormat) -> Self {
        FragmentPrinter { format }
    }

    pub fn print(&self, fragments: &[QueryFragment]) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Lines => Ok(to_lines(fragments)),
            OutputFormat::Json => serde_json::to_string(fragments),
            OutputFormat::PrettyJson => serde_json::to_string_pretty(fragments),
        }
    }
}

/// One fragment per line.
pub fn to_lines(fragments: &[QueryFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compact JSON array of fragments.
pub fn to_json(fragments: &[QueryFragment]) -> Result<String, serde_json::Error> {
    FragmentPrinter::new(OutputFormat::Json).print(fragments)
}

/// Indented JSON array of fragments.
pub fn to_json_pretty(fragments: &[QueryFragment]) -> Result<String, serde_json::Error> {
    FragmentPrinter::new(OutputFormat::PrettyJson).print(fragments)
}
