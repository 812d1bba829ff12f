//! CLI support for cql-lang
//!
//! Provides programmatic access to the `cql` commands for embedding in
//! other tools.

mod check;
mod compile;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use compile::{CompileOptions, execute_compile};
pub use docs::{DocCategory, get_attribute_listing, get_doc_category, get_docs_overview};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::CqlError),

    #[error("Config error: {0}")]
    Config(#[from] crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'cql docs' to see available categories.")]
    UnknownCategory(String),
}
