//! Compiler for CQL, a compact query language for linguistic search over a
//! tagged corpus.
//!
//! ```
//! use cql_lang::{compile, parse, ResultShape};
//!
//! let query = parse("spe(the)$spe(cat)").unwrap();
//! let fragments = compile(&query, ResultShape::WordId, None);
//! assert_eq!(fragments.len(), 1);
//! assert!(fragments[0].text.contains("w1 = w0.next"));
//! ```

pub mod ast;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;

pub mod cli;

pub use ast::{Phrase, Query, Term, TermSet, Token, TokenKind, WordPosition};
pub use catalog::{AttributeDescriptor, AttributeKind, Entity, EntityPrefix};
pub use codegen::{Codegen, QueryFragment, ResultShape, Schema};
pub use config::{CompilerConfig, ConfigError};
pub use error::{CqlError, SemanticErrorKind, SyntaxErrorKind};
pub use lexer::Lexer;
pub use parser::{Parser, parse};

/// Compiles a query with the default schema and no part-of-speech code set.
pub fn compile(query: &Query, shape: ResultShape, filter: Option<&str>) -> Vec<QueryFragment> {
    Codegen::new().compile(query, shape, filter)
}

/// Canonical CQL text for a query.
pub fn to_canonical_text(query: &Query) -> String {
    query.to_canonical_text()
}
