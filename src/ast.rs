//! # CQL - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for CQL, the corpus
//! query language. A CQL query describes word patterns over a tagged corpus:
//! spellings, lemmas, parts of speech, speakers and publication metadata.
//!
//! ## Architecture Overview
//!
//! The AST is a strict tree, one submodule per grammar level:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[term]** - One attribute test, `[!]mnemonic(text)`
//! - **[term_set]** - Terms that must all hold (`:`)
//! - **[word_position]** - Alternative term sets for one word (`;`)
//! - **[phrase]** - Consecutive word positions (`$`)
//! - **[query]** - Alternative phrases (`|`)
//!
//! ## Quick Start
//!
//! ```text
//! lem(love):pos({^n});spe(lovers)$spe(of)
//! ```
//!
//! Matches a noun form of the lemma *love*, or the spelling *lovers*,
//! followed immediately by *of*.
//!
//! ## Core Concepts
//!
//! ### Terms
//!
//! A term names an attribute by mnemonic and gives its value in
//! parentheses. `!` negates it, `{...}` marks the value as a regular
//! expression, and double quotes allow spaces and punctuation:
//!
//! ```text
//! spe(love)
//! !spe({^bu})
//! wtf("The Tempest")
//! pye(>=1600)
//! ```
//!
//! A bare word is shorthand for a spelling term: `love` is `spe(love)`.
//!
//! ### Precedence
//!
//! From tightest to loosest: `:` (and), `;` (or), `$` (followed by),
//! `|` (or, between whole phrases). There are no parentheses for grouping.
//!
//! ### Immutability
//!
//! Nodes are built once by the parser and never modified. Equality is
//! structural, so a query parsed from its own canonical text compares equal
//! to the original.
//!
//! ## Examples
//!
//! ### Two-word phrase
//!
//! ```text
//! spe(the)$spe(cat)
//! ```
//!
//! ### Speaker constraints
//!
//! ```text
//! lem(death):spg(f):mor(m)
//! ```
//!
//! ### Alternatives
//!
//! ```text
//! spe(thee)|spe(thou)
//! ```
pub mod tokens;
pub mod term;
pub mod term_set;
pub mod word_position;
pub mod phrase;
pub mod query;

pub use tokens::{Token, TokenKind};
pub use term::{CompareOp, Term};
pub use term_set::TermSet;
pub use word_position::WordPosition;
pub use phrase::Phrase;
pub use query::Query;
