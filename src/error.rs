//! Errors raised while lexing and parsing CQL.
//!
//! Every error aborts the parse at the point of detection. Each variant
//! carries the offending fragment, the query text consumed before it and the
//! character position, so callers can point at the problem.

use std::fmt;

/// Kinds of syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A token that cannot appear where it was found
    BadElement,
    /// End of input inside a term, before its closing `)`
    TermEndsTooSoon,
    /// A mnemonic before `(` that names no attribute
    BadTermType,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxErrorKind::BadElement => "bad element",
            SyntaxErrorKind::TermEndsTooSoon => "term ends too soon",
            SyntaxErrorKind::BadTermType => "bad term type",
        };
        f.write_str(text)
    }
}

/// Kinds of semantic error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// Categorical value that is not in the attribute's decode table
    BadCategoryValue,
    /// Attribute that needs a value was given none
    EmptyTerm,
    /// Text marked as a regex that does not compile
    BadRegex,
    /// Comparison operand that is not an integer
    BadNumber,
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SemanticErrorKind::BadCategoryValue => "bad category value",
            SemanticErrorKind::EmptyTerm => "empty mandatory term",
            SemanticErrorKind::BadRegex => "bad regular expression",
            SemanticErrorKind::BadNumber => "bad numeric value",
        };
        f.write_str(text)
    }
}

/// Errors that can occur while turning query text into an AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CqlError {
    #[error("Lexical error at position {position}: {message} (near \"{fragment}\", after \"{parsed}\")")]
    Lexical {
        message: String,
        fragment: String,
        parsed: String,
        position: usize,
    },

    #[error("Syntax error at position {position}: {kind} (near \"{fragment}\", after \"{parsed}\")")]
    Syntax {
        kind: SyntaxErrorKind,
        fragment: String,
        parsed: String,
        position: usize,
    },

    #[error("Semantic error at position {position}: {kind} (near \"{fragment}\", after \"{parsed}\")")]
    Semantic {
        kind: SemanticErrorKind,
        fragment: String,
        parsed: String,
        position: usize,
    },
}

impl CqlError {
    /// The offending piece of query text.
    pub fn fragment(&self) -> &str {
        match self {
            CqlError::Lexical { fragment, .. }
            | CqlError::Syntax { fragment, .. }
            | CqlError::Semantic { fragment, .. } => fragment,
        }
    }

    /// The query text consumed before the error.
    pub fn parsed(&self) -> &str {
        match self {
            CqlError::Lexical { parsed, .. }
            | CqlError::Syntax { parsed, .. }
            | CqlError::Semantic { parsed, .. } => parsed,
        }
    }

    /// Character offset of the error in the query text.
    pub fn position(&self) -> usize {
        match self {
            CqlError::Lexical { position, .. }
            | CqlError::Syntax { position, .. }
            | CqlError::Semantic { position, .. } => *position,
        }
    }

    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            CqlError::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn semantic_kind(&self) -> Option<SemanticErrorKind> {
        match self {
            CqlError::Semantic { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message() {
        let err = CqlError::Syntax {
            kind: SyntaxErrorKind::BadTermType,
            fragment: "xyz".into(),
            parsed: "".into(),
            position: 0,
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at position 0: bad term type (near \"xyz\", after \"\")"
        );
        assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::BadTermType));
        assert_eq!(err.semantic_kind(), None);
    }

    #[test]
    fn test_accessors() {
        let err = CqlError::Semantic {
            kind: SemanticErrorKind::BadCategoryValue,
            fragment: "x".into(),
            parsed: "spg(".into(),
            position: 4,
        };
        assert_eq!(err.fragment(), "x");
        assert_eq!(err.parsed(), "spg(");
        assert_eq!(err.position(), 4);
    }
}
