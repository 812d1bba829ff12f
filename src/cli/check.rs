//! Validate CQL queries

use super::CliError;
use crate::{Query, parse};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The CQL query to validate
    pub query: String,
    /// Print the parsed structure instead of the canonical text
    pub tree: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Query is valid; canonical text attached
    Canonical(String),
    /// Query is valid; indented tree attached
    Tree(String),
}

/// Indented outline of a query: phrases, word positions, term sets, terms.
fn outline(query: &Query) -> String {
    let mut out = String::new();
    for (p, phrase) in query.phrases().iter().enumerate() {
        out.push_str(&format!("phrase {}\n", p));
        for (w, word) in phrase.words().iter().enumerate() {
            out.push_str(&format!("  word {}\n", w));
            for (s, set) in word.term_sets().iter().enumerate() {
                out.push_str(&format!("    set {}\n", s));
                for term in set.terms() {
                    out.push_str(&format!(
                        "      {}{} {:?}{}\n",
                        if term.negate { "not " } else { "" },
                        term.kind.mnemonic(),
                        term.text,
                        if term.regex { " (regex)" } else { "" }
                    ));
                }
            }
        }
    }
    out
}

/// Execute a cql check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = parse(options.query.trim())?;
    if options.tree {
        Ok(CheckResult::Tree(outline(&query)))
    } else {
        Ok(CheckResult::Canonical(query.to_canonical_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical() {
        let options = CheckOptions {
            query: " love $ SPG(M) ".into(),
            tree: false,
        };
        match execute_check(&options).unwrap() {
            CheckResult::Canonical(text) => assert_eq!(text, "spe(love)$spg(m)"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tree() {
        let options = CheckOptions {
            query: "!spe({^bu})".into(),
            tree: true,
        };
        match execute_check(&options).unwrap() {
            CheckResult::Tree(text) => {
                assert!(text.contains("      not spe \"^bu\" (regex)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error() {
        let options = CheckOptions {
            query: "xyz(a)".into(),
            tree: false,
        };
        assert!(matches!(execute_check(&options), Err(CliError::Parse(_))));
    }
}
