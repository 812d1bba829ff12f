use std::fmt;

use crate::ast::Term;
use crate::codegen::PredicateScope;

/// Terms that must all hold at one word position (`:`-separated).
///
/// # Example
/// ```text
/// lem(love):pos(n)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermSet {
    terms: Vec<Term>,
}

impl TermSet {
    pub fn new(first: Term) -> Self {
        TermSet { terms: vec![first] }
    }

    /// Adds a term, ignoring structural duplicates.
    pub fn push(&mut self, term: Term) {
        if !self.terms.contains(&term) {
            self.terms.push(term);
        }
    }

    pub fn with(mut self, term: Term) -> Self {
        self.push(term);
        self
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.iter().all(Term::is_empty)
    }

    pub fn needs_join(&self) -> bool {
        self.terms.iter().any(Term::needs_join)
    }

    /// AND of the terms' predicates, parenthesized; empty when every term is.
    pub fn to_predicate(&self, scope: &PredicateScope<'_>) -> String {
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|t| t.to_predicate(scope))
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("({})", parts.join(" and "))
        }
    }
}

impl From<Term> for TermSet {
    fn from(term: Term) -> Self {
        TermSet::new(term)
    }
}

impl fmt::Display for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}
