use std::fmt;

use crate::ast::{Term, TermSet};
use crate::codegen::PredicateScope;

/// Alternative term sets for one corpus position (`;`-separated).
///
/// # Example
/// ```text
/// lem(love):pos(n);spe(lovers)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordPosition {
    sets: Vec<TermSet>,
}

impl WordPosition {
    pub fn new(first: TermSet) -> Self {
        WordPosition { sets: vec![first] }
    }

    /// Adds an alternative, ignoring structural duplicates.
    pub fn push(&mut self, set: TermSet) {
        if !self.sets.contains(&set) {
            self.sets.push(set);
        }
    }

    pub fn or(mut self, set: impl Into<TermSet>) -> Self {
        self.push(set.into());
        self
    }

    pub fn term_sets(&self) -> &[TermSet] {
        &self.sets
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.sets.iter().flat_map(|s| s.terms().iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(TermSet::is_empty)
    }

    /// Whether any non-empty term here lives on the word-part entity.
    pub fn needs_join(&self) -> bool {
        self.sets.iter().any(TermSet::needs_join)
    }

    /// OR of the term sets' predicates, parenthesized; empty when every set
    /// is.
    pub fn to_predicate(&self, scope: &PredicateScope<'_>) -> String {
        let parts: Vec<String> = self
            .sets
            .iter()
            .map(|s| s.to_predicate(scope))
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("({})", parts.join(" or "))
        }
    }
}

impl From<TermSet> for WordPosition {
    fn from(set: TermSet) -> Self {
        WordPosition::new(set)
    }
}

impl From<Term> for WordPosition {
    fn from(term: Term) -> Self {
        WordPosition::new(TermSet::new(term))
    }
}

impl fmt::Display for WordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}", set)?;
        }
        Ok(())
    }
}
