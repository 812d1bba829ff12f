use std::fmt;

use crate::ast::Phrase;

/// Complete CQL query: alternative phrases (`|`-separated).
///
/// Each phrase compiles to its own fragment; the caller unions the results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    phrases: Vec<Phrase>,
}

impl Query {
    pub fn new(first: Phrase) -> Self {
        Query {
            phrases: vec![first],
        }
    }

    pub fn push(&mut self, phrase: Phrase) {
        self.phrases.push(phrase);
    }

    pub fn or(mut self, phrase: impl Into<Phrase>) -> Self {
        self.push(phrase.into());
        self
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Canonical CQL text. Parsing it yields an equal query.
    pub fn to_canonical_text(&self) -> String {
        self.to_string()
    }
}

impl From<Phrase> for Query {
    fn from(phrase: Phrase) -> Self {
        Query::new(phrase)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phrase) in self.phrases.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", phrase)?;
        }
        Ok(())
    }
}
