use std::fmt;

use crate::ast::WordPosition;

/// Word positions matching consecutive corpus words (`$`-separated).
///
/// # Example
/// ```text
/// spe(the)$pos({^n})
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase {
    words: Vec<WordPosition>,
}

impl Phrase {
    pub fn new(first: WordPosition) -> Self {
        Phrase { words: vec![first] }
    }

    pub fn push(&mut self, word: WordPosition) {
        self.words.push(word);
    }

    pub fn then(mut self, word: impl Into<WordPosition>) -> Self {
        self.push(word.into());
        self
    }

    pub fn words(&self) -> &[WordPosition] {
        &self.words
    }

    /// Number of consecutive corpus positions the phrase binds.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<WordPosition> for Phrase {
    fn from(word: WordPosition) -> Self {
        Phrase::new(word)
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str("$")?;
            }
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}
