/// Lexical token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word
    ///
    /// Any run of characters that are not whitespace, punctuation or `"`.
    /// Regex markers and comparison operators are ordinary word characters.
    ///
    /// # Examples
    /// ```text
    /// love
    /// {^bu}
    /// >=1600
    /// ```
    Word,

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "to be"
    /// "{^(un|in)}"
    /// ```
    Quoted,

    /// Run of ASCII digits
    ///
    /// # Examples
    /// ```text
    /// 2
    /// 1600
    /// ```
    Number,

    /// Single punctuation character
    ///
    /// One of `!` (negate), `(` `)` (term payload), `$` (next word),
    /// `:` (and), `;` (or, within a word) and `|` (or, between phrases).
    Punct(char),

    /// End of input
    Eof,
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,

    /// Token text. Quoted literals hold their unescaped contents.
    pub text: String,

    /// Character offset of the token's first character
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Token::new(TokenKind::Eof, "", position)
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct(ch)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True for tokens that can carry a term's text.
    pub fn is_text(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Word | TokenKind::Quoted | TokenKind::Number
        )
    }
}

/// Punctuation characters recognised by the lexer.
pub const PUNCTUATION: [char; 7] = ['!', '(', ')', '$', ':', ';', '|'];
