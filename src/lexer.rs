use crate::ast::tokens::{PUNCTUATION, Token, TokenKind};
use crate::error::{CqlError, Result};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Most recently returned token, kept for `push_back`
    last: Option<Token>,
    /// Token un-read by `push_back`, returned by the next call
    pushed: Option<Token>,
    /// Set once a token other than end of input has been returned
    saw_token: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            last: None,
            pushed: None,
            saw_token: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Input text before the given character offset.
    pub fn consumed(&self, position: usize) -> String {
        self.input[..position.min(self.input.len())].iter().collect()
    }

    fn lexical_error(&self, message: impl Into<String>, start: usize) -> CqlError {
        let end = (self.position + 1).min(self.input.len());
        CqlError::Lexical {
            message: message.into(),
            fragment: self.input[start.min(end)..end].iter().collect(),
            parsed: self.consumed(start),
            position: self.position,
        }
    }

    /// Characters that may appear in a bare word.
    pub fn is_word_char(ch: char) -> bool {
        !ch.is_whitespace() && !PUNCTUATION.contains(&ch) && ch != '"' && !ch.is_control()
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(ch) => {
                            return Err(
                                self.lexical_error(format!("invalid escape sequence \\{}", ch), start)
                            );
                        }
                        None => {
                            return Err(self.lexical_error("unterminated string literal", start));
                        }
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.lexical_error("unterminated string literal", start))
    }

    fn scan(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let start = self.position;

        match self.current_char() {
            None => Ok(Token::eof(start)),
            Some(ch) if PUNCTUATION.contains(&ch) => {
                self.advance();
                Ok(Token::new(TokenKind::Punct(ch), ch.to_string(), start))
            }
            Some('"') => {
                let text = self.read_string()?;
                Ok(Token::new(TokenKind::Quoted, text, start))
            }
            Some(ch) if Self::is_word_char(ch) => {
                let word = self.read_word();
                let kind = if word.chars().all(|c| c.is_ascii_digit()) {
                    TokenKind::Number
                } else {
                    TokenKind::Word
                };
                Ok(Token::new(kind, word, start))
            }
            Some(ch) => Err(self.lexical_error(
                format!("unexpected character {:?}", ch),
                start,
            )),
        }
    }

    /// Returns the next token. End of input is reported as `TokenKind::Eof`
    /// on every call once reached.
    pub fn next_token(&mut self) -> Result<Token> {
        let token = match self.pushed.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        self.saw_token |= !token.is_eof();
        self.last = Some(token.clone());
        Ok(token)
    }

    /// True when the input has produced no token besides end of input.
    pub fn is_blank(&self) -> bool {
        !self.saw_token
    }

    /// Un-reads the most recently returned token. Only one token of
    /// push-back is kept; a second call before `next_token` is a no-op.
    pub fn push_back(&mut self) {
        if self.pushed.is_none() {
            self.pushed = self.last.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_tokens() {
        let mut lexer = Lexer::new("!spe(love)");
        assert!(lexer.next_token().unwrap().is_punct('!'));
        let word = lexer.next_token().unwrap();
        assert_eq!(word.kind, TokenKind::Word);
        assert_eq!(word.text, "spe");
        assert_eq!(word.position, 1);
        assert!(lexer.next_token().unwrap().is_punct('('));
        assert_eq!(lexer.next_token().unwrap().text, "love");
        assert!(lexer.next_token().unwrap().is_punct(')'));
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_is_blank() {
        let mut lexer = Lexer::new("  \n ");
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.is_blank());

        let mut lexer = Lexer::new(" a");
        assert!(lexer.is_blank());
        lexer.next_token().unwrap();
        lexer.push_back();
        assert!(!lexer.is_blank());
    }

    #[test]
    fn test_push_back() {
        let mut lexer = Lexer::new("a $ b");
        let first = lexer.next_token().unwrap();
        lexer.push_back();
        assert_eq!(lexer.next_token().unwrap(), first);
        assert!(lexer.next_token().unwrap().is_punct('$'));
        lexer.push_back();
        lexer.push_back();
        assert!(lexer.next_token().unwrap().is_punct('$'));
        assert_eq!(lexer.next_token().unwrap().text, "b");
    }
}
