use tracing::{debug, trace};

use crate::{
    ast::{Phrase, Query, Term, TermSet, Token, TokenKind, WordPosition, term::split_comparison},
    catalog::{self, AttributeDescriptor, AttributeKind, ValueDomain},
    error::{CqlError, Result, SemanticErrorKind, SyntaxErrorKind},
    lexer::Lexer,
};
use regex::Regex;

/// Recursive-descent parser for CQL.
///
/// The grammar is LL(1): each level reads one token past its own end to see
/// whether it continues, and pushes that token back when it does not.
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser { lexer }
    }

    fn next(&mut self) -> Result<Token> {
        self.lexer.next_token()
    }

    fn syntax_error(&self, kind: SyntaxErrorKind, token: &Token) -> CqlError {
        CqlError::Syntax {
            kind,
            fragment: token.text.clone(),
            parsed: self.lexer.consumed(token.position),
            position: token.position,
        }
    }

    fn semantic_error(&self, kind: SemanticErrorKind, token: &Token) -> CqlError {
        CqlError::Semantic {
            kind,
            fragment: token.text.clone(),
            parsed: self.lexer.consumed(token.position),
            position: token.position,
        }
    }

    /// Parse a complete query; the whole input must be consumed.
    pub fn parse_query(&mut self) -> Result<Query> {
        let mut query = Query::new(self.parse_phrase()?);

        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Punct('|') => query.push(self.parse_phrase()?),
                TokenKind::Eof => break,
                _ => return Err(self.syntax_error(SyntaxErrorKind::BadElement, &token)),
            }
        }

        Ok(query)
    }

    /// phrase := word ('$' word)*
    pub fn parse_phrase(&mut self) -> Result<Phrase> {
        let mut phrase = Phrase::new(self.parse_word_position()?);

        loop {
            let token = self.next()?;
            if token.is_punct('$') {
                phrase.push(self.parse_word_position()?);
            } else {
                self.lexer.push_back();
                break;
            }
        }

        Ok(phrase)
    }

    /// word := term-set (';' term-set)*
    pub fn parse_word_position(&mut self) -> Result<WordPosition> {
        let mut word = WordPosition::new(self.parse_term_set()?);

        loop {
            let token = self.next()?;
            if token.is_punct(';') {
                word.push(self.parse_term_set()?);
            } else {
                self.lexer.push_back();
                break;
            }
        }

        Ok(word)
    }

    /// term-set := term (':' term)*
    pub fn parse_term_set(&mut self) -> Result<TermSet> {
        let mut set = TermSet::new(self.parse_term()?);

        loop {
            let token = self.next()?;
            if token.is_punct(':') {
                set.push(self.parse_term()?);
            } else {
                self.lexer.push_back();
                break;
            }
        }

        Ok(set)
    }

    /// term := ['!'] mnemonic '(' [text] ')' | bare-word
    pub fn parse_term(&mut self) -> Result<Term> {
        let mut token = self.next()?;
        let negate = token.is_punct('!');
        if negate {
            token = self.next()?;
        }

        match token.kind {
            TokenKind::Word => {
                let after = self.next()?;
                if after.is_punct('(') {
                    let descriptor = catalog::resolve(&token.text)
                        .ok_or_else(|| self.syntax_error(SyntaxErrorKind::BadTermType, &token))?;
                    self.parse_payload(descriptor, negate)
                } else {
                    // A bare word is a spelling match
                    self.lexer.push_back();
                    self.build_term(catalog::descriptor(AttributeKind::Spelling), &token, negate)
                }
            }
            TokenKind::Eof if self.lexer.is_blank() => {
                Err(self.syntax_error(SyntaxErrorKind::BadElement, &token))
            }
            TokenKind::Eof => Err(self.syntax_error(SyntaxErrorKind::TermEndsTooSoon, &token)),
            _ => Err(self.syntax_error(SyntaxErrorKind::BadElement, &token)),
        }
    }

    /// Everything after `mnemonic(`, including the closing `)`.
    fn parse_payload(&mut self, descriptor: &'static AttributeDescriptor, negate: bool) -> Result<Term> {
        let token = self.next()?;

        if token.is_punct(')') {
            let empty = Token::new(TokenKind::Word, "", token.position);
            return self.build_term(descriptor, &empty, negate);
        }

        match token.kind {
            _ if token.is_text() => {
                let term = self.build_term(descriptor, &token, negate)?;
                let close = self.next()?;
                match close.kind {
                    TokenKind::Punct(')') => Ok(term),
                    TokenKind::Eof => {
                        Err(self.syntax_error(SyntaxErrorKind::TermEndsTooSoon, &close))
                    }
                    _ => Err(self.syntax_error(SyntaxErrorKind::BadElement, &close)),
                }
            }
            TokenKind::Eof => Err(self.syntax_error(SyntaxErrorKind::TermEndsTooSoon, &token)),
            _ => Err(self.syntax_error(SyntaxErrorKind::BadElement, &token)),
        }
    }

    /// Validates a term's text against its attribute and builds the term.
    fn build_term(
        &self,
        descriptor: &'static AttributeDescriptor,
        token: &Token,
        negate: bool,
    ) -> Result<Term> {
        let raw = token.text.as_str();
        let (text, regex) = strip_regex_markers(raw);

        let mut term = Term::new(descriptor.kind, text);
        term.negate = negate;
        term.regex = regex && !text.is_empty();

        match descriptor.domain {
            _ if descriptor.operator_allowed() => {
                if term.is_empty() {
                    return Err(self.semantic_error(SemanticErrorKind::EmptyTerm, token));
                }
                if term.regex || split_comparison(&term.text).is_none() {
                    return Err(self.semantic_error(SemanticErrorKind::BadNumber, token));
                }
                term.text = term.text.trim().to_string();
            }
            ValueDomain::Categorical(_) | ValueDomain::Presence(_) => {
                if term.is_empty() {
                    return Err(self.semantic_error(SemanticErrorKind::EmptyTerm, token));
                }
                if term.regex {
                    term.text = descriptor.decode_pattern(&term.text);
                    self.check_regex(&term.text, token)?;
                } else {
                    let code = descriptor
                        .decode_literal(&term.text)
                        .ok_or_else(|| self.semantic_error(SemanticErrorKind::BadCategoryValue, token))?;
                    term.text = code.to_string();
                }
            }
            _ => {
                if term.regex {
                    self.check_regex(&term.text, token)?;
                }
            }
        }

        trace!(term = %term, "parsed term");
        Ok(term)
    }

    fn check_regex(&self, pattern: &str, token: &Token) -> Result<()> {
        Regex::new(pattern)
            .map(|_| ())
            .map_err(|_| self.semantic_error(SemanticErrorKind::BadRegex, token))
    }
}

/// Splits `{pattern}` into `(pattern, true)`; other text is returned as is.
fn strip_regex_markers(text: &str) -> (&str, bool) {
    match text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        Some(inner) => (inner, true),
        None => (text, false),
    }
}

/// Parses CQL text into a query.
pub fn parse(input: &str) -> Result<Query> {
    let mut parser = Parser::new(Lexer::new(input));
    let query = parser.parse_query()?;
    debug!(
        input,
        phrases = query.phrases().len(),
        "parsed query"
    );
    Ok(query)
}
