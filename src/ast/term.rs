use std::fmt;

use regex::Regex;

use crate::catalog::{self, AttributeDescriptor, AttributeKind, ValueDomain};
use crate::codegen::{PredicateScope, quote_literal};
use crate::lexer::Lexer;

/// A single attribute test on one word position.
///
/// # Examples
/// ```text
/// spe(love)
/// !spe({^bu})
/// lem("to be")
/// spg(m)
/// pye(>=1600)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub kind: AttributeKind,

    /// Literal or pattern text. Regex markers are already stripped and
    /// categorical letters already decoded to their codes.
    pub text: String,

    pub negate: bool,

    pub regex: bool,
}

/// Relational operators accepted by numeric attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }
}

/// Splits numeric term text such as `>=1600` into operator and operand.
/// A missing operator means equality.
pub fn split_comparison(text: &str) -> Option<(CompareOp, i64)> {
    let text = text.trim();
    let op_len = text
        .find(|c: char| !matches!(c, '<' | '>' | '=' | '!'))
        .unwrap_or(text.len());
    let (op, operand) = text.split_at(op_len);
    let op = match op {
        "" | "=" | "==" => CompareOp::Eq,
        "<>" | "!=" => CompareOp::NotEq,
        "<" => CompareOp::Lt,
        "<=" => CompareOp::LtEq,
        ">" => CompareOp::Gt,
        ">=" => CompareOp::GtEq,
        _ => return None,
    };
    let value = operand.trim().parse::<i64>().ok()?;
    Some((op, value))
}

impl Term {
    pub fn new(kind: AttributeKind, text: impl Into<String>) -> Self {
        Term {
            kind,
            text: text.into(),
            negate: false,
            regex: false,
        }
    }

    /// Shorthand for a spelling match, what a bare word means.
    pub fn spelling(text: impl Into<String>) -> Self {
        Term::new(AttributeKind::Spelling, text)
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn as_regex(mut self) -> Self {
        self.regex = true;
        self
    }

    pub fn descriptor(&self) -> &'static AttributeDescriptor {
        catalog::descriptor(self.kind)
    }

    /// True when the term constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this term needs the position's word-part join.
    pub fn needs_join(&self) -> bool {
        !self.is_empty() && self.descriptor().entity.needs_join()
    }

    /// Generates the predicate for this term at one word position.
    ///
    /// Returns an empty string for a term that constrains nothing.
    pub fn to_predicate(&self, scope: &PredicateScope<'_>) -> String {
        if self.is_empty() {
            return String::new();
        }

        let descriptor = self.descriptor();
        let field = descriptor.field(scope.alias, scope.index, scope.prefix);

        match descriptor.domain {
            ValueDomain::Numeric => self.comparison(&field),
            ValueDomain::Presence(table) => {
                let codes: Vec<u8> = table.iter().map(|e| e.code).collect();
                self.presence(&field, &codes)
            }
            ValueDomain::Categorical(table) => {
                if self.regex {
                    let codes: Vec<String> = table.iter().map(|e| e.code.to_string()).collect();
                    self.membership(&field, &codes, false)
                } else {
                    self.equality(&field, self.text.clone())
                }
            }
            ValueDomain::ExternalCodes if self.regex && !scope.pos_codes.is_empty() => {
                let codes: Vec<String> = scope.pos_codes.iter().cloned().collect();
                self.membership(&field, &codes, true)
            }
            ValueDomain::ExternalCodes | ValueDomain::Text => {
                if self.regex {
                    self.pattern(&field)
                } else {
                    self.equality(&field, quote_literal(&self.text))
                }
            }
        }
    }

    fn comparison(&self, field: &str) -> String {
        // Text is validated by the parser; a hand-built term that fails to
        // split is compared verbatim as an equality.
        let predicate = match split_comparison(&self.text) {
            Some((op, value)) => format!("{} {} {}", field, op.as_str(), value),
            None => format!("{} = {}", field, quote_literal(&self.text)),
        };
        if self.negate {
            format!("NOT ({})", predicate)
        } else {
            predicate
        }
    }

    fn equality(&self, field: &str, value: String) -> String {
        let op = if self.negate { "<>" } else { "=" };
        format!("{} {} {}", field, op, value)
    }

    fn pattern(&self, field: &str) -> String {
        let predicate = format!("match({}, {}) <> 0", field, quote_literal(&self.text));
        if self.negate {
            format!("NOT ({})", predicate)
        } else {
            predicate
        }
    }

    /// Codes from `codes` the term's pattern matches.
    fn matching<'c>(&self, codes: &'c [String]) -> Option<Vec<&'c String>> {
        let re = Regex::new(&self.text).ok()?;
        Some(codes.iter().filter(|c| re.is_match(c)).collect())
    }

    fn membership(&self, field: &str, codes: &[String], quoted: bool) -> String {
        let Some(matched) = self.matching(codes) else {
            return self.pattern(field);
        };
        if matched.is_empty() {
            return if self.negate {
                String::new()
            } else {
                "1 = 0".to_string()
            };
        }
        let list: Vec<String> = matched
            .into_iter()
            .map(|c| if quoted { quote_literal(c) } else { c.clone() })
            .collect();
        let op = if self.negate { "NOT IN" } else { "IN" };
        format!("{} {} ({})", field, op, list.join(", "))
    }

    fn presence(&self, field: &str, codes: &[u8]) -> String {
        let mut selected: Vec<u8> = if self.regex {
            let names: Vec<String> = codes.iter().map(u8::to_string).collect();
            match self.matching(&names) {
                Some(matched) => matched.iter().filter_map(|c| c.parse().ok()).collect(),
                None => Vec::new(),
            }
        } else {
            self.text.parse::<u8>().into_iter().collect()
        };
        if self.negate {
            selected = codes.iter().copied().filter(|c| !selected.contains(c)).collect();
        }

        let absent = selected.contains(&1);
        let present = selected.contains(&0);
        match (absent, present) {
            (true, true) => String::new(),
            (true, false) => format!("{} is null", field),
            (false, true) => format!("{} is not null", field),
            (false, false) => "1 = 0".to_string(),
        }
    }

    fn display_text(&self) -> String {
        let text = self.descriptor().encode_text(&self.text);
        let text = if self.regex {
            format!("{{{}}}", text)
        } else {
            text
        };
        if text.chars().all(Lexer::is_word_char) {
            text
        } else {
            let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{}\"", escaped)
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            f.write_str("!")?;
        }
        write!(f, "{}({})", self.kind.mnemonic(), self.display_text())
    }
}
