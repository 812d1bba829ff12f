//! Documentation content for cql CLI

use std::str::FromStr;

use super::CliError;
use crate::catalog::{self, ValueDomain};

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Attributes,
    Shapes,
    Errors,
}

impl FromStr for DocCategory {
    type Err = CliError;

    /// Parse category name, accepting a few aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grammar" => Ok(Self::Syntax),
            "attributes" | "attribute" | "attrs" | "mnemonics" => Ok(Self::Attributes),
            "shapes" | "shape" | "output" => Ok(Self::Shapes),
            "errors" | "error" => Ok(Self::Errors),
            _ => Err(CliError::UnknownCategory(s.to_string())),
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"CQL DOCUMENTATION

CQL describes word patterns over a tagged corpus. Each query compiles to one
query fragment per phrase; the fragments are run separately and their results
combined.

DOCUMENTATION CATEGORIES

  syntax            Terms, term sets, word positions, phrases and alternatives
  attributes        Attribute mnemonics and the values they accept
  shapes            Result shapes and the fragments they produce
  errors            Error kinds and what triggers them

QUICK REFERENCE

  spe(love)         Spelling is "love"
  love              Same as spe(love)
  !spe(love)        Spelling is not "love"
  spe({^lov})       Spelling matches the regex ^lov
  lem(love):pos(n)  Both hold (and)
  spe(a);spe(an)    Either holds (or)
  spe(the)$spe(cat) "the" immediately followed by "cat"
  spe(thee)|spe(thou)  Two alternative phrases

Run 'cql doc <category>' for detailed documentation.
Run 'cql attributes' for the full attribute table.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<String, CliError> {
    let content = match name.parse::<DocCategory>()? {
        DocCategory::Syntax => SYNTAX_DOC.to_string(),
        DocCategory::Attributes => get_attribute_listing(),
        DocCategory::Shapes => SHAPES_DOC.to_string(),
        DocCategory::Errors => ERRORS_DOC.to_string(),
    };
    Ok(content)
}

/// Attribute table generated from the catalog.
pub fn get_attribute_listing() -> String {
    let mut out = String::from("ATTRIBUTES\n\n");
    for descriptor in catalog::all() {
        let values = match descriptor.domain {
            ValueDomain::Text => "text or {regex}",
            ValueDomain::ExternalCodes => "code or {regex}",
            ValueDomain::Numeric => "[op]integer, op one of = <> < <= > >=",
            ValueDomain::Categorical(_) | ValueDomain::Presence(_) => "letter or {regex}",
        };
        out.push_str(&format!(
            "  {:<5} {:<38} {}\n",
            descriptor.mnemonic, descriptor.description, values
        ));
    }
    out
}

const SYNTAX_DOC: &str = r#"SYNTAX - Query Structure

GRAMMAR
  query      := phrase ('|' phrase)*
  phrase     := word ('$' word)*
  word       := term-set (';' term-set)*
  term-set   := term (':' term)*
  term       := ['!'] mnemonic '(' [text] ')'  |  bare-word
  text       := literal | '{' regex '}'

TERMS
  mnemonic(text)
    Tests one attribute of a word. Text is a bare word, a number, or a
    double-quoted literal. Quote text containing spaces or any of !()$:;|

    Example:
      spe(love)
      wtf("The Tempest")

  !mnemonic(text)
    Negated test.

  mnemonic({regex})
    The text is a regular expression, matched anywhere in the value.

    Example:
      spe({^bu})
      lem("{^(un|in)}")

  mnemonic()
    Empty test; constrains nothing.

  word
    A bare word on its own is a spelling test: love is spe(love).

COMBINING
  :    all terms hold for the same word       lem(love):pos(n)
  ;    any term set holds for the word         spe(a);spe(an)
  $    next word in the text                   spe(the)$spe(cat)
  |    alternative phrases                     spe(thee)|spe(thou)

  Precedence, tightest first: :  ;  $  |
"#;

const SHAPES_DOC: &str = r#"SHAPES - Result Shapes

  word         select w0.id              identifier of the first matched word
  full-word    select w0                 first matched word as an object
  work         select distinct work      each work containing a match
  work-part    select distinct workPart  each work part containing a match

Each phrase of a query compiles to its own fragment. Word positions bind
aliases w0, w1, ... tied to w0 through the successor property. Positions
testing lemma, part of speech or word class also join a word part wp<i>.
Positions that constrain nothing are left out.

Example:
  Query:    spe(the)$lem(cat)
  Fragment: select w0.id from Word w0, Word w1, WordPart wp1
            where w1 = w0.next and wp1.word = w1
            and ((w0.spellingInsensitive.string = 'the'))
            and ((wp1.lemPos.lemma.tagInsensitive.string = 'cat'))
"#;

const ERRORS_DOC: &str = r#"ERRORS - Error Kinds

LEXICAL
  unterminated string literal    "abc
  invalid escape sequence        "a\n"  (only \" and \\ are allowed)
  unexpected character           control characters

SYNTAX
  bad element                    a token where none is allowed: spe(a))
  term ends too soon             input ends inside a term: spe(a
  bad term type                  unknown mnemonic: xyz(a)

SEMANTIC
  bad category value             spg(x)  (gender takes m, f or u)
  empty mandatory term           spg()   pye()
  bad regular expression         spe({a(})
  bad numeric value              pye(soon)

Every error reports the offending text and the query text before it.
"#;
