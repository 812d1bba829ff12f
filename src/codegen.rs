//! Query fragment generation.
//!
//! Compiles a parsed [`Query`] into one relational query fragment per
//! phrase. Fragments are independent; the executor runs each one and unions
//! the results.
//!
//! A phrase of N word positions binds aliases `w0 .. wN-1`. Position `i` is
//! tied to position 0 by following the successor property `i` times
//! (`w2 = w0.next.next`). Positions that test a word-part attribute (lemma,
//! part of speech, word class) also get a `WordPart wp{i}` join bound by
//! `wp{i}.word = w{i}`. A position that contributes neither a predicate nor a
//! join is left out of the fragment altogether.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ast::{Phrase, Query};
use crate::catalog::EntityPrefix;

/// Quotes text as a string literal of the target query language.
///
/// This is the only place literal text is escaped.
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Result granularity of a compiled fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultShape {
    /// Identifier of the first word of each match
    #[default]
    #[serde(rename = "word")]
    WordId,
    /// The first word of each match as a full object
    #[serde(rename = "full-word")]
    FullWord,
    /// Each distinct work containing a match
    #[serde(rename = "work")]
    DistinctWork,
    /// Each distinct work part containing a match
    #[serde(rename = "work-part")]
    DistinctWorkPart,
}

impl ResultShape {
    pub const ALL: [ResultShape; 4] = [
        ResultShape::WordId,
        ResultShape::FullWord,
        ResultShape::DistinctWork,
        ResultShape::DistinctWorkPart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResultShape::WordId => "word",
            ResultShape::FullWord => "full-word",
            ResultShape::DistinctWork => "work",
            ResultShape::DistinctWorkPart => "work-part",
        }
    }

    /// Distinct shapes bind work and work part in the from-list.
    pub fn binds_work(self) -> bool {
        matches!(self, ResultShape::DistinctWork | ResultShape::DistinctWorkPart)
    }

    /// How `%p` expands at word position `index`. The bound `work` and
    /// `workPart` belong to `w0`; later positions reach their own through
    /// their word alias.
    pub fn entity_prefix(self, index: usize) -> EntityPrefix {
        if self.binds_work() && index == 0 {
            EntityPrefix::Bound
        } else {
            EntityPrefix::ThroughWord
        }
    }
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResultShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "word" | "word-id" | "id" => Ok(ResultShape::WordId),
            "full-word" | "full" | "object" => Ok(ResultShape::FullWord),
            "work" | "distinct-work" => Ok(ResultShape::DistinctWork),
            "work-part" | "part" | "distinct-work-part" => Ok(ResultShape::DistinctWorkPart),
            other => Err(format!(
                "unknown result shape '{}' (expected word, full-word, work or work-part)",
                other
            )),
        }
    }
}

/// Entity names and the successor property of the target store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub word: String,
    pub word_part: String,
    pub work: String,
    pub work_part: String,
    /// Property leading from a word to the next word in the text
    pub successor: String,
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            word: "Word".to_string(),
            word_part: "WordPart".to_string(),
            work: "Work".to_string(),
            work_part: "WorkPart".to_string(),
            successor: "next".to_string(),
        }
    }
}

/// Where a term's predicate is being generated.
#[derive(Debug, Clone, Copy)]
pub struct PredicateScope<'a> {
    /// Word alias of the position (`w0`, `w1`, ...)
    pub alias: &'a str,
    /// Position index within the phrase
    pub index: usize,
    pub prefix: EntityPrefix,
    /// Valid part-of-speech codes; empty when the store supplied none
    pub pos_codes: &'a BTreeSet<String>,
}

/// One generated query fragment, covering a single phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFragment {
    /// Index of the phrase in the query
    pub phrase: usize,
    pub shape: ResultShape,
    /// Word aliases bound by the fragment
    pub word_aliases: Vec<String>,
    /// Word-part join aliases bound by the fragment
    pub part_aliases: Vec<String>,
    pub text: String,
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compiles queries against a schema and part-of-speech code set.
#[derive(Debug, Clone, Default)]
pub struct Codegen {
    schema: Schema,
    pos_codes: BTreeSet<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Part-of-speech codes used to expand part-of-speech patterns into
    /// membership tests.
    pub fn with_pos_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pos_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn pos_codes(&self) -> &BTreeSet<String> {
        &self.pos_codes
    }

    /// Compiles every phrase of `query`, in order.
    pub fn compile(
        &self,
        query: &Query,
        shape: ResultShape,
        filter: Option<&str>,
    ) -> Vec<QueryFragment> {
        let fragments: Vec<QueryFragment> = query
            .phrases()
            .iter()
            .enumerate()
            .map(|(i, phrase)| self.compile_phrase(i, phrase, shape, filter))
            .collect();
        debug!(
            shape = %shape,
            fragments = fragments.len(),
            "compiled query"
        );
        fragments
    }

    /// Compiles one phrase into a fragment.
    pub fn compile_phrase(
        &self,
        index: usize,
        phrase: &Phrase,
        shape: ResultShape,
        filter: Option<&str>,
    ) -> QueryFragment {
        let schema = &self.schema;

        let mut from = Vec::new();
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();
        let mut predicates = Vec::new();
        let mut word_aliases = Vec::new();
        let mut part_aliases = Vec::new();

        if let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) {
            conditions.push(format!("({})", filter));
        }

        if shape.binds_work() {
            from.push(format!("{} work", schema.work));
            from.push(format!("{} workPart", schema.work_part));
            conditions.push("w0.work = work".to_string());
            conditions.push("w0.workPart = workPart".to_string());
        }

        for (i, word) in phrase.words().iter().enumerate() {
            let alias = format!("w{}", i);
            let scope = PredicateScope {
                alias: &alias,
                index: i,
                prefix: shape.entity_prefix(i),
                pos_codes: &self.pos_codes,
            };
            let predicate = word.to_predicate(&scope);
            let join = word.needs_join();

            if i > 0 && predicate.is_empty() && !join {
                trace!(position = i, "position constrains nothing, elided");
                continue;
            }

            from.push(format!("{} {}", schema.word, alias));
            if i > 0 {
                let hops = format!(".{}", schema.successor).repeat(i);
                bindings.push(format!("{} = w0{}", alias, hops));
            }
            if join {
                let part = format!("wp{}", i);
                from.push(format!("{} {}", schema.word_part, part));
                bindings.push(format!("{}.word = {}", part, alias));
                part_aliases.push(part);
            }
            if !predicate.is_empty() {
                predicates.push(predicate);
            }
            word_aliases.push(alias);
        }

        conditions.extend(bindings);
        conditions.extend(predicates);

        let select = match shape {
            ResultShape::WordId => "select w0.id",
            ResultShape::FullWord => "select w0",
            ResultShape::DistinctWork => "select distinct work",
            ResultShape::DistinctWorkPart => "select distinct workPart",
        };

        let mut text = format!("{} from {}", select, from.join(", "));
        if !conditions.is_empty() {
            text.push_str(" where ");
            text.push_str(&conditions.join(" and "));
        }
        trace!(phrase = index, fragment = %text, "compiled phrase");

        QueryFragment {
            phrase: index,
            shape,
            word_aliases,
            part_aliases,
            text,
        }
    }
}
