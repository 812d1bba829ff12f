//! # Attribute catalog
//!
//! The fixed table of CQL attributes. Each mnemonic (`spe`, `lem`, `pos`, ...)
//! names an [`AttributeKind`]; each kind has exactly one
//! [`AttributeDescriptor`] describing where its value lives and how its text
//! is interpreted.
//!
//! ## Field templates
//!
//! Templates name the target field relative to a word position:
//!
//! - `%w` - the position's word alias (`w0`, `w1`, ...)
//! - `%i` - the position index, used to name per-position joins (`wp%i`)
//! - `%p` - the entity prefix; the word alias followed by `.`, or empty at the
//!   first position of a shape that binds the work and work part directly
//!
//! ## Categorical values
//!
//! Four kinds take single-letter values that are stored as small integer
//! codes: speaker gender (`m`/`f`/`u`), speaker mortality (`m`/`i` or
//! `s`/`u`), verse (`y`/`n`/`u`) and narrative (`y`/`n`). Letters are
//! case-insensitive.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Semantic kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    Spelling,
    Lemma,
    PartOfSpeech,
    WordClass,
    MajorWordClass,
    Speaker,
    SpeakerGender,
    SemanticTag,
    IsVerse,
    MetricalShape,
    SpeakerMortality,
    WordPartCount,
    AuthorName,
    AuthorContemporary,
    CorpusTag,
    CorpusTitle,
    WorkTitleFull,
    WorkTitleShort,
    WorkTag,
    WorkPartTitleFull,
    WorkPartTitleShort,
    WorkPartTag,
    PublicationYearEarly,
    PublicationYearLate,
    Narrative,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 25] = [
        AttributeKind::Spelling,
        AttributeKind::Lemma,
        AttributeKind::PartOfSpeech,
        AttributeKind::WordClass,
        AttributeKind::MajorWordClass,
        AttributeKind::Speaker,
        AttributeKind::SpeakerGender,
        AttributeKind::SemanticTag,
        AttributeKind::IsVerse,
        AttributeKind::MetricalShape,
        AttributeKind::SpeakerMortality,
        AttributeKind::WordPartCount,
        AttributeKind::AuthorName,
        AttributeKind::AuthorContemporary,
        AttributeKind::CorpusTag,
        AttributeKind::CorpusTitle,
        AttributeKind::WorkTitleFull,
        AttributeKind::WorkTitleShort,
        AttributeKind::WorkTag,
        AttributeKind::WorkPartTitleFull,
        AttributeKind::WorkPartTitleShort,
        AttributeKind::WorkPartTag,
        AttributeKind::PublicationYearEarly,
        AttributeKind::PublicationYearLate,
        AttributeKind::Narrative,
    ];

    pub fn descriptor(self) -> &'static AttributeDescriptor {
        descriptor(self)
    }

    pub fn mnemonic(self) -> &'static str {
        descriptor(self).mnemonic
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Entity a field lives on. Decides which joins a position needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// The word itself, reached through the position's word alias
    Word,
    /// A morphological part of the word; needs a per-position join
    WordPart,
    /// The work containing the word
    Work,
    /// The work part containing the word
    WorkPart,
}

impl Entity {
    /// Whether a position constrained on this entity needs its own join alias.
    pub fn needs_join(self) -> bool {
        match self {
            Entity::WordPart => true,
            Entity::Word | Entity::Work | Entity::WorkPart => false,
        }
    }
}

/// One letter group of a categorical decode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeEntry {
    /// Letters accepted for this value; the first is the canonical spelling
    pub letters: &'static str,
    pub code: u8,
}

impl DecodeEntry {
    pub fn canonical(&self) -> char {
        self.letters.chars().next().unwrap_or('?')
    }

    fn accepts(&self, ch: char) -> bool {
        let lower = ch.to_ascii_lowercase();
        self.letters.chars().any(|c| c == lower)
    }
}

/// How a term's text is interpreted for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    /// Free text compared as a string or matched as a pattern
    Text,
    /// Codes drawn from a closed set supplied by the store
    ExternalCodes,
    /// Integer compared with a relational operator
    Numeric,
    /// Single letters decoded to internal integer codes
    Categorical(&'static [DecodeEntry]),
    /// Single letters decoded to codes that test whether the field is set;
    /// code 1 means the field is null
    Presence(&'static [DecodeEntry]),
}

/// Everything the compiler knows about one attribute kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub mnemonic: &'static str,
    pub kind: AttributeKind,
    pub entity: Entity,
    pub template: &'static str,
    pub domain: ValueDomain,
    pub description: &'static str,
}

/// How `%p` expands in a field template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityPrefix {
    /// Work-level fields are reached through the word alias (`w0.work...`)
    ThroughWord,
    /// Work and work part are bound in the from-list (`work...`)
    Bound,
}

impl AttributeDescriptor {
    /// Whether the term text may carry a relational operator (`>=1600`).
    pub fn operator_allowed(&self) -> bool {
        matches!(self.domain, ValueDomain::Numeric)
    }

    pub fn decode_table(&self) -> Option<&'static [DecodeEntry]> {
        match self.domain {
            ValueDomain::Categorical(table) | ValueDomain::Presence(table) => Some(table),
            ValueDomain::Text | ValueDomain::ExternalCodes | ValueDomain::Numeric => None,
        }
    }

    /// Expands the field template for one word position.
    pub fn field(&self, alias: &str, index: usize, prefix: EntityPrefix) -> String {
        let mut out = String::with_capacity(self.template.len() + 8);
        let mut chars = self.template.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('w') => out.push_str(alias),
                Some('i') => out.push_str(&index.to_string()),
                Some('p') => {
                    if prefix == EntityPrefix::ThroughWord {
                        out.push_str(alias);
                        out.push('.');
                    }
                }
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }

    /// Decodes a categorical literal: exactly one recognised letter.
    pub fn decode_literal(&self, text: &str) -> Option<u8> {
        let table = self.decode_table()?;
        let mut chars = text.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        table.iter().find(|e| e.accepts(ch)).map(|e| e.code)
    }

    /// Replaces every recognised letter in a categorical regex by its code.
    pub fn decode_pattern(&self, pattern: &str) -> String {
        let Some(table) = self.decode_table() else {
            return pattern.to_string();
        };
        pattern
            .chars()
            .map(|ch| match table.iter().find(|e| e.accepts(ch)) {
                Some(entry) => char::from(b'0' + entry.code),
                None => ch,
            })
            .collect()
    }

    /// Reverses `decode_pattern`/`decode_literal` for display.
    pub fn encode_text(&self, text: &str) -> String {
        let Some(table) = self.decode_table() else {
            return text.to_string();
        };
        text.chars()
            .map(|ch| {
                table
                    .iter()
                    .find(|e| char::from(b'0' + e.code) == ch)
                    .map(DecodeEntry::canonical)
                    .unwrap_or(ch)
            })
            .collect()
    }
}

const GENDER: &[DecodeEntry] = &[
    DecodeEntry { letters: "m", code: 0 },
    DecodeEntry { letters: "f", code: 1 },
    DecodeEntry { letters: "u", code: 2 },
];

const MORTALITY: &[DecodeEntry] = &[
    DecodeEntry { letters: "m", code: 0 },
    DecodeEntry { letters: "is", code: 1 },
    DecodeEntry { letters: "u", code: 2 },
];

const PROSODIC: &[DecodeEntry] = &[
    DecodeEntry { letters: "n", code: 0 },
    DecodeEntry { letters: "y", code: 1 },
    DecodeEntry { letters: "u", code: 2 },
];

const NARRATIVE: &[DecodeEntry] = &[
    DecodeEntry { letters: "n", code: 0 },
    DecodeEntry { letters: "y", code: 1 },
];

const fn attr(
    mnemonic: &'static str,
    kind: AttributeKind,
    entity: Entity,
    template: &'static str,
    domain: ValueDomain,
    description: &'static str,
) -> AttributeDescriptor {
    AttributeDescriptor {
        mnemonic,
        kind,
        entity,
        template,
        domain,
        description,
    }
}

// Indexed by `AttributeKind as usize`; order must follow the enum.
static DESCRIPTORS: [AttributeDescriptor; 25] = [
    attr("spe", AttributeKind::Spelling, Entity::Word, "%w.spellingInsensitive.string", ValueDomain::Text, "spelling"),
    attr("lem", AttributeKind::Lemma, Entity::WordPart, "wp%i.lemPos.lemma.tagInsensitive.string", ValueDomain::Text, "lemma"),
    attr("pos", AttributeKind::PartOfSpeech, Entity::WordPart, "wp%i.lemPos.pos.tag", ValueDomain::ExternalCodes, "part of speech"),
    attr("wc", AttributeKind::WordClass, Entity::WordPart, "wp%i.lemPos.lemma.wordClass.tag", ValueDomain::Text, "word class"),
    attr("mwc", AttributeKind::MajorWordClass, Entity::WordPart, "wp%i.lemPos.pos.majorWordClass", ValueDomain::Text, "major word class"),
    attr("spk", AttributeKind::Speaker, Entity::Word, "%w.speech.speakerName", ValueDomain::Text, "speaker name"),
    attr("spg", AttributeKind::SpeakerGender, Entity::Word, "%w.speech.gender.gender", ValueDomain::Categorical(GENDER), "speaker gender (m, f, u)"),
    attr("sem", AttributeKind::SemanticTag, Entity::Word, "%w.semanticTags", ValueDomain::Text, "semantic tag"),
    attr("vrs", AttributeKind::IsVerse, Entity::Word, "%w.prosodic.prosodic", ValueDomain::Categorical(PROSODIC), "verse (y, n, u)"),
    attr("met", AttributeKind::MetricalShape, Entity::Word, "%w.metricalShape", ValueDomain::Text, "metrical shape"),
    attr("mor", AttributeKind::SpeakerMortality, Entity::Word, "%w.speech.mortality.mortality", ValueDomain::Categorical(MORTALITY), "speaker mortality (m, i or s, u)"),
    attr("wpc", AttributeKind::WordPartCount, Entity::Word, "%w.numWordParts", ValueDomain::Numeric, "number of word parts"),
    attr("aut", AttributeKind::AuthorName, Entity::Work, "%pwork.author.name", ValueDomain::Text, "author name"),
    attr("acn", AttributeKind::AuthorContemporary, Entity::Work, "%pwork.author.contemporary", ValueDomain::Text, "author contemporary"),
    attr("cor", AttributeKind::CorpusTag, Entity::Work, "%pwork.corpus.tag", ValueDomain::Text, "corpus tag"),
    attr("ctl", AttributeKind::CorpusTitle, Entity::Work, "%pwork.corpus.title", ValueDomain::Text, "corpus title"),
    attr("wtf", AttributeKind::WorkTitleFull, Entity::Work, "%pwork.fullTitle", ValueDomain::Text, "work full title"),
    attr("wts", AttributeKind::WorkTitleShort, Entity::Work, "%pwork.shortTitle", ValueDomain::Text, "work short title"),
    attr("wtg", AttributeKind::WorkTag, Entity::Work, "%pwork.tag", ValueDomain::Text, "work tag"),
    attr("ptf", AttributeKind::WorkPartTitleFull, Entity::WorkPart, "%pworkPart.fullTitle", ValueDomain::Text, "work part full title"),
    attr("pts", AttributeKind::WorkPartTitleShort, Entity::WorkPart, "%pworkPart.shortTitle", ValueDomain::Text, "work part short title"),
    attr("ptg", AttributeKind::WorkPartTag, Entity::WorkPart, "%pworkPart.tag", ValueDomain::Text, "work part tag"),
    attr("pye", AttributeKind::PublicationYearEarly, Entity::Work, "%pwork.pubDate.startYear", ValueDomain::Numeric, "earliest publication year"),
    attr("pyl", AttributeKind::PublicationYearLate, Entity::Work, "%pwork.pubDate.endYear", ValueDomain::Numeric, "latest publication year"),
    attr("nar", AttributeKind::Narrative, Entity::Word, "%w.speech", ValueDomain::Presence(NARRATIVE), "narrative, outside any speech (y, n)"),
];

static BY_MNEMONIC: Lazy<HashMap<&'static str, AttributeKind>> = Lazy::new(|| {
    DESCRIPTORS
        .iter()
        .map(|d| (d.mnemonic, d.kind))
        .collect()
});

/// Descriptor for a kind.
pub fn descriptor(kind: AttributeKind) -> &'static AttributeDescriptor {
    &DESCRIPTORS[kind as usize]
}

/// Looks up a mnemonic, ignoring case.
pub fn resolve(mnemonic: &str) -> Option<&'static AttributeDescriptor> {
    let lower = mnemonic.to_ascii_lowercase();
    BY_MNEMONIC.get(lower.as_str()).map(|kind| descriptor(*kind))
}

/// All descriptors in catalog order.
pub fn all() -> &'static [AttributeDescriptor] {
    &DESCRIPTORS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for kind in AttributeKind::ALL {
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn test_mnemonics_round_trip() {
        for kind in AttributeKind::ALL {
            assert_eq!(resolve(kind.mnemonic()).map(|d| d.kind), Some(kind));
        }
        assert_eq!(resolve("SPE").map(|d| d.kind), Some(AttributeKind::Spelling));
        assert!(resolve("xyz").is_none());
    }

    #[test]
    fn test_field_expansion() {
        let lem = descriptor(AttributeKind::Lemma);
        assert_eq!(
            lem.field("w2", 2, EntityPrefix::ThroughWord),
            "wp2.lemPos.lemma.tagInsensitive.string"
        );
        let title = descriptor(AttributeKind::WorkTitleShort);
        assert_eq!(title.field("w1", 1, EntityPrefix::ThroughWord), "w1.work.shortTitle");
        assert_eq!(title.field("w1", 1, EntityPrefix::Bound), "work.shortTitle");
    }

    #[test]
    fn test_decode() {
        let gender = descriptor(AttributeKind::SpeakerGender);
        assert_eq!(gender.decode_literal("m"), Some(0));
        assert_eq!(gender.decode_literal("F"), Some(1));
        assert_eq!(gender.decode_literal("x"), None);
        assert_eq!(gender.decode_literal("mf"), None);
        assert_eq!(gender.decode_pattern("M|f"), "0|1");
        assert_eq!(gender.encode_text("0|1"), "m|f");

        let mortality = descriptor(AttributeKind::SpeakerMortality);
        assert_eq!(mortality.decode_literal("s"), Some(1));
        assert_eq!(mortality.decode_literal("I"), Some(1));
        assert_eq!(mortality.encode_text("1"), "i");
    }

    #[test]
    fn test_operator_flag() {
        assert!(descriptor(AttributeKind::PublicationYearEarly).operator_allowed());
        assert!(descriptor(AttributeKind::WordPartCount).operator_allowed());
        assert!(!descriptor(AttributeKind::Spelling).operator_allowed());
    }
}
