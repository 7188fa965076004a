//! Core value types for the dictionary engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Part of speech of a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarKind {
    Noun,
    Pronoun,
    Adjective,
    Article,
    Conjunction,
    Preposition,
    Verb,
    Adverb,
    AnaphoricPronoun,
}

impl GrammarKind {
    /// The token used for this part of speech in dictionary files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Pronoun => "pr",
            Self::Adjective => "adj",
            Self::Article => "art",
            Self::Conjunction => "conj",
            Self::Preposition => "prep",
            Self::Verb => "v",
            Self::Adverb => "adv",
            Self::AnaphoricPronoun => "anpr",
        }
    }

    /// Parse a dictionary file token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "n" => Some(Self::Noun),
            "pr" => Some(Self::Pronoun),
            "adj" => Some(Self::Adjective),
            "art" => Some(Self::Article),
            "conj" => Some(Self::Conjunction),
            "prep" => Some(Self::Preposition),
            "v" => Some(Self::Verb),
            "adv" => Some(Self::Adverb),
            "anpr" => Some(Self::AnaphoricPronoun),
            _ => None,
        }
    }
}

/// Grammatical tag carried by a word: gender, number, case, a non-finite verb
/// form, a verb stem, or the idiom marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    Masculine,
    Feminine,
    Singular,
    Dual,
    Plural,
    Nominative,
    Genitive,
    Accusative,
    Infinitive,
    GStem,
    Idiom,
}

impl WordClass {
    /// The token used for this class in dictionary files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Masculine => "m",
            Self::Feminine => "f",
            Self::Singular => "s",
            Self::Dual => "dual",
            Self::Plural => "pl",
            Self::Nominative => "nom",
            Self::Genitive => "gen",
            Self::Accusative => "acc",
            Self::Infinitive => "inf",
            Self::GStem => "G",
            Self::Idiom => "id",
        }
    }

    /// Parse a dictionary file token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "m" => Some(Self::Masculine),
            "f" => Some(Self::Feminine),
            "s" => Some(Self::Singular),
            "dual" => Some(Self::Dual),
            "pl" => Some(Self::Plural),
            "nom" => Some(Self::Nominative),
            "gen" => Some(Self::Genitive),
            "acc" => Some(Self::Accusative),
            "inf" => Some(Self::Infinitive),
            "G" => Some(Self::GStem),
            "id" => Some(Self::Idiom),
            _ => None,
        }
    }
}

/// Kind of a cross-reference between word forms.
///
/// The `*Of` kinds can be declared in dictionary files and point from a
/// derived form back at its base (a preterite at its infinitive, a genitive
/// at its nominative, and so on). The `Has*` kinds are the reciprocals,
/// filled in by the resolver after the whole file has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordRelationKind {
    PreteriteOf,
    VerbalAdjOf,
    SubstOf,
    BoundFormOf,
    GenitiveOf,
    AccusativeOf,
    DativeOf,
    HasPreterite,
    HasVerbalAdj,
    HasSubst,
    HasBoundForm,
    HasGenitive,
    HasAccusative,
    HasDative,
}

impl WordRelationKind {
    /// Parse a declared-relation token from a dictionary file. Derived kinds
    /// have no tokens; they only ever come from the resolver.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pret" => Some(Self::PreteriteOf),
            "va" => Some(Self::VerbalAdjOf),
            "subst" => Some(Self::SubstOf),
            "bound" => Some(Self::BoundFormOf),
            "gen" => Some(Self::GenitiveOf),
            "acc" => Some(Self::AccusativeOf),
            "dat" => Some(Self::DativeOf),
            _ => None,
        }
    }

    /// The derived counterpart of a declared relation.
    pub fn reciprocal(self) -> Option<Self> {
        match self {
            Self::PreteriteOf => Some(Self::HasPreterite),
            Self::VerbalAdjOf => Some(Self::HasVerbalAdj),
            Self::SubstOf => Some(Self::HasSubst),
            Self::BoundFormOf => Some(Self::HasBoundForm),
            Self::GenitiveOf => Some(Self::HasGenitive),
            Self::AccusativeOf => Some(Self::HasAccusative),
            Self::DativeOf => Some(Self::HasDative),
            _ => None,
        }
    }

    /// Display label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::PreteriteOf => "pret of",
            Self::VerbalAdjOf => "verbal adj of",
            Self::SubstOf => "subst of",
            Self::BoundFormOf => "bound form of",
            Self::GenitiveOf => "gen of",
            Self::AccusativeOf => "acc of",
            Self::DativeOf => "dat of",
            Self::HasPreterite => "preterite",
            Self::HasVerbalAdj => "verbal adj",
            Self::HasSubst => "substantivized",
            Self::HasBoundForm => "bound form",
            Self::HasGenitive => "genitive",
            Self::HasAccusative => "accusative",
            Self::HasDative => "dative",
        }
    }
}

/// A cross-reference from one headword to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRelation {
    pub kind: WordRelationKind,
    pub word: String,
}

impl WordRelation {
    pub fn new(kind: WordRelationKind, word: impl Into<String>) -> Self {
        Self {
            kind,
            word: word.into(),
        }
    }
}

/// One sense of a headword: its grammatical tags, definitions in the other
/// language, part of speech and cross-references.
///
/// `word_classes` is kept sorted and deduplicated so that two entries with
/// the same semantic class set compare equal and can be merged cheaply.
/// `definitions` preserves insertion order with duplicates removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub word_classes: Vec<WordClass>,
    pub definitions: Vec<String>,
    pub grammar_kind: GrammarKind,
    pub relations: Vec<WordRelation>,
}

impl Entry {
    pub fn new(
        word_classes: Vec<WordClass>,
        definitions: Vec<String>,
        grammar_kind: GrammarKind,
        relations: Vec<WordRelation>,
    ) -> Self {
        let mut classes = word_classes;
        classes.sort();
        classes.dedup();

        let mut defns: Vec<String> = Vec::with_capacity(definitions.len());
        for defn in definitions {
            if !defns.contains(&defn) {
                defns.push(defn);
            }
        }

        let mut rels: Vec<WordRelation> = Vec::with_capacity(relations.len());
        for rel in relations {
            if !rels.contains(&rel) {
                rels.push(rel);
            }
        }
        rels.sort_by_key(|r| r.kind);

        Self {
            word_classes: classes,
            definitions: defns,
            grammar_kind,
            relations: rels,
        }
    }

    /// Insert a relation unless an identical (kind, word) pair is present,
    /// keeping the list sorted by kind.
    pub fn add_relation(&mut self, rel: WordRelation) {
        if self.relations.contains(&rel) {
            return;
        }
        let at = self.relations.partition_point(|r| r.kind <= rel.kind);
        self.relations.insert(at, rel);
    }

    /// True if every given class is carried by this entry.
    pub fn has_word_classes(&self, classes: &[WordClass]) -> bool {
        classes.iter().all(|c| self.word_classes.contains(c))
    }

    /// True if the given text is one of this entry's definitions.
    pub fn has_definition(&self, text: &str) -> bool {
        self.definitions.iter().any(|d| d == text)
    }

    /// True if the entry carries at least one relation of the given kind.
    pub fn has_relation_kind(&self, kind: WordRelationKind) -> bool {
        self.relations.iter().any(|r| r.kind == kind)
    }

    /// Two senses merge iff they agree on part of speech and class set.
    pub fn can_merge(&self, other: &Entry) -> bool {
        self.grammar_kind == other.grammar_kind && self.word_classes == other.word_classes
    }

    /// Union of two mergeable senses: definitions keep first-occurrence
    /// order, relations are deduplicated by (kind, word).
    pub fn merge(&self, other: &Entry) -> Entry {
        let mut merged = self.clone();

        for defn in &other.definitions {
            if !merged.definitions.contains(defn) {
                merged.definitions.push(defn.clone());
            }
        }

        for rel in &other.relations {
            merged.add_relation(rel.clone());
        }

        merged
    }

    /// Parenthesized attribute label, e.g. `(n; m, s, nom)`.
    pub fn attr_label(&self) -> String {
        let mut out = format!("({}", self.grammar_kind.as_str());

        if !self.word_classes.is_empty() {
            out.push_str("; ");
            let classes: Vec<&str> = self.word_classes.iter().map(|c| c.as_str()).collect();
            out.push_str(&classes.join(", "));
        }

        out.push(')');
        out
    }

    /// Multi-line display block for one sense: headword, attributes,
    /// definitions, then relations bucketed by kind.
    pub fn summary(&self, word: &str) -> String {
        let mut out = format!("{} {}:\n", word, self.attr_label());
        out.push_str(&self.definitions.join(", "));
        out.push('\n');

        let mut buckets: BTreeMap<WordRelationKind, Vec<&str>> = BTreeMap::new();
        for rel in &self.relations {
            buckets.entry(rel.kind).or_default().push(&rel.word);
        }

        for (kind, words) in buckets {
            out.push_str(&format!("{}: {}\n", kind.label(), words.join(", ")));
        }

        out
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attr_label(), self.definitions.join(", "))
    }
}

/// Search configuration used by lookup shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSettings {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Queries up to this many characters use prefix search; longer queries
    /// use edit-distance search with this as the maximum distance.
    pub cutoff: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            limit: 15,
            cutoff: 4,
        }
    }
}
