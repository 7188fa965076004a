//! The bidirectional dictionary index.
//!
//! Built once from a word list, then read-only: every query borrows the
//! index immutably except for the random samplers, which advance the
//! dictionary's own RNG.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::parser::{self, RawRecord};
use crate::resolver::{self, PendingRelations};
use crate::types::{Entry, GrammarKind, WordClass, WordRelationKind};

/// Sentinel text returned by [`Dictionary::summary`] for absent headwords.
pub const UNKNOWN_WORD: &str = "Unknown word";

/// Akkadian/English dictionary with bidirectional lookup.
///
/// Each headword maps to a list of senses, since one word may have several
/// unrelated readings (an adjective and its substantivized noun, say). The
/// key lists preserve insertion order and back the uniform-random headword
/// samplers; note that sampling is uniform over headwords, not over senses.
#[derive(Debug)]
pub struct Dictionary {
    akk_to_engl: HashMap<String, Vec<Entry>>,
    engl_to_akk: HashMap<String, Vec<Entry>>,
    akk_keys: Vec<String>,
    engl_keys: Vec<String>,
    rng: StdRng,
}

impl Dictionary {
    /// Load and index a word list file. A missing file is reported before
    /// any parsing; any malformed record aborts the whole load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ParseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::from_text(&content)
    }

    /// Index a word list from already-loaded text.
    pub fn from_text(content: &str) -> Result<Self> {
        let records = parser::parse(content)?;
        let record_count = records.len();

        let mut dict = Self {
            akk_to_engl: HashMap::new(),
            engl_to_akk: HashMap::new(),
            akk_keys: Vec::new(),
            engl_keys: Vec::new(),
            rng: StdRng::from_entropy(),
        };

        // Relations are resolved only after the whole file has been read, so
        // a preterite may be declared before its infinitive appears.
        let mut pending: Vec<PendingRelations> = Vec::new();

        for record in records {
            let RawRecord {
                headword,
                definitions,
                grammar_kind,
                word_classes,
                relations,
                ..
            } = record;

            if !relations.is_empty() {
                pending.push(PendingRelations {
                    headword: headword.clone(),
                    grammar_kind,
                    relations: relations.clone(),
                });
            }

            for defn in &definitions {
                let reciprocal = Entry::new(
                    word_classes.clone(),
                    vec![headword.clone()],
                    grammar_kind,
                    relations.clone(),
                );
                dict.insert_engl(defn.clone(), reciprocal);
            }

            let entry = Entry::new(word_classes, definitions, grammar_kind, relations);
            dict.insert_akk(headword, entry);
        }

        resolver::resolve(&mut dict, &pending);

        debug!(
            records = record_count,
            akk_headwords = dict.akk_keys.len(),
            engl_headwords = dict.engl_keys.len(),
            "dictionary loaded"
        );

        Ok(dict)
    }

    /// Reseed the sampling source. Practice output is reproducible for a
    /// fixed seed and dictionary.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn insert_akk(&mut self, word: String, entry: Entry) {
        Self::insert(&mut self.akk_to_engl, &mut self.akk_keys, word, entry);
    }

    fn insert_engl(&mut self, word: String, entry: Entry) {
        Self::insert(&mut self.engl_to_akk, &mut self.engl_keys, word, entry);
    }

    /// Merge the entry into an existing mergeable sense of the headword, or
    /// append it as a new sense.
    fn insert(
        map: &mut HashMap<String, Vec<Entry>>,
        keys: &mut Vec<String>,
        word: String,
        entry: Entry,
    ) {
        let Some(senses) = map.get_mut(&word) else {
            keys.push(word.clone());
            map.insert(word, vec![entry]);
            return;
        };

        for existing in senses.iter_mut() {
            if existing.can_merge(&entry) {
                *existing = existing.merge(&entry);
                return;
            }
        }

        senses.push(entry);
    }

    /// All senses of a headword, in insertion order.
    pub fn get(&self, word: &str, engl: bool) -> Option<&[Entry]> {
        let map = if engl { &self.engl_to_akk } else { &self.akk_to_engl };
        map.get(word).map(Vec::as_slice)
    }

    /// First sense of the headword matching the part of speech and carrying
    /// every given class. Absence is ordinary "no data", not an error.
    pub fn lookup_filtered(
        &self,
        word: &str,
        grammar_kind: GrammarKind,
        word_classes: &[WordClass],
        engl: bool,
    ) -> Option<&Entry> {
        self.get(word, engl)?
            .iter()
            .find(|e| e.grammar_kind == grammar_kind && e.has_word_classes(word_classes))
    }

    /// Mutable lookup over the Akkadian side, used by the relation resolver:
    /// the first sense whose part of speech is one of `kinds` and which
    /// carries every given class.
    pub(crate) fn akk_entry_mut(
        &mut self,
        word: &str,
        kinds: &[GrammarKind],
        word_classes: &[WordClass],
    ) -> Option<&mut Entry> {
        self.akk_to_engl
            .get_mut(word)?
            .iter_mut()
            .find(|e| kinds.contains(&e.grammar_kind) && e.has_word_classes(word_classes))
    }

    /// Display block joining the summaries of all senses of a headword, or
    /// [`UNKNOWN_WORD`] if the headword is absent.
    pub fn summary(&self, word: &str, engl: bool) -> String {
        let Some(senses) = self.get(word, engl) else {
            return UNKNOWN_WORD.to_string();
        };

        let mut out = String::new();
        for entry in senses {
            out.push_str(&entry.summary(word));
            out.push('\n');
        }

        out
    }

    /// Uniformly random headword, then a uniformly random sense of it.
    /// `None` only if the chosen side of the dictionary is empty.
    pub fn random_entry(&mut self, engl: bool) -> Option<(String, Entry)> {
        let keys = if engl { &self.engl_keys } else { &self.akk_keys };
        if keys.is_empty() {
            return None;
        }

        let word = keys[self.rng.gen_range(0..keys.len())].clone();
        let senses = if engl {
            &self.engl_to_akk[&word]
        } else {
            &self.akk_to_engl[&word]
        };
        let entry = senses[self.rng.gen_range(0..senses.len())].clone();

        Some((word, entry))
    }

    /// Uniformly random sense matching the part of speech, carrying every
    /// given class and at least one relation of each required kind, and
    /// accepted by the candidate filter.
    pub(crate) fn random_filtered(
        &mut self,
        grammar_kind: GrammarKind,
        word_classes: &[WordClass],
        required_relations: &[WordRelationKind],
        engl: bool,
        filter: impl Fn(&str, &Entry) -> bool,
    ) -> Option<(String, Entry)> {
        let (map, keys) = if engl {
            (&self.engl_to_akk, &self.engl_keys)
        } else {
            (&self.akk_to_engl, &self.akk_keys)
        };

        let mut candidates: Vec<(&String, &Entry)> = Vec::new();

        for word in keys {
            for entry in &map[word] {
                if entry.grammar_kind == grammar_kind
                    && entry.has_word_classes(word_classes)
                    && required_relations.iter().all(|k| entry.has_relation_kind(*k))
                    && filter(word, entry)
                {
                    candidates.push((word, entry));
                }
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let (word, entry) = candidates[self.rng.gen_range(0..candidates.len())];
        Some((word.clone(), entry.clone()))
    }

    pub(crate) fn keys(&self, engl: bool) -> &[String] {
        if engl {
            &self.engl_keys
        } else {
            &self.akk_keys
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordRelation;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
awīlum,man;gentleman,n,nom;m;s
šarrum,king,n,nom;m;s
dannum,strong;mighty,adj,nom;m;s
parāsum,to decide,v,inf;G
iprus,he decided,v,G;pret(parāsum)";

    #[test]
    fn every_record_is_retrievable() {
        let dict = Dictionary::from_text(SAMPLE).unwrap();

        for word in ["awīlum", "šarrum", "dannum", "parāsum", "iprus"] {
            assert!(dict.get(word, false).is_some(), "missing {word}");
        }

        let senses = dict.get("awīlum", false).unwrap();
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].definitions, vec!["man", "gentleman"]);
        assert_eq!(senses[0].grammar_kind, GrammarKind::Noun);
    }

    #[test]
    fn reciprocal_entries_point_back_at_headword() {
        let dict = Dictionary::from_text(SAMPLE).unwrap();
        let senses = dict.get("man", true).unwrap();
        assert_eq!(senses[0].definitions, vec!["awīlum"]);
    }

    #[test]
    fn mergeable_records_collapse_into_one_sense() {
        let text = "bēlum,lord,n,nom;m;s\nbēlum,master,n,nom;m;s";
        let dict = Dictionary::from_text(text).unwrap();
        let senses = dict.get("bēlum", false).unwrap();
        assert_eq!(senses.len(), 1);
        assert_eq!(senses[0].definitions, vec!["lord", "master"]);
    }

    #[test]
    fn unmergeable_records_become_separate_senses() {
        let text = "nakrum,enemy;hostile,adj,nom;m;s\nnakrum,enemy,n,nom;m;s;subst(nakrum)";
        let dict = Dictionary::from_text(text).unwrap();
        let senses = dict.get("nakrum", false).unwrap();
        assert_eq!(senses.len(), 2);

        // The adjective sense gains the reciprocal relation after resolution
        let adj = dict
            .lookup_filtered("nakrum", GrammarKind::Adjective, &[], false)
            .unwrap();
        assert!(adj
            .relations
            .contains(&WordRelation::new(WordRelationKind::HasSubst, "nakrum")));
    }

    #[test]
    fn lookup_filtered_distinguishes_senses() {
        let text = "nakrum,enemy;hostile,adj,nom;m;s\nnakrum,enemy,n,nom;m;s;subst(nakrum)";
        let dict = Dictionary::from_text(text).unwrap();

        let noun = dict
            .lookup_filtered("nakrum", GrammarKind::Noun, &[WordClass::Nominative], false)
            .unwrap();
        assert_eq!(noun.grammar_kind, GrammarKind::Noun);

        assert!(dict
            .lookup_filtered("nakrum", GrammarKind::Verb, &[], false)
            .is_none());
    }

    #[test]
    fn summary_returns_sentinel_for_absent_word() {
        let dict = Dictionary::from_text(SAMPLE).unwrap();
        assert_eq!(dict.summary("missing", false), UNKNOWN_WORD);
        assert_eq!(dict.summary("missing", true), UNKNOWN_WORD);
    }

    #[test]
    fn summary_joins_all_senses() {
        let text = "nakrum,enemy;hostile,adj,nom;m;s\nnakrum,enemy,n,nom;m;s;subst(nakrum)";
        let dict = Dictionary::from_text(text).unwrap();
        let text = dict.summary("nakrum", false);
        assert!(text.contains("(adj; m, s, nom)"));
        assert!(text.contains("(n; m, s, nom)"));
        assert!(text.contains("enemy, hostile"));
    }

    #[test]
    fn random_entry_is_deterministic_with_seed() {
        let mut a = Dictionary::from_text(SAMPLE).unwrap();
        let mut b = Dictionary::from_text(SAMPLE).unwrap();
        a.reseed(7);
        b.reseed(7);

        for _ in 0..10 {
            assert_eq!(a.random_entry(false), b.random_entry(false));
            assert_eq!(a.random_entry(true), b.random_entry(true));
        }
    }

    #[test]
    fn random_entry_on_empty_dictionary_is_none() {
        let mut dict = Dictionary::from_text("").unwrap();
        assert!(dict.random_entry(false).is_none());
        assert!(dict.random_entry(true).is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Dictionary::load("no/such/file.dat").unwrap_err();
        assert!(matches!(err, ParseError::FileNotFound { .. }));
    }
}
