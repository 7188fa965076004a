//! Translation practice sessions for single words and short phrases.
//!
//! Each session is an explicitly owned value; callers may run several
//! independent sessions against one dictionary. Sessions draw their random
//! samples from the dictionary's own RNG, so a reseeded dictionary produces
//! reproducible quizzes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::PracticeError;
use crate::types::{Entry, GrammarKind, WordClass, WordRelationKind};

/// One in this many phrases uses a dual noun with a plural feminine
/// adjective.
const DUAL_ODDS: u32 = 3;

/// One in this many phrases uses the anaphoric pronoun instead of an
/// adjective.
const PRONOUN_ODDS: u32 = 50;

/// Running score of one practice session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "0/0");
        }

        let percent = (self.correct as f64 / self.total as f64) * 100.0;
        write!(f, "{}/{} ({:.2}%)", self.correct, self.total, percent)
    }
}

/// Single-word practice: the user is shown a headword with its attributes
/// and must give any one of its recorded definitions.
#[derive(Debug)]
pub struct WordPractice {
    engl: bool,
    score: Score,
    word: String,
    entry: Entry,
}

impl WordPractice {
    /// Start a session quizzing the given side of the dictionary. `None` if
    /// that side is empty.
    pub fn new(dict: &mut Dictionary, engl: bool) -> Option<Self> {
        let (word, entry) = dict.random_entry(engl)?;
        Some(Self {
            engl,
            score: Score::default(),
            word,
            entry,
        })
    }

    /// Draw the next word. The current word is kept if the dictionary has
    /// somehow become empty-sided, which cannot happen after a successful
    /// [`WordPractice::new`].
    pub fn next_word(&mut self, dict: &mut Dictionary) {
        if let Some((word, entry)) = dict.random_entry(self.engl) {
            self.word = word;
            self.entry = entry;
        }
    }

    /// The prompt shown to the user, e.g. `šarrum (n; m, s, nom)`.
    pub fn question(&self) -> String {
        format!("{} {}", self.word, self.entry.attr_label())
    }

    /// Grade an answer: correct iff it is one of the current entry's
    /// definitions.
    pub fn accept_answer(&mut self, answer: &str) -> bool {
        let correct = self.entry.has_definition(answer.trim());
        self.score.record(correct);
        correct
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

/// Grammatical case of a generated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCase {
    Nominative,
    Genitive,
    Accusative,
}

impl PhraseCase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nominative => "nom",
            Self::Genitive => "gen",
            Self::Accusative => "acc",
        }
    }
}

/// Outcome of grading one phrase answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseAnswer {
    pub correct: bool,
    pub noun: String,
    pub adj: String,
}

/// Noun-adjective phrase practice. A declension is chosen at random, then a
/// noun and an adjective (or rarely the anaphoric pronoun) that decline that
/// way. The user must translate both words.
#[derive(Debug)]
pub struct PhrasePractice {
    engl: bool,
    score: Score,
    word_case: PhraseCase,
    noun_word: String,
    noun_entry: Entry,
    adj_word: String,
    adj_entry: Entry,
}

/// A candidate must be a single plain word with at least one single plain
/// word among its definitions, so neither the prompt nor the expected answer
/// turns into something like "having arrived lords".
fn phrase_candidate(word: &str, entry: &Entry) -> bool {
    if word.contains(' ') || word.contains('(') {
        return false;
    }

    entry
        .definitions
        .iter()
        .any(|d| !d.contains(' ') && !d.contains('('))
}

fn draw_phrase(
    dict: &mut Dictionary,
    engl: bool,
) -> Result<(PhraseCase, (String, Entry), (String, Entry)), PracticeError> {
    let rng = dict.rng_mut();

    let word_case = match rng.gen_range(0..3) {
        0 => PhraseCase::Nominative,
        1 => PhraseCase::Genitive,
        _ => PhraseCase::Accusative,
    };

    let mut gender = if rng.gen_range(0..2) == 0 {
        WordClass::Masculine
    } else {
        WordClass::Feminine
    };
    let mut noun_num = if rng.gen_range(0..2) == 0 {
        WordClass::Singular
    } else {
        WordClass::Plural
    };
    let mut adj_num = noun_num;
    let mut adj_kind = GrammarKind::Adjective;

    // A dual noun takes a plural feminine adjective
    if rng.gen_range(0..DUAL_ODDS) == 0 {
        gender = WordClass::Feminine;
        noun_num = WordClass::Dual;
        adj_num = WordClass::Plural;
    }

    if rng.gen_range(0..PRONOUN_ODDS) == 0 {
        adj_kind = GrammarKind::AnaphoricPronoun;
    }

    // Nominative forms are tagged directly; genitive and accusative forms
    // are recognized by the case relation they declare.
    let (noun_classes, adj_classes, required): (Vec<WordClass>, Vec<WordClass>, Vec<WordRelationKind>) =
        match word_case {
            PhraseCase::Nominative => (
                vec![WordClass::Nominative, gender, noun_num],
                vec![WordClass::Nominative, gender, adj_num],
                vec![],
            ),
            PhraseCase::Genitive => (
                vec![gender, noun_num],
                vec![gender, adj_num],
                vec![WordRelationKind::GenitiveOf],
            ),
            PhraseCase::Accusative => (
                vec![gender, noun_num],
                vec![gender, adj_num],
                vec![WordRelationKind::AccusativeOf],
            ),
        };

    let noun = dict.random_filtered(GrammarKind::Noun, &noun_classes, &required, engl, phrase_candidate);
    let adj = dict.random_filtered(adj_kind, &adj_classes, &required, engl, phrase_candidate);

    match (noun, adj) {
        (Some(noun), Some(adj)) => Ok((word_case, noun, adj)),
        _ => Err(PracticeError::NotEnoughCases),
    }
}

impl PhrasePractice {
    /// Start a session. Fails with [`PracticeError::NotEnoughCases`] if no
    /// noun or adjective declines the randomly chosen way; small
    /// dictionaries hit this routinely and callers must surface it.
    pub fn new(dict: &mut Dictionary, engl: bool) -> Result<Self, PracticeError> {
        let (word_case, (noun_word, noun_entry), (adj_word, adj_entry)) = draw_phrase(dict, engl)?;

        Ok(Self {
            engl,
            score: Score::default(),
            word_case,
            noun_word,
            noun_entry,
            adj_word,
            adj_entry,
        })
    }

    /// Draw the next phrase, keeping the running score.
    pub fn next_phrase(&mut self, dict: &mut Dictionary) -> Result<(), PracticeError> {
        let (word_case, (noun_word, noun_entry), (adj_word, adj_entry)) =
            draw_phrase(dict, self.engl)?;

        self.word_case = word_case;
        self.noun_word = noun_word;
        self.noun_entry = noun_entry;
        self.adj_word = adj_word;
        self.adj_entry = adj_entry;

        Ok(())
    }

    /// The prompt shown to the user: the phrase in language order plus the
    /// noun's gender, number and case, e.g. `šarrū dannūtum (m, pl, nom)`.
    pub fn question(&self) -> String {
        let phrase = if self.engl {
            // English phrases are adjective-first
            format!("{} {}", self.adj_word, self.noun_word)
        } else {
            format!("{} {}", self.noun_word, self.adj_word)
        };

        let gender = if self.noun_entry.has_word_classes(&[WordClass::Masculine]) {
            "m"
        } else {
            "f"
        };

        let number = if self.noun_entry.has_word_classes(&[WordClass::Singular]) {
            "s"
        } else if self.noun_entry.has_word_classes(&[WordClass::Dual]) {
            "dual"
        } else {
            "pl"
        };

        format!("{} ({}, {}, {})", phrase, gender, number, self.word_case.label())
    }

    /// Grade a two-word answer. The answer is split at its first space;
    /// Akkadian answers run noun-then-adjective, English answers
    /// adjective-then-noun. Each half must be a definition of its own entry.
    pub fn accept_answer(&mut self, answer: &str) -> PhraseAnswer {
        let answer = answer.trim();

        let Some(space) = answer.find(' ') else {
            self.score.record(false);
            return PhraseAnswer {
                correct: false,
                noun: String::new(),
                adj: String::new(),
            };
        };

        let first = &answer[..space];
        let second = &answer[space + 1..];

        // An English-side quiz is answered in Akkadian (noun first); an
        // Akkadian-side quiz is answered in English (adjective first).
        let (noun_ans, adj_ans) = if self.engl { (first, second) } else { (second, first) };

        let correct =
            self.noun_entry.has_definition(noun_ans) && self.adj_entry.has_definition(adj_ans);
        self.score.record(correct);

        PhraseAnswer {
            correct,
            noun: noun_ans.to_string(),
            adj: adj_ans.to_string(),
        }
    }

    pub fn word_case(&self) -> PhraseCase {
        self.word_case
    }

    pub fn noun(&self) -> (&str, &Entry) {
        (&self.noun_word, &self.noun_entry)
    }

    pub fn adjective(&self) -> (&str, &Entry) {
        (&self.adj_word, &self.adj_entry)
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Every case, gender and number combination is covered for both the
    // noun and adjective slots, so phrase generation cannot fail.
    const PHRASE_DICT: &str = "\
šarrum,king,n,nom;m;s
šarrū,kings,n,nom;m;pl
šarratum,queen,n,nom;f;s
šarrātum,queens,n,nom;f;pl
šarrān,two-kings,n,nom;f;dual
šarrim,king,n,gen;m;s;gen(šarrum)
šarrī,kings,n,gen;m;pl;gen(šarrū)
šarratim,queen,n,gen;f;s;gen(šarratum)
šarrātim,queens,n,gen;f;pl;gen(šarrātum)
šarrīn,two-kings,n,gen;f;dual;gen(šarrān)
šarram,king,n,acc;m;s;acc(šarrum)
šarrīa,kings,n,acc;m;pl;acc(šarrū)
šarratam,queen,n,acc;f;s;acc(šarratum)
šarrātam,queens,n,acc;f;pl;acc(šarrātum)
šarrāna,two-kings,n,acc;f;dual;acc(šarrān)
dannum,strong,adj,nom;m;s
dannūtum,strong,adj,nom;m;pl
dannatum,strong,adj,nom;f;s
dannātum,strong,adj,nom;f;pl
dannim,strong,adj,gen;m;s;gen(dannum)
dannūtim,strong,adj,gen;m;pl;gen(dannūtum)
dannatim,strong,adj,gen;f;s;gen(dannatum)
dannātim,strong,adj,gen;f;pl;gen(dannātum)
dannam,strong,adj,acc;m;s;acc(dannum)
dannūtam,strong,adj,acc;m;pl;acc(dannūtum)
dannatam,strong,adj,acc;f;s;acc(dannatum)
dannātam,strong,adj,acc;f;pl;acc(dannātum)
šū,that,anpr,nom;m;s
šī,that,anpr,nom;f;s
šunu,those,anpr,nom;m;pl
šina,those,anpr,nom;f;pl
šuāti,that,anpr,gen;m;s;gen(šū);acc(šū)
šiāti,that,anpr,gen;f;s;gen(šī);acc(šī)
šunūti,those,anpr,gen;m;pl;gen(šunu);acc(šunu)
šināti,those,anpr,gen;f;pl;gen(šina);acc(šina)";

    fn phrase_dict(seed: u64) -> Dictionary {
        let mut dict = Dictionary::from_text(PHRASE_DICT).unwrap();
        dict.reseed(seed);
        dict
    }

    #[test]
    fn score_displays_zero_over_zero_before_any_attempt() {
        let score = Score::default();
        assert_eq!(score.to_string(), "0/0");
    }

    #[test]
    fn score_displays_two_decimal_percentage() {
        let mut score = Score::default();
        score.record(true);
        score.record(true);
        score.record(false);
        assert_eq!(score.to_string(), "2/3 (66.67%)");
    }

    #[test]
    fn word_practice_grades_against_definitions() {
        let mut dict = Dictionary::from_text("šarrum,king;ruler,n,nom;m;s").unwrap();
        dict.reseed(1);

        let mut session = WordPractice::new(&mut dict, false).unwrap();
        assert_eq!(session.word(), "šarrum");

        assert!(session.accept_answer("ruler"));
        assert!(session.accept_answer("king"));
        assert!(!session.accept_answer("queen"));
        assert_eq!(session.score(), Score { correct: 2, total: 3 });
    }

    #[test]
    fn word_practice_question_shows_attributes() {
        let mut dict = Dictionary::from_text("šarrum,king,n,nom;m;s").unwrap();
        dict.reseed(1);

        let session = WordPractice::new(&mut dict, false).unwrap();
        assert_eq!(session.question(), "šarrum (n; m, s, nom)");
    }

    #[test]
    fn word_practice_on_empty_dictionary_is_none() {
        let mut dict = Dictionary::from_text("").unwrap();
        assert!(WordPractice::new(&mut dict, false).is_none());
    }

    #[test]
    fn word_practice_is_reproducible_with_seed() {
        let mut a = phrase_dict(21);
        let mut b = phrase_dict(21);

        let sa = WordPractice::new(&mut a, false).unwrap();
        let sb = WordPractice::new(&mut b, false).unwrap();
        assert_eq!(sa.word(), sb.word());
    }

    #[test]
    fn phrase_practice_draws_consistent_noun_and_adjective() {
        let mut dict = phrase_dict(3);

        for _ in 0..50 {
            let session = PhrasePractice::new(&mut dict, false).unwrap();
            let (_, noun) = session.noun();
            let (_, adj) = session.adjective();

            assert_eq!(noun.grammar_kind, GrammarKind::Noun);
            assert!(matches!(
                adj.grammar_kind,
                GrammarKind::Adjective | GrammarKind::AnaphoricPronoun
            ));

            // A dual noun always pairs with a plural or pronoun adjective
            if noun.has_word_classes(&[WordClass::Dual]) {
                assert!(noun.has_word_classes(&[WordClass::Feminine]));
            }
        }
    }

    #[test]
    fn phrase_candidates_are_single_plain_words() {
        let mut dict = Dictionary::from_text(
            "\
šarrum,king,n,nom;m;s
ša ekallim,palace one,n,nom;m;s
wardum,(house) servant,n,nom;m;s
dannum,strong,adj,nom;m;s",
        )
        .unwrap();
        dict.reseed(5);

        for _ in 0..100 {
            if let Ok(session) = PhrasePractice::new(&mut dict, false) {
                let (noun_word, _) = session.noun();
                assert_eq!(noun_word, "šarrum");
            }
        }
    }

    #[test]
    fn phrase_practice_fails_cleanly_when_underconstrained() {
        let mut dict = Dictionary::from_text("šarrum,king,n,nom;m;s").unwrap();
        dict.reseed(1);

        let result = PhrasePractice::new(&mut dict, false);
        assert!(matches!(result, Err(PracticeError::NotEnoughCases)));
    }

    #[test]
    fn akkadian_phrase_answer_is_adjective_first() {
        let mut dict = phrase_dict(11);
        let mut session = PhrasePractice::new(&mut dict, false).unwrap();

        let (_, noun_entry) = session.noun();
        let (_, adj_entry) = session.adjective();
        let noun_defn = noun_entry.definitions[0].clone();
        let adj_defn = adj_entry.definitions[0].clone();

        let graded = session.accept_answer(&format!("{adj_defn} {noun_defn}"));
        assert!(graded.correct);
        assert_eq!(graded.noun, noun_defn);
        assert_eq!(graded.adj, adj_defn);
    }

    #[test]
    fn english_phrase_answer_is_noun_first() {
        let mut dict = phrase_dict(11);
        let mut session = PhrasePractice::new(&mut dict, true).unwrap();

        let (_, noun_entry) = session.noun();
        let (_, adj_entry) = session.adjective();
        let noun_defn = noun_entry.definitions[0].clone();
        let adj_defn = adj_entry.definitions[0].clone();

        let graded = session.accept_answer(&format!("{noun_defn} {adj_defn}"));
        assert!(graded.correct);
    }

    #[test]
    fn one_word_phrase_answer_is_incorrect() {
        let mut dict = phrase_dict(11);
        let mut session = PhrasePractice::new(&mut dict, false).unwrap();

        let graded = session.accept_answer("king");
        assert!(!graded.correct);
        assert_eq!(session.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn phrase_question_lists_gender_number_and_case() {
        let mut dict = phrase_dict(9);
        let session = PhrasePractice::new(&mut dict, false).unwrap();

        let question = session.question();
        let attrs = question.rsplit('(').next().unwrap();
        assert!(attrs.starts_with("m,") || attrs.starts_with("f,"));
        assert!(attrs.contains("s,") || attrs.contains("dual,") || attrs.contains("pl,"));
        assert!(
            attrs.ends_with("nom)") || attrs.ends_with("gen)") || attrs.ends_with("acc)")
        );
    }
}
