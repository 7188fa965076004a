//! Core dictionary engine for Akkadian/English study tools.
//!
//! Provides:
//! - Parser for the comma-delimited word list format
//! - Bidirectional lookup index with cross-referenced word relations
//! - Fuzzy search tolerant of missing diacritical marks
//! - Practice question generation for words and short noun-adjective phrases
//!
//! The dictionary is loaded once and read-only afterwards; UI shells consume
//! it through [`Dictionary`] and the session types in [`practice`].

pub mod dictionary;
pub mod error;
pub mod parser;
pub mod practice;
mod resolver;
pub mod search;
pub mod types;

pub use dictionary::{Dictionary, UNKNOWN_WORD};
pub use error::{ParseError, PracticeError, Result};
pub use practice::{PhraseAnswer, PhraseCase, PhrasePractice, Score, WordPractice};
pub use search::{fold_eq, levenshtein_distance};
pub use types::{
    Entry, GrammarKind, LookupSettings, WordClass, WordRelation, WordRelationKind,
};
