//! Error types for akkadian-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading a dictionary file.
///
/// All of these abort the load; a caller never receives a partially
/// constructed dictionary. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("dictionary file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read dictionary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing one or more fields at line {line} (headword, definitions and part of speech are required)")]
    MissingWord { line: usize },

    #[error("too many fields at line {line}")]
    TooManyFields { line: usize },

    #[error("unknown part of speech {token:?} at line {line}")]
    UnknownGrammarKind { line: usize, token: String },

    #[error("unknown word class {token:?} at line {line}")]
    UnknownWordClass { line: usize, token: String },

    #[error("unknown relation name {token:?} at line {line}")]
    UnknownRelation { line: usize, token: String },

    #[error("missing closing right parenthesis at line {line}")]
    MissingRightParen { line: usize },
}

/// Errors raised while generating practice questions. These are recoverable:
/// the caller should end the current quiz, not crash.
#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("not enough words with the required case, gender and number")]
    NotEnoughCases,
}
