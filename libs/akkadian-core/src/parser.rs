//! Parser for the comma-delimited word list format.
//!
//! # Format
//! ```text
//! headword,defn-1;defn-2,part-of-speech[,attr;attr;relation(word)]
//! ```
//!
//! One record per line. The fourth field is optional and mixes bare word
//! class tokens with `name(word)` relation declarations. Field text is taken
//! verbatim; nothing is trimmed.

use crate::error::{ParseError, Result};
use crate::types::{GrammarKind, WordClass, WordRelation, WordRelationKind};

/// One record of the word list, decoded but not yet indexed.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub headword: String,
    pub definitions: Vec<String>,
    pub grammar_kind: GrammarKind,
    pub word_classes: Vec<WordClass>,
    pub relations: Vec<WordRelation>,
    pub line_number: usize,
}

/// Parse the whole word list. Any malformed record aborts the parse with a
/// 1-based line number.
pub fn parse(content: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        records.push(parse_record(line, idx + 1)?);
    }

    Ok(records)
}

fn parse_record(line: &str, line_number: usize) -> Result<RawRecord> {
    let fields: Vec<&str> = line.split(',').collect();

    // The attribute field is optional
    if fields.len() < 3 {
        return Err(ParseError::MissingWord { line: line_number });
    }
    if fields.len() > 4 {
        return Err(ParseError::TooManyFields { line: line_number });
    }

    let headword = fields[0].to_string();
    let definitions: Vec<String> = fields[1]
        .split(';')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let grammar_kind =
        GrammarKind::from_token(fields[2]).ok_or_else(|| ParseError::UnknownGrammarKind {
            line: line_number,
            token: fields[2].to_string(),
        })?;

    let (word_classes, relations) = if fields.len() == 4 {
        parse_attrs(fields[3], line_number)?
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(RawRecord {
        headword,
        definitions,
        grammar_kind,
        word_classes,
        relations,
        line_number,
    })
}

/// Decode the attribute field: bare tokens are word classes, `name(word)`
/// tokens are declared relations.
fn parse_attrs(field: &str, line_number: usize) -> Result<(Vec<WordClass>, Vec<WordRelation>)> {
    let mut classes = Vec::new();
    let mut relations = Vec::new();

    for token in field.split(';').filter(|s| !s.is_empty()) {
        match token.find('(') {
            None => {
                let class =
                    WordClass::from_token(token).ok_or_else(|| ParseError::UnknownWordClass {
                        line: line_number,
                        token: token.to_string(),
                    })?;
                classes.push(class);
            }
            Some(lpos) => {
                let rpos = lpos
                    + token[lpos..]
                        .find(')')
                        .ok_or(ParseError::MissingRightParen { line: line_number })?;

                let name = &token[..lpos];
                let kind =
                    WordRelationKind::from_token(name).ok_or_else(|| ParseError::UnknownRelation {
                        line: line_number,
                        token: name.to_string(),
                    })?;

                let word = token[lpos + 1..rpos].to_string();
                relations.push(WordRelation::new(kind, word));
            }
        }
    }

    Ok((classes, relations))
}
