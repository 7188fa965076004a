//! Post-parse pass that establishes reciprocal word relations.
//!
//! A record may declare that it is derived from another headword (a
//! preterite of an infinitive, a genitive of a nominative, ...). Once every
//! record has been indexed, this pass locates each referenced base form and
//! appends the reciprocal relation to it. A reference that cannot be located
//! is logged and skipped; the declaring entry keeps its one-directional
//! relation. The pass runs once, in record order, with no transitive
//! chaining.

use tracing::warn;

use crate::dictionary::Dictionary;
use crate::types::{GrammarKind, WordClass, WordRelation, WordRelationKind};

/// Relations declared by one record, queued until the whole file is indexed
/// so that forward references work.
#[derive(Debug, Clone)]
pub(crate) struct PendingRelations {
    pub headword: String,
    pub grammar_kind: GrammarKind,
    pub relations: Vec<WordRelation>,
}

pub(crate) fn resolve(dict: &mut Dictionary, pending: &[PendingRelations]) {
    for declaration in pending {
        for rel in &declaration.relations {
            resolve_one(dict, &declaration.headword, declaration.grammar_kind, rel);
        }
    }
}

fn resolve_one(dict: &mut Dictionary, declarer: &str, declarer_kind: GrammarKind, rel: &WordRelation) {
    // Only declared kinds are ever queued; derived kinds have no reciprocal.
    let Some(derived) = rel.kind.reciprocal() else {
        return;
    };

    let base = match rel.kind {
        WordRelationKind::PreteriteOf | WordRelationKind::VerbalAdjOf => {
            dict.akk_entry_mut(&rel.word, &[GrammarKind::Verb], &[WordClass::Infinitive])
        }
        WordRelationKind::SubstOf => {
            dict.akk_entry_mut(&rel.word, &[GrammarKind::Adjective], &[])
        }
        WordRelationKind::BoundFormOf => {
            // A bound form may point at a word of its own kind, or at an
            // infinitive. Check read-only first, then fetch once mutably.
            if dict.lookup_filtered(&rel.word, declarer_kind, &[], false).is_some() {
                dict.akk_entry_mut(&rel.word, &[declarer_kind], &[])
            } else {
                dict.akk_entry_mut(&rel.word, &[GrammarKind::Verb], &[WordClass::Infinitive])
            }
        }
        WordRelationKind::GenitiveOf
        | WordRelationKind::AccusativeOf
        | WordRelationKind::DativeOf => {
            dict.akk_entry_mut(&rel.word, &[declarer_kind], &[WordClass::Nominative])
        }
        _ => return,
    };

    match base {
        Some(entry) => entry.add_relation(WordRelation::new(derived, declarer)),
        None => warn!(
            relation = rel.kind.label(),
            word = %rel.word,
            declared_by = %declarer,
            "relation target not found"
        ),
    }
}
