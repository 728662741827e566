//! Relative clause classification
//!
//! A candidate's text is parsed into a [`Fragment`] and matched against two
//! gap patterns, subject first:
//!
//! - SRC: an indexed `WHNP-N` followed by `(NP-SBJ-N (-NONE- *T*))`
//! - ORC: an indexed `WHNP-N` followed by an `NP-OBJ...` bracket, followed
//!   by `(NP-N (-NONE- *T*))`
//!
//! "Followed by" means opened later in the text. Windows cut from a sentence
//! lose most of their closing brackets, so document order is the only
//! structural relation that survives reliably.
//!
//! Word order is VSO when an `S` opened after the relative pronoun starts
//! directly with a `VP` bracket, and SVO otherwise.

use tracing::warn;

use crate::clause::{CandidateClause, ClassifiedClause, ClauseOrder, RcType};
use crate::index::TreeIndex;
use crate::locator::RELATIVE_PRONOUN_PHRASE;
use crate::parser::{ParseError, parse_bracketed};
use crate::tree::{NodeId, Tree};

const SUBJECT_GAP: &str = "NP-SBJ";
const OBJECT_PHRASE: &str = "NP-OBJ";
const NOUN_PHRASE: &str = "NP";
const CLAUSE: &str = "S";
const VERB_PHRASE: &str = "VP";

/// Outcome of classifying one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Classified { rc_type: RcType, order: ClauseOrder },
    Unclassified,
}

/// A parsed candidate clause with its node index
#[derive(Debug, Clone)]
pub struct Fragment {
    pub tree: Tree,
    index: TreeIndex,
}

impl Fragment {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let tree = parse_bracketed(text)?;
        let index = TreeIndex::build(&tree);
        Ok(Self { tree, index })
    }

    /// Indexed relative-pronoun phrases as (node, coreference index)
    pub fn relative_pronouns(&self) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.index
            .get_by_base(RELATIVE_PRONOUN_PHRASE)
            .iter()
            .filter_map(|&id| Some((id, self.tree.get_node(id)?.label.index()?)))
    }

    /// Position of the first indexed relative-pronoun phrase
    pub fn first_relative_pronoun(&self) -> Option<NodeId> {
        self.relative_pronouns().next().map(|(id, _)| id)
    }

    /// First trace labeled `base-coref` opened after `after`
    fn trace_after(&self, base: &str, coref: u32, after: NodeId) -> Option<NodeId> {
        self.index.get_by_coref(coref).iter().copied().find(|&id| {
            id > after
                && self
                    .tree
                    .get_node(id)
                    .is_some_and(|node| node.label.is_indexed(base, coref))
                && self.tree.is_trace(id)
        })
    }

    /// A subject trace coindexed with some relative pronoun
    pub fn has_subject_gap(&self) -> bool {
        self.relative_pronouns()
            .any(|(wh, coref)| self.trace_after(SUBJECT_GAP, coref, wh).is_some())
    }

    /// An object phrase, then a noun-phrase trace coindexed with some relative pronoun
    pub fn has_object_gap(&self) -> bool {
        let objects = self.index.get_by_label_prefix(OBJECT_PHRASE);
        self.relative_pronouns().any(|(wh, coref)| {
            objects
                .iter()
                .find(|&&obj| obj > wh)
                .is_some_and(|&obj| self.trace_after(NOUN_PHRASE, coref, obj).is_some())
        })
    }

    /// An `S` after the relative pronoun whose first constituent is a `VP`
    pub fn has_verb_initial_clause(&self) -> bool {
        let Some(wh) = self.first_relative_pronoun() else {
            return false;
        };
        self.index
            .get_by_label(CLAUSE)
            .iter()
            .filter(|&&s| s > wh)
            .any(|&s| {
                self.tree
                    .first_child(s)
                    .is_some_and(|child| child.label.as_str().starts_with(VERB_PHRASE))
            })
    }

    /// An `NP-OBJ` after the relative pronoun that opens directly onto an `NP...`
    pub fn has_object_marker(&self) -> bool {
        let Some(wh) = self.first_relative_pronoun() else {
            return false;
        };
        self.index
            .get_by_label(OBJECT_PHRASE)
            .iter()
            .filter(|&&obj| obj > wh)
            .any(|&obj| {
                self.tree
                    .first_child(obj)
                    .is_some_and(|child| child.label.as_str().starts_with(NOUN_PHRASE))
            })
    }

    pub fn classify(&self) -> Classification {
        let rc_type = if self.has_subject_gap() {
            RcType::Src
        } else if self.has_object_gap() {
            RcType::Orc
        } else {
            return Classification::Unclassified;
        };

        let order = if self.has_verb_initial_clause() {
            ClauseOrder::Vso
        } else {
            ClauseOrder::Svo
        };

        Classification::Classified { rc_type, order }
    }
}

/// Classify a candidate clause text
pub fn classify(text: &str) -> Classification {
    match Fragment::parse(text) {
        Ok(fragment) => fragment.classify(),
        Err(e) => {
            warn!("Leaving unparsable fragment unclassified: {}", e);
            Classification::Unclassified
        }
    }
}

/// Classify a candidate, dropping it if neither gap pattern matches
pub fn classify_candidate(candidate: CandidateClause) -> Option<ClassifiedClause> {
    match classify(&candidate.text) {
        Classification::Classified { rc_type, order } => Some(ClassifiedClause {
            candidate,
            rc_type,
            order,
        }),
        Classification::Unclassified => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseIndex;

    fn classified(rc_type: RcType, order: ClauseOrder) -> Classification {
        Classification::Classified { rc_type, order }
    }

    #[test]
    fn test_subject_relative_svo() {
        let text = "(S (NP-SBJ (NOUN+CASE_DEF_NOM Al-Tifolu) (SBAR (WHNP-5 (REL_PRON Al~a*iy) (S (NP-SBJ-5 (-NONE- *T*) (VP (PV katab) (NP-OBJ (NOUN Aldars) (VP (PV nAma)";
        assert_eq!(classify(text), classified(RcType::Src, ClauseOrder::Svo));
    }

    #[test]
    fn test_subject_relative_vso() {
        let text = " (NP (NOUN Al-rajulu) (SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (VP (PV jA'a) (NP-SBJ-1 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Src, ClauseOrder::Vso));
    }

    #[test]
    fn test_object_relative_vso() {
        let text = " (NP-OBJ (NOUN Al-kitAba) (SBAR (WHNP-2 (REL_PRON Al~a*iy) (S (VP (PV katab) (NP-SBJ (NOUN Al-mu&al~ifu) (NP-OBJ (NP-2 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Orc, ClauseOrder::Vso));
    }

    #[test]
    fn test_object_relative_svo() {
        let text = "(SBAR (WHNP-3 (REL_PRON mA) (S (NP-SBJ (NOUN Al-walad) (VP (PV >akal) (NP-OBJ (NP-3 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Orc, ClauseOrder::Svo));
    }

    #[test]
    fn test_nested_clause_chain_is_vso() {
        let text = "(SBAR (WHNP-4 (REL_PRON Al~a*iy) (S (S (VP (PV qAla) (NP-SBJ-4 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Src, ClauseOrder::Vso));
    }

    #[test]
    fn test_subject_pattern_wins() {
        let text = "(SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (NP-SBJ-1 (-NONE- *T*) (VP (PV r>aY) (NP-OBJ (NP-1 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Src, ClauseOrder::Svo));
    }

    #[test]
    fn test_index_mismatch_is_unclassified() {
        let text = "(SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (VP (PV jA'a) (NP-SBJ-2 (-NONE- *T*)";
        assert_eq!(classify(text), Classification::Unclassified);

        let text = "(SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (VP (PV jA'a) (NP-SBJ-11 (-NONE- *T*)";
        assert_eq!(classify(text), Classification::Unclassified);
    }

    #[test]
    fn test_overt_subject_is_unclassified() {
        let text = "(SBAR (WHNP-4 (REL_PRON Al~a*iy) (S (VP (PV jA'a) (NP-SBJ (NOUN Al-rajul)";
        assert_eq!(classify(text), Classification::Unclassified);
    }

    #[test]
    fn test_trace_before_pronoun_is_ignored() {
        let text = "(NP-SBJ-1 (-NONE- *T*) (SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (VP (PV jA'a)";
        assert_eq!(classify(text), Classification::Unclassified);
    }

    #[test]
    fn test_object_trace_needs_object_phrase_first() {
        let text = "(SBAR (WHNP-2 (REL_PRON mA) (S (VP (PV >akal) (NP-2 (-NONE- *T*) (NP-OBJ (NOUN x)";
        assert_eq!(classify(text), Classification::Unclassified);
    }

    #[test]
    fn test_non_trace_empty_category() {
        let text = "(SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (VP (PV jA'a) (NP-SBJ-1 (-NONE- *PRO*)";
        assert_eq!(classify(text), Classification::Unclassified);
    }

    #[test]
    fn test_intervening_material_hides_verb_initial_clause() {
        // Adverb before the VP: the heuristic reports SVO
        let text = "(SBAR (WHNP-1 (REL_PRON Al~a*iy) (S (ADVP (ADV >amosi) (VP (PV jA'a) (NP-SBJ-1 (-NONE- *T*)";
        assert_eq!(classify(text), classified(RcType::Src, ClauseOrder::Svo));
    }

    #[test]
    fn test_object_marker() {
        let marked = Fragment::parse("(SBAR (WHNP-2 (REL_PRON mA) (S (VP (PV >akal) (NP-OBJ (NP-2 (-NONE- *T*)").unwrap();
        assert!(marked.has_object_marker());

        let unmarked = Fragment::parse("(SBAR (WHNP-2 (REL_PRON mA) (S (VP (PV >akal) (NP-OBJ-1 (NP-2 (-NONE- *T*)").unwrap();
        assert!(unmarked.has_object_gap());
        assert!(!unmarked.has_object_marker());
    }

    #[test]
    fn test_classify_candidate() {
        let candidate = CandidateClause {
            file_id: "a.tree".to_string(),
            index: ClauseIndex {
                sentence: 1,
                subclause: 1,
            },
            text: "(SBAR (WHNP-3 (REL_PRON mA) (S (NP-SBJ-3 (-NONE- *T*) (VP (PV nAm)".to_string(),
        };
        let clause = classify_candidate(candidate.clone()).unwrap();
        assert_eq!(clause.rc_type, RcType::Src);
        assert_eq!(clause.order, ClauseOrder::Svo);
        assert_eq!(clause.candidate, candidate);

        let dropped = CandidateClause {
            text: "(SBAR (WHNP-3 (REL_PRON mA) (S (VP (PV nAm)".to_string(),
            ..candidate
        };
        assert!(classify_candidate(dropped).is_none());
    }
}
