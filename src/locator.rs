//! Relative clause locator
//!
//! Scans a sentence's chunks for an `SBAR` (or nominalized `SBAR-NOM`)
//! bracket opening directly onto an indexed `WHNP`, and cuts a window of
//! chunks around each hit as the candidate clause text.

use tracing::{debug, warn};

use crate::chunk::{Sentence, rejoin};
use crate::clause::{CandidateClause, ClauseIndex};
use crate::parser::parse_bracketed;

/// Clause-opening labels that can introduce a relative clause
pub const TRIGGER_LABELS: [&str; 2] = ["SBAR", "SBAR-NOM"];

/// Label base of the relative-pronoun phrase
pub const RELATIVE_PRONOUN_PHRASE: &str = "WHNP";

/// How many chunks around a trigger make up the candidate text
///
/// The defaults cover the predecessor chunk and five successors, which is
/// enough to reach the gap in typical treebank relative clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub preceding: usize,
    pub following: usize,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            preceding: 1,
            following: 5,
        }
    }
}

impl WindowBounds {
    /// Chunk range for a trigger at `position`, clamped to `len` chunks
    pub fn clamp(&self, position: usize, len: usize) -> std::ops::Range<usize> {
        let start = position.saturating_sub(self.preceding);
        let end = position.saturating_add(self.following).saturating_add(1).min(len);
        start..end.max(start)
    }
}

/// True if the chunk opens a relative clause
pub fn is_trigger(chunk: &str) -> bool {
    let tree = match parse_bracketed(chunk) {
        Ok(tree) => tree,
        Err(e) => {
            warn!("Skipping unparsable chunk: {}", e);
            return false;
        }
    };

    tree.nodes.iter().any(|node| {
        TRIGGER_LABELS.contains(&node.label.as_str())
            && tree.first_child(node.id).is_some_and(|child| {
                child.label.base() == RELATIVE_PRONOUN_PHRASE && child.label.index().is_some()
            })
    })
}

/// Find every relative-clause trigger in a sentence and build its candidate
pub fn locate(file_id: &str, sentence: &Sentence<'_>, window: &WindowBounds) -> Vec<CandidateClause> {
    let chunks = &sentence.chunks;
    let mut candidates = Vec::new();
    let mut subclause = 1;

    for (position, chunk) in chunks.iter().enumerate() {
        if !is_trigger(chunk) {
            continue;
        }

        let range = window.clamp(position, chunks.len());
        let index = ClauseIndex {
            sentence: sentence.index,
            subclause,
        };
        debug!(
            "{}:{} trigger at chunk {} (window {:?})",
            file_id, index, position, range
        );

        candidates.push(CandidateClause {
            file_id: file_id.to_string(),
            index,
            text: rejoin(&chunks[range]),
        });
        subclause += 1;
    }

    candidates
}
