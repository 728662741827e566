//! Gap-marking audit for object relatives
//!
//! Counts object relative clauses whose object position is not opened by an
//! explicit noun phrase, i.e. the relative pronoun is left unmarked.

use tracing::debug;

use crate::classifier::Fragment;
use crate::clause::{ClassifiedClause, RcType};

/// True if the clause's `NP-OBJ` opens directly onto a noun phrase
pub fn has_explicit_marker(clause: &ClassifiedClause) -> bool {
    Fragment::parse(clause.text()).is_ok_and(|fragment| fragment.has_object_marker())
}

/// Number of ORCs without an explicit object marker
///
/// Clauses of any other type are ignored, so the result is always between
/// zero and the number of ORCs passed in.
pub fn count_unmarked<'a>(clauses: impl IntoIterator<Item = &'a ClassifiedClause>) -> usize {
    let mut orcs = 0;
    let mut marked = 0;

    for clause in clauses {
        if clause.rc_type != RcType::Orc {
            continue;
        }
        orcs += 1;
        if has_explicit_marker(clause) {
            marked += 1;
        } else {
            debug!(
                "{}:{} has no explicit object marker",
                clause.candidate.file_id, clause.candidate.index
            );
        }
    }

    orcs - marked
}
