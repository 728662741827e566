//! Relative clause records
//!
//! A [`CandidateClause`] is a window of chunks around a relative-clause
//! trigger; a [`ClassifiedClause`] is a candidate that matched one of the gap
//! patterns. Neither is mutated after creation.

use serde::Serialize;
use std::fmt;

/// Position of a clause: sentence within its file, clause within the sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClauseIndex {
    /// 1-based sentence position in the source file
    pub sentence: usize,
    /// 1-based count of triggers seen so far in the sentence
    pub subclause: usize,
}

impl fmt::Display for ClauseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.sentence, self.subclause)
    }
}

/// A relative-clause window awaiting classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateClause {
    pub file_id: String,
    pub index: ClauseIndex,
    /// Reconstructed bracket text, not necessarily balanced
    pub text: String,
}

/// Where the gap coreferent with the relative pronoun sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RcType {
    #[serde(rename = "SRC")]
    Src,
    #[serde(rename = "ORC")]
    Orc,
}

impl RcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RcType::Src => "SRC",
            RcType::Orc => "ORC",
        }
    }
}

impl fmt::Display for RcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constituent order inside the relative clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClauseOrder {
    #[serde(rename = "SVO")]
    Svo,
    #[serde(rename = "VSO")]
    Vso,
}

impl ClauseOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseOrder::Svo => "SVO",
            ClauseOrder::Vso => "VSO",
        }
    }
}

impl fmt::Display for ClauseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate with its relation type and word order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedClause {
    pub candidate: CandidateClause,
    pub rc_type: RcType,
    pub order: ClauseOrder,
}

impl ClassifiedClause {
    pub fn text(&self) -> &str {
        &self.candidate.text
    }
}
