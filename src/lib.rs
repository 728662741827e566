//! Relclauses: relative clause extraction from bracketed treebanks
//!
//! Finds relative clauses in Penn-Treebank-style parses (built for the Penn
//! Arabic Treebank), classifies each as subject- or object-relative from the
//! position of its coindexed trace, and records its word order.

// Core modules
pub mod chunk; // Sentence splitting at closing brackets
pub mod parser; // Lenient bracket parser
pub mod tree; // Constituency trees in document order
pub mod index; // Label and coreference indices
pub mod locator; // Relative clause triggers and windows
pub mod classifier; // SRC/ORC and SVO/VSO rules
pub mod auditor; // Unmarked object gaps
pub mod clause; // Candidate and classified clause records

// Corpus pipeline and output
pub mod corpus; // Tree file discovery and reading
pub mod extract; // End-to-end extraction over a treebank
pub mod report; // Statistics and summary text
pub mod table; // Per-clause records and export

// Re-exports for convenience
pub use chunk::{Sentence, split};
pub use classifier::{Classification, Fragment, classify};
pub use clause::{CandidateClause, ClassifiedClause, ClauseIndex, ClauseOrder, RcType};
pub use corpus::{TreeFile, Treebank, TreebankError};
pub use extract::{Analysis, ExtractConfig, analyze};
pub use locator::{WindowBounds, locate};
pub use report::{CorpusReport, CorpusStats, ReportError};
pub use table::{ClauseRecord, ExportError, export_table, records};
