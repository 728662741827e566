//! End-to-end relative clause extraction
//!
//! The pipeline, per file:
//! 1. Read the file into sentence lines
//! 2. Split each sentence into chunks
//! 3. Locate relative-clause triggers and cut candidate windows
//!
//! Files run in parallel; their results are merged in treebank order (sorted
//! file ids, then sentence order) before every candidate is classified.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::chunk::Sentence;
use crate::classifier::classify_candidate;
use crate::clause::{CandidateClause, ClassifiedClause};
use crate::corpus::{TreeFile, Treebank, TreebankError};
use crate::locator::{WindowBounds, locate};

/// Settings for clause extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    pub window: WindowBounds,
}

/// Candidates found in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtraction {
    pub file_id: String,
    /// Number of sentence lines in the file, blank lines included
    pub sentences: usize,
    pub candidates: Vec<CandidateClause>,
}

/// Locate candidates in a sequence of sentence lines
pub fn extract_sentences<'a>(
    file_id: &str,
    lines: impl IntoIterator<Item = &'a str>,
    config: &ExtractConfig,
) -> FileExtraction {
    let mut sentences = 0;
    let mut candidates = Vec::new();

    for (i, line) in lines.into_iter().enumerate() {
        let sentence = Sentence::new(i + 1, line);
        candidates.extend(locate(file_id, &sentence, &config.window));
        sentences += 1;
    }

    FileExtraction {
        file_id: file_id.to_string(),
        sentences,
        candidates,
    }
}

/// Read a tree file and locate its candidates
pub fn extract_file(file: &TreeFile, config: &ExtractConfig) -> Result<FileExtraction, TreebankError> {
    let lines = file.read_sentences()?;
    let extraction = extract_sentences(&file.id, lines.iter().map(String::as_str), config);
    debug!(
        "{}: {} sentences, {} candidates",
        file.id,
        extraction.sentences,
        extraction.candidates.len()
    );
    Ok(extraction)
}

/// Merged results over a whole treebank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub total_sentences: usize,
    /// Candidates located, classified or not
    pub total_candidates: usize,
    /// Classified clauses in treebank order
    pub clauses: Vec<ClassifiedClause>,
}

impl Analysis {
    /// Merge per-file extractions (already in treebank order) and classify
    pub fn from_extractions(extractions: Vec<FileExtraction>) -> Self {
        let total_sentences = extractions.iter().map(|e| e.sentences).sum();
        let candidates: Vec<CandidateClause> = extractions
            .into_iter()
            .flat_map(|e| e.candidates)
            .collect();
        let total_candidates = candidates.len();

        let clauses: Vec<ClassifiedClause> = candidates
            .into_par_iter()
            .filter_map(classify_candidate)
            .collect();

        debug!(
            "Classified {} of {} candidates",
            clauses.len(),
            total_candidates
        );

        Self {
            total_sentences,
            total_candidates,
            clauses,
        }
    }
}

/// Run the full pipeline over a treebank
pub fn analyze(treebank: &Treebank, config: &ExtractConfig) -> Result<Analysis, TreebankError> {
    let extractions = treebank
        .files()
        .par_iter()
        .map(|file| extract_file(file, config))
        .collect::<Result<Vec<_>, _>>()?;

    let analysis = Analysis::from_extractions(extractions);
    info!(
        "Analyzed {} files: {} sentences, {} relative clauses, {} classified",
        treebank.len(),
        analysis.total_sentences,
        analysis.total_candidates,
        analysis.clauses.len()
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{ClauseOrder, RcType};

    const SRC_SENTENCE: &str = "(S (NP-SBJ (NOUN+CASE_DEF_NOM Al-Tifolu) (SBAR (WHNP-5 (REL_PRON Al~a*iy)) (S (NP-SBJ-5 (-NONE- *T*)) (VP (PV katab) (NP-OBJ (NOUN Aldars)))))) (VP (PV nAma)))";
    const ORC_SENTENCE: &str = "(S (VP (PV qara>a) (NP-SBJ (NOUN Al-Tifolu)) (NP-OBJ (NOUN Al-kitAba) (SBAR (WHNP-2 (REL_PRON Al~a*iy)) (S (VP (PV katab) (NP-SBJ (NOUN Al-mu&al~ifu)) (NP-OBJ (NP-2 (-NONE- *T*)))))))))";
    const PLAIN_SENTENCE: &str = "(S (VP (PV nAma) (NP-SBJ (NOUN Al-Tifolu))))";
    const UNRESOLVED_SENTENCE: &str = "(S (NP (NOUN Al-rajulu) (SBAR (WHNP-4 (REL_PRON Al~a*iy)) (S (VP (PV jA'a) (NP-SBJ (NOUN Al-walad)))))))";

    #[test]
    fn test_extract_sentences() {
        let lines = [PLAIN_SENTENCE, SRC_SENTENCE, "", ORC_SENTENCE];
        let extraction = extract_sentences("a.tree", lines, &ExtractConfig::default());

        assert_eq!(extraction.sentences, 4);
        let labels: Vec<_> = extraction
            .candidates
            .iter()
            .map(|c| c.index.to_string())
            .collect();
        assert_eq!(labels, vec!["2.1", "4.1"]);
    }

    #[test]
    fn test_analysis_drops_unclassified() {
        let first = extract_sentences(
            "a.tree",
            [SRC_SENTENCE, UNRESOLVED_SENTENCE],
            &ExtractConfig::default(),
        );
        let second = extract_sentences("b.tree", [ORC_SENTENCE], &ExtractConfig::default());
        let analysis = Analysis::from_extractions(vec![first, second]);

        assert_eq!(analysis.total_sentences, 3);
        assert_eq!(analysis.total_candidates, 3);
        assert_eq!(analysis.clauses.len(), 2);

        let src = &analysis.clauses[0];
        assert_eq!(src.candidate.file_id, "a.tree");
        assert_eq!((src.rc_type, src.order), (RcType::Src, ClauseOrder::Svo));

        let orc = &analysis.clauses[1];
        assert_eq!(orc.candidate.file_id, "b.tree");
        assert_eq!((orc.rc_type, orc.order), (RcType::Orc, ClauseOrder::Vso));
    }

    #[test]
    fn test_analysis_preserves_order() {
        let lines: Vec<&str> = (0..50)
            .map(|i| if i % 2 == 0 { SRC_SENTENCE } else { ORC_SENTENCE })
            .collect();
        let extraction = extract_sentences("a.tree", lines, &ExtractConfig::default());
        let analysis = Analysis::from_extractions(vec![extraction]);

        let sentences: Vec<_> = analysis
            .clauses
            .iter()
            .map(|c| c.candidate.index.sentence)
            .collect();
        assert_eq!(sentences, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_classification_counts_partition() {
        let lines = [SRC_SENTENCE, ORC_SENTENCE, UNRESOLVED_SENTENCE, SRC_SENTENCE];
        let extraction = extract_sentences("a.tree", lines, &ExtractConfig::default());
        let analysis = Analysis::from_extractions(vec![extraction]);

        let src = analysis
            .clauses
            .iter()
            .filter(|c| c.rc_type == RcType::Src)
            .count();
        let orc = analysis
            .clauses
            .iter()
            .filter(|c| c.rc_type == RcType::Orc)
            .count();
        assert_eq!(src + orc, analysis.clauses.len());
        assert!(src + orc <= analysis.total_candidates);
        assert_eq!((src, orc), (2, 1));
    }

    mod multi_file {
        use super::*;
        use std::fs;
        use tempfile::tempdir;

        #[test]
        fn test_analyze_directory() {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("b.tree"), format!("{}\n", ORC_SENTENCE)).unwrap();
            fs::write(
                dir.path().join("a.tree"),
                format!("{}\n{}\n", PLAIN_SENTENCE, SRC_SENTENCE),
            )
            .unwrap();

            let treebank = Treebank::from_dir(dir.path()).unwrap();
            let analysis = analyze(&treebank, &ExtractConfig::default()).unwrap();

            assert_eq!(analysis.total_sentences, 3);
            assert_eq!(analysis.total_candidates, 2);
            let ids: Vec<_> = analysis
                .clauses
                .iter()
                .map(|c| (c.candidate.file_id.as_str(), c.candidate.index.to_string()))
                .collect();
            assert_eq!(
                ids,
                vec![("a.tree", "2.1".to_string()), ("b.tree", "1.1".to_string())]
            );
        }

        #[test]
        fn test_analyze_unreadable_file() {
            let dir = tempdir().unwrap();
            let treebank = Treebank::from_paths(vec![dir.path().join("gone.tree")]);

            assert!(matches!(
                analyze(&treebank, &ExtractConfig::default()),
                Err(TreebankError::FileRead { .. })
            ));
        }
    }
}
