//! Corpus statistics and the summary report
//!
//! Counting never fails; turning counts into percentages does when a
//! partition is empty, since a 0% (or NaN) would misdescribe the corpus.

use std::fmt;
use thiserror::Error;

use crate::auditor::count_unmarked;
use crate::clause::{ClauseOrder, RcType};
use crate::extract::Analysis;

/// A two-way split of the classified clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    RelationType,
    WordOrder,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::RelationType => f.write_str("relation type (SRC/ORC)"),
            Partition::WordOrder => f.write_str("word order (SVO/VSO)"),
        }
    }
}

/// Error type for report computation
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot compute {partition} proportions: no classified relative clauses")]
    EmptyCorpusDivision { partition: Partition },
}

/// Integer percentage of `part` in `whole`, rounded half to even
pub fn percent(part: usize, whole: usize, partition: Partition) -> Result<u32, ReportError> {
    if whole == 0 {
        return Err(ReportError::EmptyCorpusDivision { partition });
    }
    let share = part as f64 / whole as f64;
    Ok((share * 100.0).round_ties_even() as u32)
}

/// Raw counts over an analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub total_sentences: usize,
    pub total_clauses: usize,
    pub src: usize,
    pub orc: usize,
    pub svo: usize,
    pub vso: usize,
    pub unmarked_orcs: usize,
}

impl CorpusStats {
    pub fn tally(analysis: &Analysis) -> Self {
        let mut stats = Self {
            total_sentences: analysis.total_sentences,
            total_clauses: analysis.total_candidates,
            unmarked_orcs: count_unmarked(&analysis.clauses),
            ..Self::default()
        };

        for clause in &analysis.clauses {
            match clause.rc_type {
                RcType::Src => stats.src += 1,
                RcType::Orc => stats.orc += 1,
            }
            match clause.order {
                ClauseOrder::Svo => stats.svo += 1,
                ClauseOrder::Vso => stats.vso += 1,
            }
        }

        stats
    }

    pub fn classified(&self) -> usize {
        self.src + self.orc
    }

    /// Attach percentages; fails if either partition is empty
    pub fn report(self) -> Result<CorpusReport, ReportError> {
        let by_type = self.src + self.orc;
        let by_order = self.svo + self.vso;

        Ok(CorpusReport {
            src_percent: percent(self.src, by_type, Partition::RelationType)?,
            orc_percent: percent(self.orc, by_type, Partition::RelationType)?,
            svo_percent: percent(self.svo, by_order, Partition::WordOrder)?,
            vso_percent: percent(self.vso, by_order, Partition::WordOrder)?,
            stats: self,
        })
    }
}

/// Counts and proportions, ready to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusReport {
    pub stats: CorpusStats,
    pub src_percent: u32,
    pub orc_percent: u32,
    pub svo_percent: u32,
    pub vso_percent: u32,
}

impl CorpusReport {
    pub fn from_analysis(analysis: &Analysis) -> Result<Self, ReportError> {
        CorpusStats::tally(analysis).report()
    }

    /// The gap-marking line, printed after the summary
    pub fn unmarked_line(&self) -> String {
        format!(
            "Number of unmarked RPs in ORCs: {}",
            self.stats.unmarked_orcs
        )
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "Total sentences: {}", stats.total_sentences)?;
        writeln!(f, "Total relative clauses: {}", stats.total_clauses)?;
        writeln!(f, "Number of SRCs: {}", stats.src)?;
        writeln!(f, "Number of ORCs: {}", stats.orc)?;
        writeln!(f, "Proportion of SRCs: {}%", self.src_percent)?;
        writeln!(f, "Proportion of ORCs: {}%", self.orc_percent)?;
        writeln!(f, "Number of SVO clauses: {}", stats.svo)?;
        writeln!(f, "Number of VSO clauses: {}", stats.vso)?;
        writeln!(f, "Proportion of SVO clauses: {}%", self.svo_percent)?;
        write!(f, "Proportion of VSO clauses: {}%", self.vso_percent)
    }
}
