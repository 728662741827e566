//! Flat per-clause records and table export
//!
//! One row per classified clause with the columns
//! `file-id, sent-index, rc-type, clause-order, clause`. Rows list every SRC
//! first and then every ORC, each group in treebank order.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::clause::{ClassifiedClause, ClauseOrder, RcType};

/// Column names, in order
pub const COLUMNS: [&str; 5] = ["file-id", "sent-index", "rc-type", "clause-order", "clause"];

/// Error type for table export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write table: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),
}

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseRecord {
    #[serde(rename = "file-id")]
    pub file_id: String,
    #[serde(rename = "sent-index")]
    pub sent_index: String,
    #[serde(rename = "rc-type")]
    pub rc_type: RcType,
    #[serde(rename = "clause-order")]
    pub clause_order: ClauseOrder,
    pub clause: String,
}

impl From<&ClassifiedClause> for ClauseRecord {
    fn from(clause: &ClassifiedClause) -> Self {
        Self {
            file_id: clause.candidate.file_id.clone(),
            sent_index: clause.candidate.index.to_string(),
            rc_type: clause.rc_type,
            clause_order: clause.order,
            clause: clause.candidate.text.clone(),
        }
    }
}

/// Build the table rows: SRCs, then ORCs
pub fn records(clauses: &[ClassifiedClause]) -> Vec<ClauseRecord> {
    [RcType::Src, RcType::Orc]
        .into_iter()
        .flat_map(|rc_type| {
            clauses
                .iter()
                .filter(move |clause| clause.rc_type == rc_type)
                .map(ClauseRecord::from)
        })
        .collect()
}

/// Output format for the table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Tab-separated values with a header row
    Tsv,
    /// One JSON object per line
    JsonLines,
}

impl TableFormat {
    /// Pick the format from a file extension; anything but `.jsonl` is TSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jsonl") => TableFormat::JsonLines,
            _ => TableFormat::Tsv,
        }
    }
}

/// Tabs and line breaks would split a TSV cell
fn tsv_cell(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ")
}

/// Write records to any writer
pub fn write_table<W: Write>(
    records: &[ClauseRecord],
    format: TableFormat,
    mut writer: W,
) -> Result<(), ExportError> {
    match format {
        TableFormat::Tsv => {
            writeln!(writer, "{}", COLUMNS.join("\t"))?;
            for record in records {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}",
                    tsv_cell(&record.file_id),
                    record.sent_index,
                    record.rc_type,
                    record.clause_order,
                    tsv_cell(&record.clause)
                )?;
            }
        }
        TableFormat::JsonLines => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a file, choosing the format from its extension
pub fn export_table(path: &Path, records: &[ClauseRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = TableFormat::from_path(path);
    write_table(records, format, BufWriter::new(file))?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
