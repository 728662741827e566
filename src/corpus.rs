//! Treebank file discovery and loading
//!
//! A treebank is a directory of `.tree` files (optionally gzip-compressed as
//! `.tree.gz`) with one bracketed sentence per line. Files are kept in sorted
//! order so that every run visits them in the same sequence.

use bstr::ByteSlice;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name suffixes recognized as tree files
pub const TREE_SUFFIXES: [&str; 2] = [".tree", ".tree.gz"];

/// Errors locating or reading treebank files
#[derive(Debug, Error)]
pub enum TreebankError {
    #[error("Input directory not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("No tree files ({}) in {}", TREE_SUFFIXES.join(", "), path.display())]
    NoTreeFiles { path: PathBuf },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One tree file of a treebank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFile {
    /// File name, used as the file id in results
    pub id: String,
    pub path: PathBuf,
}

impl TreeFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { id, path }
    }

    pub fn is_gzipped(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "gz")
    }

    /// Read the whole file, decompressing if needed
    pub fn read_bytes(&self) -> Result<Vec<u8>, TreebankError> {
        let file_read = |source| TreebankError::FileRead {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(file_read)?;
        let mut reader: Box<dyn Read> = if self.is_gzipped() {
            Box::new(MultiGzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(file_read)?;
        Ok(bytes)
    }

    /// Read the file as newline-delimited sentences
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Blank lines are kept so
    /// that sentence positions match line numbers.
    pub fn read_sentences(&self) -> Result<Vec<String>, TreebankError> {
        let bytes = self.read_bytes()?;
        let sentences: Vec<String> = bytes.to_str_lossy().lines().map(str::to_string).collect();
        debug!("Read {} sentences from {}", sentences.len(), self.id);
        Ok(sentences)
    }
}

/// The set of tree files to analyze
#[derive(Debug, Clone, Default)]
pub struct Treebank {
    files: Vec<TreeFile>,
}

impl Treebank {
    /// Collect all tree files directly inside `dir`
    ///
    /// Fails if the directory does not exist or holds no tree files.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TreebankError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TreebankError::InputNotFound {
                path: dir.to_path_buf(),
            });
        }

        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        let mut paths = Vec::new();
        for suffix in TREE_SUFFIXES {
            let pattern = format!("{}/*{}", escaped, suffix);
            paths.extend(
                glob::glob(&pattern)?
                    .filter_map(Result::ok)
                    .filter(|path| path.is_file()),
            );
        }

        if paths.is_empty() {
            return Err(TreebankError::NoTreeFiles {
                path: dir.to_path_buf(),
            });
        }

        let treebank = Self::from_paths(paths);
        debug!("Found {} tree files in {}", treebank.len(), dir.display());
        Ok(treebank)
    }

    /// Create from explicit file paths
    ///
    /// Files are sorted by id for deterministic results.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut files: Vec<TreeFile> = paths.into_iter().map(TreeFile::new).collect();
        files.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
        files.dedup();
        Self { files }
    }

    pub fn files(&self) -> &[TreeFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
