//! Chunk splitting for raw bracketed sentences
//!
//! A sentence line is cut at every closing parenthesis. The pieces in between
//! ("chunks") are the units the clause locator scans; a chunk never contains a
//! `)` and is never empty.

use memchr::memchr_iter;

/// Delimiter between chunks
pub const CHUNK_DELIMITER: char = ')';

/// One raw sentence of a tree file, cut into chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// 1-based position within the source file
    pub index: usize,
    pub chunks: Vec<&'a str>,
}

impl<'a> Sentence<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self {
            index,
            chunks: split(text),
        }
    }
}

/// Split a sentence on `)` and drop empty pieces
pub fn split(sentence: &str) -> Vec<&str> {
    let bytes = sentence.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;

    // ')' is ASCII, so every hit is a char boundary
    for end in memchr_iter(CHUNK_DELIMITER as u8, bytes) {
        if end > start {
            chunks.push(&sentence[start..end]);
        }
        start = end + 1;
    }
    if start < bytes.len() {
        chunks.push(&sentence[start..]);
    }

    chunks
}

/// Re-close each chunk with the delimiter and concatenate
pub fn rejoin(chunks: &[&str]) -> String {
    let mut text = String::with_capacity(chunks.iter().map(|c| c.len() + 1).sum());
    for chunk in chunks {
        text.push_str(chunk);
        text.push(CHUNK_DELIMITER);
    }
    text
}
