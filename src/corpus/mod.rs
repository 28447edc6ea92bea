// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The searchable corpus: document id → transcript text.
//!
//! Loaded once at startup and frozen. Documents are kept in a `BTreeMap`, so
//! iteration follows sorted document ids and two runs over the same files see
//! the same order. The search pipeline relies on that for determinism.
//!
//! Each [`Document`] carries a table of character start offsets. Positions are
//! reported in characters, slicing needs bytes, and the table turns one into
//! the other without rescanning the text for every match.

pub mod detail;
pub mod loader;
pub mod metadata;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::util::text::char_starts;

pub use detail::TranscriptDetail;
pub use loader::load_dir;
pub use metadata::{DocumentIdSource, FilenameMetadata, Metadata, MetadataResolver};

/// One transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    text: String,
    /// Byte offset of each char plus a `text.len()` sentinel.
    char_starts: Vec<usize>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let char_starts = char_starts(&text);
        Self {
            id: id.into(),
            text,
            char_starts,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Empty or whitespace-only documents are skipped by search.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte offset of character `char_idx` (clamped to the end of the text).
    #[inline]
    pub fn byte_offset(&self, char_idx: usize) -> usize {
        self.char_starts[char_idx.min(self.char_len())]
    }

    /// Character index of the char starting at `byte` (or the first char after it).
    #[inline]
    pub fn char_offset(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&b| b < byte)
    }

    /// Text between two character offsets (clamped, half-open).
    pub fn slice_chars(&self, start: usize, end: usize) -> &str {
        let start = self.byte_offset(start);
        let end = self.byte_offset(end).max(start);
        &self.text[start..end]
    }
}

/// A frozen set of documents keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: BTreeMap<String, Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(id, text)` pairs. A repeated id keeps the last text.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut corpus = Self::new();
        for (id, text) in entries {
            corpus.insert(id, text);
        }
        corpus
    }

    /// Load every `.txt` transcript below `root`, including `.txt` members of
    /// `.zip` archives. See [`loader::load_dir`].
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self> {
        loader::load_dir(root)
    }

    /// Add or replace a document.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let doc = Document::new(id, text);
        self.documents.insert(doc.id.clone(), doc);
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Documents in id order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total characters across all documents.
    pub fn total_chars(&self) -> usize {
        self.documents.values().map(Document::char_len).sum()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter)
    }
}
