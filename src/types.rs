// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The unit of output: a scored, highlighted snippet.
//!
//! A snippet is born in the context extractor, possibly swallowed by a
//! neighbour during merging, and possibly truncated by the budget selector.
//! None of them outlive the query that produced them.
//!
//! # Invariants
//!
//! - `0 <= start_position <= end_position <= chars(document)`. Positions are
//!   character offsets into the original document text, not into `text`.
//!   After a merge the span runs from the first constituent's start to the
//!   furthest constituent end.
//! - `relevance_score >= MIN_SCORE`.
//! - every entry in `keywords_found` occurs (case-insensitively) in `text`,
//!   except when truncation cuts it off.

use serde::{Deserialize, Serialize};

/// A sentence-bounded excerpt around one or more keyword matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Corpus key of the document this came from.
    pub document_id: String,
    /// Excerpt text (trimmed).
    pub text: String,
    /// Query keywords present in `text`, in query order.
    pub keywords_found: Vec<String>,
    /// Relevance score, never below 0.1.
    pub relevance_score: f64,
    /// Display label resolved from the document's metadata.
    pub source: String,
    /// Canonical link for the source, if known.
    pub url: Option<String>,
    /// `text` with keyword occurrences wrapped in highlight markers.
    pub highlighted_text: String,
    /// Character offset of the snippet start in the original document.
    pub start_position: usize,
    /// Character offset one past the snippet end in the original document.
    pub end_position: usize,
}

/// The name the request layer uses for a snippet.
pub type SearchResult = Snippet;

impl Snippet {
    /// Length of the snippet text in characters (the unit budgets are measured in).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
