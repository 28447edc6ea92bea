// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Context extraction: turn a match into a readable snippet.
//!
//! A raw character window cuts sentences in half, which reads badly. So the
//! window is only a starting point: its edges are pushed outward to the
//! nearest sentence delimiter (`。！？` or a newline). How wide the window starts
//! depends on the neighbourhood. A match surrounded by common keywords gets a
//! narrower window, since those keywords are everywhere and a long excerpt
//! about them says little.
//!
//! All positions here are character offsets into the document.

use crate::config::SearchConfig;
use crate::corpus::{Document, Metadata};
use crate::scoring::{relevance_score, KeywordImportance};
use crate::types::Snippet;
use crate::util::highlight::Highlighter;
use crate::util::text::{char_len, is_sentence_delimiter};

use super::matches::{KeywordSet, Match};

/// Shrink `base` when the keywords nearby are common.
///
/// | mean importance | radius             |
/// |-----------------|--------------------|
/// | none found      | base               |
/// | < 0.5           | floor(base × 0.6)  |
/// | < 0.7           | floor(base × 0.8)  |
/// | otherwise       | base               |
pub fn adjusted_radius(base: usize, mean_importance: Option<f64>) -> usize {
    match mean_importance {
        Some(mean) if mean < 0.5 => base * 3 / 5,
        Some(mean) if mean < 0.7 => base * 4 / 5,
        _ => base,
    }
}

/// One past the last sentence delimiter strictly before `pos`, or 0.
pub fn sentence_start(document: &Document, pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let byte = document.byte_offset(pos);
    document.text()[..byte]
        .rfind(is_sentence_delimiter)
        .map(|b| document.char_offset(b) + 1)
        .unwrap_or(0)
}

/// One past the first sentence delimiter at or after `pos`, or the document end.
pub fn sentence_end(document: &Document, pos: usize) -> usize {
    let byte = document.byte_offset(pos);
    document.text()[byte..]
        .find(is_sentence_delimiter)
        .map(|b| document.char_offset(byte + b) + 1)
        .unwrap_or_else(|| document.char_len())
}

/// Keeps a snippet only if it says something specific: at least one uncommon
/// keyword, or at least two distinct keywords.
pub fn passes_prefilter(keywords_found: &[String], importance: &KeywordImportance) -> bool {
    if keywords_found.iter().any(|k| !importance.is_common(k)) {
        return true;
    }
    let mut distinct: Vec<&str> = keywords_found.iter().map(String::as_str).collect();
    distinct.sort_unstable();
    distinct.dedup();
    distinct.len() >= 2
}

/// Everything a query needs to turn matches into snippets.
#[derive(Debug, Clone, Copy)]
pub struct ContextExtractor<'a> {
    pub keywords: &'a KeywordSet,
    pub importance: &'a KeywordImportance,
    pub config: &'a SearchConfig,
    pub highlighter: &'a Highlighter,
}

impl ContextExtractor<'_> {
    /// Build the snippet around `m`, or `None` if the surrounding text is too
    /// short to be worth showing.
    pub fn extract(&self, m: &Match<'_>, metadata: &Metadata) -> Option<Snippet> {
        let document = m.document;
        let len = document.char_len();
        let base = self.config.base_radius;

        let preliminary = document.slice_chars(
            m.char_offset.saturating_sub(base),
            m.char_offset.saturating_add(base).min(len),
        );
        let nearby = self.keywords.keywords_in(preliminary);
        let radius = adjusted_radius(base, self.importance.mean(&nearby));

        let start = sentence_start(document, m.char_offset.saturating_sub(radius));
        let end = sentence_end(document, m.char_offset.saturating_add(radius).min(len));

        let text = document.slice_chars(start, end).trim();
        if text.is_empty() || char_len(text) < self.config.min_snippet_chars {
            return None;
        }

        let mut keywords_found = self.keywords.keywords_in(text);
        if keywords_found.is_empty() {
            keywords_found.push(m.keyword.to_string());
        }

        Some(Snippet {
            document_id: document.id().to_string(),
            relevance_score: relevance_score(text, &keywords_found, self.importance),
            highlighted_text: self.highlighter.highlight(text, &keywords_found),
            text: text.to_string(),
            keywords_found,
            source: metadata.source.clone(),
            url: metadata.url.clone(),
            start_position: start,
            end_position: end,
        })
    }
}
