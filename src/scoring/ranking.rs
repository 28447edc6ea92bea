// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking and the character budget.
//!
//! Ranking is score descending, nothing else. The sort is stable, so ties keep
//! the order the pipeline produced them in (document id, then position), which
//! is what makes two identical queries return identical lists.
//!
//! The budget is greedy: take snippets by rank while the running character
//! total fits, and stop at the first one that doesn't. The only exception is
//! when the very first snippet is already too long. Returning nothing would be
//! useless, so it gets truncated to fit and returned alone.

use std::cmp::Ordering;

use crate::types::Snippet;
use crate::util::highlight::Highlighter;
use crate::util::text::take_chars;

/// Compare two snippets for ranking: higher score first.
///
/// Incomparable scores (NaN) compare equal and keep their input order.
pub fn compare_snippets(a: &Snippet, b: &Snippet) -> Ordering {
    b.relevance_score
        .partial_cmp(&a.relevance_score)
        .unwrap_or(Ordering::Equal)
}

/// Stable sort by [`compare_snippets`].
pub fn rank(snippets: &mut [Snippet]) {
    snippets.sort_by(compare_snippets);
}

/// How an oversized leading snippet gets cut down.
#[derive(Debug, Clone, Copy)]
pub struct Truncation<'a> {
    /// Characters held back from the budget before appending the ellipsis.
    pub reserve: usize,
    pub ellipsis: &'a str,
    pub highlighter: &'a Highlighter,
}

/// Greedy top-k under a character budget. `ranked` must already be sorted.
///
/// A zero budget selects nothing.
pub fn select_top(ranked: Vec<Snippet>, max_length: usize, truncation: Truncation<'_>) -> Vec<Snippet> {
    let mut selected = Vec::new();
    if max_length == 0 {
        return selected;
    }

    let mut total = 0usize;
    for snippet in ranked {
        let len = snippet.char_len();
        if total + len <= max_length {
            total += len;
            selected.push(snippet);
            continue;
        }
        if selected.is_empty() {
            selected.push(truncate(snippet, max_length, truncation));
        }
        break;
    }
    selected
}

/// Cut `snippet` down to at most `max_length` characters, ending in the ellipsis.
pub fn truncate(mut snippet: Snippet, max_length: usize, truncation: Truncation<'_>) -> Snippet {
    let keep = max_length.saturating_sub(truncation.reserve);
    let mut text = format!("{}{}", take_chars(&snippet.text, keep), truncation.ellipsis);
    if text.chars().count() > max_length {
        text = take_chars(&text, max_length).to_string();
    }

    snippet.highlighted_text = truncation
        .highlighter
        .highlight(&text, &snippet.keywords_found);
    snippet.text = text;
    snippet
}
