// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the search pipeline.
//!
//! Debug-mode assertions over every result list the service returns. They cost
//! nothing in release builds (`debug_assert!`) and fail loudly during
//! development and in the test suite.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function         | Property                                         |
//! |---------------------------|--------------------------------------------------|
//! | `check_snippet_positions` | `0 <= start <= end <= chars(document)`           |
//! | `check_score_floor`       | `relevance_score >= MIN_SCORE`                   |
//! | `check_budget`            | total chars `<= max_length`                      |
//! | `check_ranked`            | scores are non-increasing                        |
//! | `check_importance_range`  | importance in `(0, 1]`                           |

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

/// Importance tiers must stay ordered and inside `(0, 1]`.
const _: () = {
    const VERY_FREQUENT: f64 = 0.2;
    const FREQUENT: f64 = 0.4;
    const SOMEWHAT: f64 = 0.6;
    const RARE_COMMON: f64 = 0.8;
    const UNCOMMON: f64 = 1.0;

    assert!(VERY_FREQUENT > 0.0);
    assert!(VERY_FREQUENT < FREQUENT);
    assert!(FREQUENT < SOMEWHAT);
    assert!(SOMEWHAT < RARE_COMMON);
    assert!(RARE_COMMON < UNCOMMON);
    assert!(UNCOMMON <= 1.0);
};

use std::cmp::Ordering;

use crate::corpus::Corpus;
use crate::scoring::MIN_SCORE;
use crate::types::Snippet;

// ============================================================================
// SNIPPET CONTRACTS
// ============================================================================

/// Check that a snippet's span lies inside its document.
///
/// # Panics (debug builds only)
/// Panics if `start > end`, or `end` is past the end of the document.
#[inline]
pub fn check_snippet_positions(snippet: &Snippet, corpus: &Corpus) {
    debug_assert!(
        snippet.start_position <= snippet.end_position,
        "Contract violation: snippet start {} > end {} in '{}'",
        snippet.start_position,
        snippet.end_position,
        snippet.document_id
    );
    if let Some(doc) = corpus.get(&snippet.document_id) {
        debug_assert!(
            snippet.end_position <= doc.char_len(),
            "Contract violation: snippet end {} > document length {} in '{}'",
            snippet.end_position,
            doc.char_len(),
            snippet.document_id
        );
    }
}

#[inline]
pub fn check_score_floor(snippet: &Snippet) {
    debug_assert!(
        snippet.relevance_score >= MIN_SCORE,
        "Contract violation: score {} below floor {} in '{}'",
        snippet.relevance_score,
        MIN_SCORE,
        snippet.document_id
    );
}

// ============================================================================
// RESULT LIST CONTRACTS
// ============================================================================

/// Check that the selected snippets fit the character budget.
#[inline]
pub fn check_budget(results: &[Snippet], max_length: usize) {
    let total: usize = results.iter().map(Snippet::char_len).sum();
    debug_assert!(
        total <= max_length,
        "Contract violation: {} result chars exceed budget {}",
        total,
        max_length
    );
}

/// Check that results are in non-increasing score order.
#[inline]
pub fn check_ranked(results: &[Snippet]) {
    for pair in results.windows(2) {
        debug_assert!(
            pair[0].relevance_score.partial_cmp(&pair[1].relevance_score) != Some(Ordering::Less),
            "Contract violation: score {} ranked above {}",
            pair[0].relevance_score,
            pair[1].relevance_score
        );
    }
}

#[inline]
pub fn check_importance_range(keyword: &str, importance: f64) {
    debug_assert!(
        importance > 0.0 && importance <= 1.0,
        "Contract violation: importance of '{}' is {}, outside (0, 1]",
        keyword,
        importance
    );
}

/// Run every result-list contract.
pub fn check_results(results: &[Snippet], corpus: &Corpus, max_length: usize) {
    for snippet in results {
        check_snippet_positions(snippet, corpus);
        check_score_floor(snippet);
    }
    check_budget(results, max_length);
    check_ranked(results);
}
