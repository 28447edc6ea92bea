// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for score calculation invariants.
//!
//! Scores must be finite, floored, and deterministic. No NaN sneaking through
//! from an empty text or a zero-length keyword.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::{relevance_score, Corpus, KeywordImportance, MIN_SCORE};

#[derive(Debug, Arbitrary)]
struct Input {
    corpus_text: String,
    registry: Vec<String>,
    text: String,
    keywords: Vec<String>,
}

fuzz_target!(|input: Input| {
    let registry: Vec<String> = input.registry.into_iter().take(16).collect();
    let keywords: Vec<String> = input.keywords.into_iter().take(16).collect();

    let corpus = Corpus::from_map([("d", input.corpus_text.as_str())]);
    let importance = KeywordImportance::new(&corpus, &registry);

    for k in &keywords {
        let w = importance.importance(k);
        assert!(w > 0.0 && w <= 1.0, "importance {} out of range for {:?}", w, k);
    }

    let score = relevance_score(&input.text, &keywords, &importance);
    assert!(score.is_finite());
    assert!(score >= MIN_SCORE);
    assert_eq!(score, relevance_score(&input.text, &keywords, &importance));
});
