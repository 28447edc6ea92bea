// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for keyword handling.
//!
//! Throws arbitrary keyword lists at a fixed archive. Keywords are user input:
//! regex metacharacters, lone surrogate replacements, whitespace-only strings,
//! keywords longer than any transcript. None of it should panic, and the
//! result list must stay well-formed.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::testing::sample_corpus;
use sleuth::{SearchConfig, SearchService, MIN_SCORE};

#[derive(Debug, Arbitrary)]
struct Query {
    keywords: Vec<String>,
    max_length: u16,
    prefilter: bool,
}

fuzz_target!(|query: Query| {
    static SERVICES: std::sync::OnceLock<[SearchService; 2]> = std::sync::OnceLock::new();
    let services = SERVICES.get_or_init(|| {
        let strict = SearchConfig {
            require_informative_keywords: true,
            ..SearchConfig::default()
        };
        [
            SearchService::new(sample_corpus(), SearchConfig::default()),
            SearchService::new(sample_corpus(), strict),
        ]
    });
    let service = &services[usize::from(query.prefilter)];

    // Cap the query size to avoid timeouts
    let keywords: Vec<String> = query
        .keywords
        .into_iter()
        .take(8)
        .map(|k| k.chars().take(50).collect())
        .collect();
    let max_length = usize::from(query.max_length);

    // INVARIANT 1: search() never panics
    let results = service.search(&keywords, max_length);

    // INVARIANT 2: budget holds
    let total: usize = results.iter().map(|r| r.char_len()).sum();
    assert!(total <= max_length, "{} chars over budget {}", total, max_length);

    for (i, r) in results.iter().enumerate() {
        // INVARIANT 3: spans lie inside their document
        let doc = service
            .corpus()
            .get(&r.document_id)
            .expect("result for a document outside the corpus");
        assert!(r.start_position <= r.end_position);
        assert!(r.end_position <= doc.char_len());

        // INVARIANT 4: scores are floored and sorted
        assert!(r.relevance_score >= MIN_SCORE);
        if i > 0 {
            assert!(results[i - 1].relevance_score >= r.relevance_score);
        }

        // INVARIANT 5: found keywords come from the query
        assert!(r.keywords_found.iter().all(|k| keywords.contains(k)));
    }

    // INVARIANT 6: same query, same answer
    assert_eq!(results, service.search(&keywords, max_length));
});
