// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snippet extraction over hostile transcript text.
//!
//! The archive is scraped from forums and subtitle dumps. Mixed scripts,
//! combining marks, stray CRs and delimiter runs all show up. Character and
//! byte offsets must never get mixed up, whatever the text looks like.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleuth::{Corpus, DocumentIdSource, SearchConfig, SearchService};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    keyword: String,
    base_radius: u8,
    merge_gap: u8,
}

fuzz_target!(|input: Input| {
    let text: String = input.text.chars().take(2_000).collect();
    let keyword: String = input.keyword.chars().take(20).collect();

    let mut config = SearchConfig::default();
    config.base_radius = usize::from(input.base_radius).max(1);
    config.merge_gap = usize::from(input.merge_gap);

    let corpus = Corpus::from_map([("fuzz.txt", text.as_str())]);
    let service = SearchService::with_resolver(corpus, config, DocumentIdSource);
    let results = service.search(&[keyword.as_str()], usize::MAX / 2);
    let char_len = text.chars().count();

    for r in &results {
        assert!(r.start_position <= r.end_position);
        assert!(r.end_position <= char_len);
        assert!(!r.text.is_empty());

        // Unmerged snippets are exactly their span, trimmed
        if !r.text.contains(" ... ") {
            let span: String = text
                .chars()
                .skip(r.start_position)
                .take(r.end_position - r.start_position)
                .collect();
            assert_eq!(span.trim(), r.text);
        }
    }
});
