// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet merging within a document.
//!
//! Two matches a sentence apart produce two snippets that mostly overlap.
//! Showing both wastes budget and reads like a stutter, so snippets from the
//! same document that overlap or sit closer than the merge gap are folded into
//! one. The merged snippet keeps the first one's score and adds half of each
//! absorbed neighbour's, so a cluster of matches ranks above a lone hit.
//!
//! Grouping is by document id. Positions are only comparable within a single
//! document, and source labels are not unique per document.
//!
//! **Invariant**: within a document, emitted snippets are ordered by start
//! position and consecutive ones are at least `gap` characters apart.

use std::collections::HashMap;

use crate::types::Snippet;
use crate::util::highlight::Highlighter;

/// Score share an absorbed snippet contributes to the merge.
pub const ABSORBED_SCORE_WEIGHT: f64 = 0.5;

/// How neighbouring snippets are merged.
#[derive(Debug, Clone, Copy)]
pub struct MergePolicy<'a> {
    /// Merge when `next.start - current.end` is below this (overlaps always merge).
    pub gap: usize,
    /// Placed between the two texts.
    pub separator: &'a str,
    pub highlighter: &'a Highlighter,
}

impl MergePolicy<'_> {
    fn should_merge(&self, current: &Snippet, next: &Snippet) -> bool {
        let distance = next.start_position as i64 - current.end_position as i64;
        distance < self.gap as i64
    }
}

/// Fold `next` into `current`.
pub fn merge_pair(mut current: Snippet, next: Snippet, policy: MergePolicy<'_>) -> Snippet {
    if !current.text.ends_with(&next.text) {
        current.text.push_str(policy.separator);
        current.text.push_str(&next.text);
    }
    for keyword in next.keywords_found {
        if !current.keywords_found.contains(&keyword) {
            current.keywords_found.push(keyword);
        }
    }
    current.relevance_score += next.relevance_score * ABSORBED_SCORE_WEIGHT;
    // `next` may sit entirely inside `current` when its radius was narrower.
    current.end_position = current.end_position.max(next.end_position);
    current.highlighted_text = policy
        .highlighter
        .highlight(&current.text, &current.keywords_found);
    current
}

/// Group by document, sort each group by start position, merge neighbours.
///
/// Groups come out in the order their documents first appear in `snippets`.
pub fn deduplicate(snippets: Vec<Snippet>, policy: MergePolicy<'_>) -> Vec<Snippet> {
    let mut groups: Vec<Vec<Snippet>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for snippet in snippets {
        let slot = *index.entry(snippet.document_id.clone()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(snippet);
    }

    let mut merged = Vec::new();
    for mut group in groups {
        group.sort_by_key(|s| s.start_position);

        let mut iter = group.into_iter();
        let Some(mut current) = iter.next() else {
            continue;
        };
        for next in iter {
            if policy.should_merge(&current, &next) {
                current = merge_pair(current, next, policy);
            } else {
                merged.push(std::mem::replace(&mut current, next));
            }
        }
        merged.push(current);
    }
    merged
}
