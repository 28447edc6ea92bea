// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword importance: how much a keyword tells you.
//!
//! Keywords outside the common registry get full weight. Registry keywords are
//! weighted by how often they show up across the whole corpus, counted once at
//! construction:
//!
//! | Corpus frequency | Importance |
//! |------------------|------------|
//! | > 100            | 0.2        |
//! | > 50             | 0.4        |
//! | > 20             | 0.6        |
//! | otherwise        | 0.8        |
//! | not in registry  | 1.0        |
//!
//! Counting happens over every document joined by a single space, with the
//! same case-insensitive literal matching search uses.

use std::collections::HashMap;

use crate::corpus::Corpus;
use crate::util::highlight::literal_pattern;

/// Weight of a keyword outside the common registry.
pub const UNCOMMON_IMPORTANCE: f64 = 1.0;

/// `(frequency threshold, importance)` pairs, checked in order. Frequencies
/// strictly above the threshold take that weight.
const FREQUENCY_TIERS: [(usize, f64); 3] = [(100, 0.2), (50, 0.4), (20, 0.6)];

/// Weight of a registry keyword that is rare in the corpus.
pub const RARE_COMMON_IMPORTANCE: f64 = 0.8;

/// Registry importance for a keyword seen `frequency` times.
pub fn importance_for_frequency(frequency: usize) -> f64 {
    FREQUENCY_TIERS
        .iter()
        .find(|(threshold, _)| frequency > *threshold)
        .map(|(_, weight)| *weight)
        .unwrap_or(RARE_COMMON_IMPORTANCE)
}

/// Frequency table for the common-keyword registry. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct KeywordImportance {
    /// Registry keywords in registry order.
    order: Vec<String>,
    frequencies: HashMap<String, usize>,
}

impl KeywordImportance {
    /// Count every registry keyword over `corpus`.
    pub fn new(corpus: &Corpus, registry: &[String]) -> Self {
        let joined = corpus
            .documents()
            .map(|doc| doc.text())
            .collect::<Vec<_>>()
            .join(" ");

        let mut order = Vec::with_capacity(registry.len());
        let mut frequencies = HashMap::with_capacity(registry.len());
        for keyword in registry {
            if frequencies.contains_key(keyword) {
                continue;
            }
            let count = literal_pattern(keyword)
                .map(|re| re.find_iter(&joined).count())
                .unwrap_or(0);
            order.push(keyword.clone());
            frequencies.insert(keyword.clone(), count);
        }

        Self { order, frequencies }
    }

    /// Importance of `keyword`, in `(0, 1]`.
    ///
    /// Registry membership is an exact, case-sensitive lookup.
    pub fn importance(&self, keyword: &str) -> f64 {
        match self.frequencies.get(keyword) {
            Some(&frequency) => importance_for_frequency(frequency),
            None => UNCOMMON_IMPORTANCE,
        }
    }

    /// Corpus frequency of a registry keyword. `None` outside the registry.
    pub fn frequency(&self, keyword: &str) -> Option<usize> {
        self.frequencies.get(keyword).copied()
    }

    pub fn is_common(&self, keyword: &str) -> bool {
        self.frequencies.contains_key(keyword)
    }

    /// `(keyword, frequency)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|k| (k.as_str(), self.frequencies.get(k).copied().unwrap_or(0)))
    }

    /// Mean importance of `keywords`, or `None` for an empty slice.
    pub fn mean(&self, keywords: &[String]) -> Option<f64> {
        if keywords.is_empty() {
            return None;
        }
        let sum: f64 = keywords.iter().map(|k| self.importance(k)).sum();
        Some(sum / keywords.len() as f64)
    }
}
