// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind snippet relevance.
//!
//! ```text
//! importance_sum = Σ importance(k) × 2
//! density_bonus  = 0.5 × n × mean(importance)        (only when n > 1)
//!                + Σ chars(k) × importance(k) / chars(text) × 3
//! length_penalty = chars(text) / 2000
//! score          = max(0.1, importance_sum + density_bonus - length_penalty)
//! ```
//!
//! Short snippets dense with rare keywords win. Long snippets pay a small
//! penalty so a 2000-character wall of text doesn't outrank a crisp sentence
//! with the same matches. The floor keeps every surviving snippet positive.

use super::KeywordImportance;
use crate::util::text::char_len;

// =============================================================================
// SCORING CONSTANTS
// =============================================================================

/// No snippet scores below this.
pub const MIN_SCORE: f64 = 0.1;

/// Multiplier on each keyword's importance.
pub const IMPORTANCE_WEIGHT: f64 = 2.0;

/// Bonus per keyword (scaled by mean importance) when several keywords co-occur.
pub const MULTI_KEYWORD_BONUS: f64 = 0.5;

/// Multiplier on the keyword-coverage ratio.
pub const COVERAGE_WEIGHT: f64 = 3.0;

/// Characters of text that cost one point.
pub const LENGTH_PENALTY_CHARS: f64 = 2000.0;

/// Score `text` given the keywords found in it.
///
/// Never returns less than [`MIN_SCORE`]. An empty keyword list scores exactly
/// the floor.
pub fn relevance_score(text: &str, keywords: &[String], importance: &KeywordImportance) -> f64 {
    if keywords.is_empty() {
        return MIN_SCORE;
    }

    let weights: Vec<f64> = keywords.iter().map(|k| importance.importance(k)).collect();
    let n = keywords.len();

    let importance_sum: f64 = weights.iter().map(|w| w * IMPORTANCE_WEIGHT).sum();

    let mut density_bonus = if n > 1 {
        let mean = weights.iter().sum::<f64>() / n as f64;
        MULTI_KEYWORD_BONUS * n as f64 * mean
    } else {
        0.0
    };

    let text_chars = char_len(text);
    let length_penalty = text_chars as f64 / LENGTH_PENALTY_CHARS;

    if text_chars > 0 {
        let covered: f64 = keywords
            .iter()
            .zip(&weights)
            .map(|(k, w)| char_len(k) as f64 * w)
            .sum();
        density_bonus += covered / text_chars as f64 * COVERAGE_WEIGHT;
    }

    (importance_sum + density_bonus - length_penalty).max(MIN_SCORE)
}
