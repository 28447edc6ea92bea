//! Fixed invariants of the scoring and context constants.
//!
//! If any of these fail, a tuning change has broken an ordering the rest of
//! the pipeline relies on.

use sleuth::scoring::importance::{importance_for_frequency, RARE_COMMON_IMPORTANCE, UNCOMMON_IMPORTANCE};
use sleuth::search::context::adjusted_radius;
use sleuth::{relevance_score, Corpus, KeywordImportance, MIN_SCORE};

use super::common::kws;

// ============================================================================
// IMPORTANCE INVARIANTS
// ============================================================================

#[test]
fn invariant_uncommon_beats_every_common_tier() {
    for frequency in [0, 1, 20, 21, 50, 51, 100, 101, 10_000] {
        let weight = importance_for_frequency(frequency);
        assert!(
            weight < UNCOMMON_IMPORTANCE,
            "INVARIANT VIOLATED: registry keyword at frequency {} weighs {}, not below {}",
            frequency,
            weight,
            UNCOMMON_IMPORTANCE
        );
        assert!(weight > 0.0);
    }
    assert_eq!(importance_for_frequency(0), RARE_COMMON_IMPORTANCE);
}

#[test]
fn invariant_registry_lookup_is_exact() {
    let corpus = Corpus::from_map([("d", "Conan conan CONAN")]);
    let table = KeywordImportance::new(&corpus, &kws(&["Conan"]));

    // Counting is case-insensitive, membership is not.
    assert_eq!(table.frequency("Conan"), Some(3));
    assert!(table.is_common("Conan"));
    assert!(!table.is_common("conan"));
    assert_eq!(table.importance("conan"), UNCOMMON_IMPORTANCE);
}

// ============================================================================
// CONTEXT INVARIANTS
// ============================================================================

#[test]
fn invariant_radius_never_grows() {
    for base in [1, 2, 5, 10, 199, 200, 1_000] {
        for mean in [None, Some(0.2), Some(0.49), Some(0.5), Some(0.69), Some(0.7), Some(1.0)] {
            assert!(adjusted_radius(base, mean) <= base);
        }
    }
}

#[test]
fn invariant_radius_thresholds() {
    assert_eq!(adjusted_radius(200, Some(0.49)), 120);
    assert_eq!(adjusted_radius(200, Some(0.5)), 160);
    assert_eq!(adjusted_radius(200, Some(0.69)), 160);
    assert_eq!(adjusted_radius(200, Some(0.7)), 200);
}

// ============================================================================
// SCORING INVARIANTS
// ============================================================================

#[test]
fn invariant_empty_keywords_score_floor() {
    let table = KeywordImportance::default();
    assert_eq!(relevance_score("任何文本", &[], &table), MIN_SCORE);
    assert_eq!(relevance_score("", &[], &table), MIN_SCORE);
}

#[test]
fn invariant_worked_example() {
    // 2 × 1.0 + 2 chars × 1.0 / 10 chars × 3 - 10 / 2000
    let table = KeywordImportance::default();
    let score = relevance_score("基德今天也在推理呢。", &kws(&["基德"]), &table);
    assert!((score - 2.595).abs() < 1e-9, "score was {}", score);
}
