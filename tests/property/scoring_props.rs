//! Property tests for scoring and importance.

use proptest::prelude::*;
use sleuth::scoring::importance::importance_for_frequency;
use sleuth::search::context::adjusted_radius;
use sleuth::{relevance_score, Corpus, KeywordImportance, MIN_SCORE};

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[柯南小兰真相钟楼a-zA-Z。！？\n ]{0,300}").unwrap()
}

fn keyword_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[柯南小兰真相钟楼a-z]{1,4}").unwrap(), 0..6)
}

proptest! {
    /// Property: no text and keyword combination scores below the floor.
    #[test]
    fn prop_score_at_least_floor(
        text in text_strategy(),
        keywords in keyword_list_strategy(),
        registry in keyword_list_strategy(),
    ) {
        let corpus = Corpus::from_map([("d", text.as_str())]);
        let table = KeywordImportance::new(&corpus, &registry);
        let score = relevance_score(&text, &keywords, &table);
        prop_assert!(score >= MIN_SCORE, "score {} below floor", score);
        prop_assert!(score.is_finite());
    }

    /// Property: importance is in (0, 1] and only registry keywords go below 1.
    #[test]
    fn prop_importance_in_range(
        texts in prop::collection::vec(text_strategy(), 0..4),
        registry in keyword_list_strategy(),
        probe in "[柯南小兰真相钟楼a-z]{1,4}",
    ) {
        let corpus: Corpus = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("d{i}"), t.clone()))
            .collect();
        let table = KeywordImportance::new(&corpus, &registry);
        let weight = table.importance(&probe);
        prop_assert!(weight > 0.0 && weight <= 1.0);
        if !registry.contains(&probe) {
            prop_assert_eq!(weight, 1.0);
        }
    }

    /// Property: a keyword seen more often never weighs more.
    #[test]
    fn prop_importance_monotone(a in 0usize..500, b in 0usize..500) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(importance_for_frequency(high) <= importance_for_frequency(low));
    }

    /// Property: adjusting the radius only ever shrinks it.
    #[test]
    fn prop_adjusted_radius_bounded(base in 0usize..10_000, mean in prop::option::of(0.0f64..=1.0)) {
        let radius = adjusted_radius(base, mean);
        prop_assert!(radius <= base);
        prop_assert!(radius >= base * 3 / 5);
    }
}
