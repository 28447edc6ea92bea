//! Ordering and the character budget.

use crate::common::*;
use sleuth::SearchConfig;

#[test]
fn test_uncommon_keyword_outranks_common_one() {
    let config = SearchConfig::builder()
        .common_keywords(["柯南"])
        .build()
        .unwrap();
    let service = service_with_config(
        &[("d1", "柯南今天也在推理呢。"), ("d2", "基德今天也在推理呢。")],
        config,
    );

    let results = service.search(&["柯南", "基德"], 10_000);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document_id, "d2");
    assert_eq!(results[1].document_id, "d1");
    assert!(results[0].relevance_score > results[1].relevance_score);
}

#[test]
fn test_more_keywords_rank_higher() {
    let service = service_with_config(
        &[
            ("both", "柯南和小兰一起去了钟楼。"),
            ("one", "柯南一个人去了米花町。"),
        ],
        config_without_registry(),
    );

    let results = service.search(&["柯南", "小兰"], 10_000);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document_id, "both");
    assert_eq!(results[0].keywords_found, kws(&["柯南", "小兰"]));
}

#[test]
fn test_budget_stops_at_first_misfit() {
    let service = service_with_config(
        &[
            ("a", "基德在钟楼顶上留下了预告函。"),
            ("b", "基德又一次从警方眼皮底下逃走了，谁也没看清他的脸。"),
            ("c", "基德。"),
        ],
        config_without_registry(),
    );

    let all = service.search(&["基德"], 10_000);
    assert_eq!(all.len(), 2);
    let first = all[0].char_len();

    let limited = service.search(&["基德"], first);
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].text, all[0].text);
    assert_well_formed(&limited, service.corpus(), first);
}

#[test]
fn test_oversized_first_snippet_is_truncated() {
    let text = format!("米花町{}", "字".repeat(497));
    let service = service_for(&[("long", &text)]);

    let results = service.search(&["米花町"], 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "...");

    let results = service.search(&["米花町"], 150);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].char_len(), 53);
    assert!(results[0].text.starts_with("米花町"));
    assert!(results[0].text.ends_with("..."));
    assert!(results[0].highlighted_text.starts_with("<mark>米花町</mark>"));
}

#[test]
fn test_sample_archive_results_well_formed() {
    let service = sleuth::SearchService::new(sample_corpus(), SearchConfig::default());
    for budget in [20, 60, 200, 10_000] {
        let results = service.search(&["柯南", "真相", "小兰"], budget);
        assert!(!results.is_empty());
        assert_well_formed(&results, service.corpus(), budget);
    }
    assert_keywords_present(&service.search(&["柯南", "真相", "小兰"], 10_000));
}
