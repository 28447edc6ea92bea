//! Degenerate inputs: nothing to search, nothing to find, nothing to show.

use crate::common::*;
use sleuth::{Corpus, SearchConfig, SearchService};

#[test]
fn test_no_keywords() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    let none: [&str; 0] = [];
    assert!(service.search(&none, 10_000).is_empty());
    assert!(service.search(&["", ""], 10_000).is_empty());
}

#[test]
fn test_empty_corpus() {
    let service = SearchService::new(Corpus::new(), SearchConfig::default());
    assert!(service.search(&["真相"], 10_000).is_empty());
    assert!(service.sources().is_empty());
}

#[test]
fn test_no_matches() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    assert!(service.search(&["怪盗基德"], 10_000).is_empty());
}

#[test]
fn test_zero_budget() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    assert!(service.search(&["真相"], 0).is_empty());
}

#[test]
fn test_blank_documents_are_skipped() {
    let service = service_for(&[("blank", "  \n\t \n   "), ("empty", "")]);
    assert!(service.search(&[" "], 10_000).is_empty());
    assert!(service.search(&["\n"], 10_000).is_empty());
}

#[test]
fn test_short_context_is_dropped() {
    let service = service_for(&[("tiny", "真相。"), ("doc1", SCENARIO_DOC)]);
    let results = service.search(&["真相"], 10_000);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, "doc1");
}

#[test]
fn test_duplicate_keywords_count_once() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    let once = service.search(&["真相"], 10_000);
    let twice = service.search(&["真相", "真相"], 10_000);
    assert_eq!(once, twice);
}

#[test]
fn test_prefilter_drops_lone_common_keyword() {
    let text = "这就是唯一的真相。".repeat(120);
    let entries = [("repeat", text.as_str())];

    let open = service_for(&entries);
    assert!(!open.search(&["真相"], 10_000).is_empty());

    let strict = service_with_config(
        &entries,
        SearchConfig::builder()
            .require_informative_keywords(true)
            .build()
            .unwrap(),
    );
    assert!(strict.search(&["真相"], 10_000).is_empty());
}

#[test]
fn test_prefilter_keeps_informative_snippets() {
    let strict = service_with_config(
        &[
            ("pair", "柯南和小兰一起去了钟楼。"),
            ("rare", "柯南在米花町遇到了基德。"),
        ],
        SearchConfig::builder()
            .require_informative_keywords(true)
            .build()
            .unwrap(),
    );

    let results = strict.search(&["柯南", "小兰"], 10_000);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, "pair");

    let results = strict.search(&["柯南", "基德"], 10_000);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, "rare");

    assert!(strict.search(&["柯南"], 10_000).is_empty());
}

#[test]
fn test_search_default_uses_configured_budget() {
    let config = SearchConfig::builder().max_length(10).build().unwrap();
    let service = service_with_config(&[("doc1", SCENARIO_DOC)], config);

    let results = service.search_default(&["真相"]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "...");
}

#[test]
fn test_truncated_snippet_keeps_full_snippet_keywords() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    let results = service.search(&["真相"], 10);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "...");
    assert_eq!(results[0].highlighted_text, "...");
    assert_eq!(results[0].keywords_found, kws(&["真相"]));
}

#[test]
fn test_match_at_document_edges() {
    let service = service_for(&[("edge", "真相在最前面，而结尾也是真相")]);
    let results = service.search(&["真相"], 10_000);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].start_position, 0);
    assert_eq!(results[0].end_position, 14);
}
