//! Basic search correctness: the right snippet, the right markup.

use crate::common::*;
use sleuth::{SearchConfig, SearchService};

#[test]
fn test_single_document_scenario() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    let results = service.search(&["真相"], 10_000);

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.document_id, "doc1");
    assert!(r.text.contains("真相"));
    assert!(r.highlighted_text.contains("<mark>真相</mark>"));
    assert_eq!(r.keywords_found, vec!["真相"]);
    assert!(r.relevance_score >= sleuth::MIN_SCORE);
}

#[test]
fn test_matching_ignores_case_and_keeps_query_spelling() {
    let service = service_for(&[("en", "Conan said the truth is always one and only one")]);
    let results = service.search(&["CONAN"], 10_000);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].keywords_found, vec!["CONAN"]);
    assert!(results[0]
        .highlighted_text
        .starts_with("<mark>CONAN</mark> said"));
}

#[test]
fn test_keywords_are_literals() {
    let service = service_for(&[
        ("a", "青山老师说(笑)这是秘密。后面还有很多内容呢。"),
        ("b", "没有句点的句子啊啊啊啊"),
    ]);

    let results = service.search(&["(笑)"], 10_000);
    assert_eq!(results.len(), 1);
    assert!(results[0].highlighted_text.contains("<mark>(笑)</mark>"));

    assert!(service.search(&["."], 10_000).is_empty());
}

#[test]
fn test_two_keywords_in_one_sentence_collapse_to_one_snippet() {
    let service = service_for(&[("doc1", SCENARIO_DOC)]);
    let results = service.search(&["真相", "柯南"], 10_000);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, SCENARIO_DOC);
    assert_eq!(results[0].keywords_found, vec!["真相", "柯南"]);
    assert!(results[0].highlighted_text.contains("<mark>柯南</mark>"));
    assert!(results[0].highlighted_text.contains("<mark>真相</mark>"));
}

#[test]
fn test_positions_are_character_offsets() {
    let text = "前言。\n问：那个案件的真相是什么？\n答：秘密。";
    let service = service_with_config(
        &[("d", text)],
        SearchConfig::builder().base_radius(3).build().unwrap(),
    );
    let results = service.search(&["真相"], 10_000);

    assert_eq!(results.len(), 1);
    let r = &results[0];
    let expected: String = text
        .chars()
        .skip(r.start_position)
        .take(r.end_position - r.start_position)
        .collect();
    assert_eq!(expected.trim(), r.text);
    assert_eq!(r.text, "问：那个案件的真相是什么？");
}

#[test]
fn test_filename_metadata_annotates_results() {
    let service = SearchService::new(sample_corpus(), SearchConfig::default());
    let results = service.search(&["钟楼"], 10_000);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "1997 M1 青山刚昌");
    assert_eq!(
        results[0].url.as_deref(),
        Some("https://www.bilibili.com/read/readlist/rl725889")
    );
    assert_eq!(results[0].document_id, "1997/1997_M1_青山刚昌_日文.txt");
}

#[test]
fn test_custom_highlight_markers() {
    let config = SearchConfig::builder()
        .highlight_markers("[[", "]]")
        .build()
        .unwrap();
    let service = service_with_config(&[("doc1", SCENARIO_DOC)], config);
    let results = service.search(&["小兰"], 10_000);

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].highlighted_text,
        "柯南发现了真相。新一喜欢[[小兰]]。[[小兰]]很开心。"
    );
    assert!(!results[0].highlighted_text.contains("<mark>"));
}
