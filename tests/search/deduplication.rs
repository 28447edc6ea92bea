//! Merging of neighbouring snippets within one document.

use crate::common::*;
use sleuth::{relevance_score, Corpus, Document, Metadata, SearchConfig, SearchService};

fn merge_config() -> SearchConfig {
    SearchConfig::builder()
        .base_radius(10)
        .common_keywords(Vec::<String>::new())
        .build()
        .unwrap()
}

fn sentence(head: &str, filler: char, len: usize) -> String {
    let mut s = head.to_string();
    while s.chars().count() < len - 1 {
        s.push(filler);
    }
    s.push('。');
    s
}

#[test]
fn test_adjacent_snippets_merge_into_one() {
    let a = sentence("柯南", 'a', 20);
    let b = sentence("", 'b', 30);
    let c = sentence("小兰", 'c', 20);
    let text = format!("{a}{b}{c}");
    let service = service_with_config(&[("d", &text)], merge_config());

    let results = service.search(&["柯南", "小兰"], 10_000);
    assert_eq!(results.len(), 1);

    let r = &results[0];
    assert_eq!(r.text, format!("{a} ... {b}{c}"));
    assert_eq!(r.keywords_found, kws(&["柯南", "小兰"]));
    assert_eq!(r.start_position, 0);
    assert_eq!(r.end_position, 70);

    let importance = service.importance();
    let expected = relevance_score(&a, &kws(&["柯南"]), importance)
        + 0.5 * relevance_score(&format!("{b}{c}"), &kws(&["小兰"]), importance);
    assert!((r.relevance_score - expected).abs() < 1e-9);
    assert!(r.highlighted_text.contains("<mark>柯南</mark>"));
    assert!(r.highlighted_text.contains("<mark>小兰</mark>"));
}

#[test]
fn test_distant_snippets_stay_separate() {
    let a = sentence("柯南", 'a', 20);
    let middle = sentence("", 'b', 10).repeat(20);
    let c = sentence("小兰", 'c', 20);
    let text = format!("{a}{middle}{c}");
    let service = service_with_config(&[("d", &text)], merge_config());

    let results = service.search(&["柯南", "小兰"], 10_000);
    assert_eq!(results.len(), 2);

    let mut spans: Vec<(usize, usize)> = results
        .iter()
        .map(|r| (r.start_position, r.end_position))
        .collect();
    spans.sort();
    assert_eq!(spans, vec![(0, 20), (210, 240)]);
}

#[test]
fn test_merge_never_crosses_documents() {
    let resolver = |_: &Document| Metadata::labelled("访谈合集");
    let corpus = Corpus::from_map([
        ("a.txt", "柯南在钟楼上发现了线索。"),
        ("b.txt", "柯南在钟楼下等待小兰。"),
    ]);
    let service = SearchService::with_resolver(corpus, SearchConfig::default(), resolver);

    let results = service.search(&["钟楼"], 10_000);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.source == "访谈合集"));

    let mut ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["a.txt", "b.txt"]);
}

#[test]
fn test_repeated_keyword_in_one_sentence_yields_one_snippet() {
    let text = "真相只有一个，真相就在眼前，真相不会改变。";
    let service = service_for(&[("d", text)]);

    let results = service.search(&["真相"], 10_000);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, text);
    assert_eq!(results[0].keywords_found, kws(&["真相"]));
}

#[test]
fn test_merge_gap_is_configurable() {
    let a = sentence("柯南", 'a', 20);
    let middle = sentence("", 'b', 10).repeat(20);
    let c = sentence("小兰", 'c', 20);
    let text = format!("{a}{middle}{c}");
    let config = SearchConfig::builder()
        .base_radius(10)
        .merge_gap(500)
        .common_keywords(Vec::<String>::new())
        .build()
        .unwrap();
    let service = service_with_config(&[("d", &text)], config);

    let results = service.search(&["柯南", "小兰"], 10_000);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].start_position, 0);
    assert_eq!(results[0].end_position, 240);
}

#[test]
fn test_merged_span_covers_a_wider_earlier_snippet() {
    // 朱@5, 。@20, 吴@100, 甲@110, 。@195, 300 chars in total. 甲 is common
    // enough to narrow the window around itself, so the snippet starting at 21
    // ends at 196 while the one around 吴 runs to the end of the document.
    let mut chars: Vec<char> = vec!['文'; 300];
    chars[5] = '朱';
    chars[20] = '。';
    chars[100] = '吴';
    chars[110] = '甲';
    chars[195] = '。';
    let text: String = chars.into_iter().collect();
    let filler = "甲".repeat(101);

    let config = SearchConfig::builder()
        .base_radius(100)
        .common_keywords(["甲"])
        .build()
        .unwrap();
    let service = service_with_config(&[("d", &text), ("f", &filler)], config);
    assert_eq!(service.importance().frequency("甲"), Some(102));

    let results = service.search(&["朱", "吴", "甲"], 100_000);
    let merged: Vec<_> = results.iter().filter(|r| r.document_id == "d").collect();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].start_position, 0);
    assert_eq!(merged[0].end_position, 300);
    assert_eq!(merged[0].keywords_found, kws(&["朱", "吴", "甲"]));
}
