//! Same corpus, same query, same answer.

use crate::common::*;
use sleuth::{Corpus, SearchConfig, SearchService};

#[test]
fn test_repeated_queries_are_identical() {
    let service = SearchService::new(synthetic_corpus(40, 30), SearchConfig::default());
    let first = service.search(&["钟楼", "米花町", "真相"], 3_000);
    for _ in 0..5 {
        assert_eq!(service.search(&["钟楼", "米花町", "真相"], 3_000), first);
    }
}

#[test]
fn test_insertion_order_does_not_matter() {
    let entries = [
        ("b.txt", "基德在钟楼顶上留下了预告函。"),
        ("a.txt", "基德又一次从警方眼皮底下逃走了。"),
        ("c.txt", "柯南看穿了基德的魔术手法。"),
    ];
    let forward = service_for(&entries);

    let mut reversed = entries;
    reversed.reverse();
    let backward = service_for(&reversed);

    assert_eq!(
        forward.search(&["基德"], 10_000),
        backward.search(&["基德"], 10_000)
    );
}

#[test]
fn test_ties_keep_document_order() {
    let text = "基德在钟楼顶上留下了预告函。";
    let service = service_for(&[("z.txt", text), ("m.txt", text), ("a.txt", text)]);

    let results = service.search(&["基德"], 10_000);
    let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
    assert_eq!(ids, vec!["a.txt", "m.txt", "z.txt"]);
}

#[test]
fn test_parallel_queries_agree() {
    use std::sync::Arc;
    use std::thread;

    let corpus: Corpus = synthetic_corpus(20, 20);
    let service = Arc::new(SearchService::new(corpus, SearchConfig::default()));
    let expected = service.search(&["录音", "角色"], 2_000);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.search(&["录音", "角色"], 2_000))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
