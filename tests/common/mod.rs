//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use sleuth::{Corpus, SearchConfig, Snippet};

// Re-export canonical test utilities from sleuth::testing
pub use sleuth::testing::{
    make_snippet, sample_corpus, service_for, service_with_config, synthetic_corpus,
};

/// The one-document corpus most scenarios start from.
pub const SCENARIO_DOC: &str = "柯南发现了真相。新一喜欢小兰。小兰很开心。";

pub fn kws(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

pub fn total_chars(results: &[Snippet]) -> usize {
    results.iter().map(Snippet::char_len).sum()
}

/// Default config with an empty common-keyword registry (every keyword weighs 1.0).
pub fn config_without_registry() -> SearchConfig {
    SearchConfig::builder()
        .common_keywords(Vec::<String>::new())
        .build()
        .unwrap()
}

/// Write `files` (relative path, contents) under `root`, creating directories.
pub fn write_archive(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Write a `.zip` at `path` holding `members` (name, raw bytes).
pub fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
    use std::io::Write;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut writer = zip::ZipWriter::new(fs::File::create(path).unwrap());
    for (name, bytes) in members {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

/// Assert every result-list invariant that holds regardless of the query.
pub fn assert_well_formed(results: &[Snippet], corpus: &Corpus, max_length: usize) {
    assert!(
        total_chars(results) <= max_length,
        "results use {} chars, budget {}",
        total_chars(results),
        max_length
    );
    for pair in results.windows(2) {
        assert!(
            pair[0].relevance_score >= pair[1].relevance_score,
            "not sorted: {} before {}",
            pair[0].relevance_score,
            pair[1].relevance_score
        );
    }
    for r in results {
        assert!(r.relevance_score >= sleuth::MIN_SCORE);
        assert!(r.start_position <= r.end_position);
        let doc = corpus
            .get(&r.document_id)
            .unwrap_or_else(|| panic!("unknown document {}", r.document_id));
        assert!(r.end_position <= doc.char_len());
    }
}

/// Every found keyword occurs in the snippet text, ignoring case.
pub fn assert_keywords_present(results: &[Snippet]) {
    for r in results {
        let text = r.text.to_lowercase();
        for k in &r.keywords_found {
            assert!(
                text.contains(&k.to_lowercase()),
                "keyword {:?} missing from {:?}",
                k,
                r.text
            );
        }
    }
}
