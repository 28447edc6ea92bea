// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search: where the pipeline runs.
//!
//! One query is one pass: locate matches, cut a snippet around each, drop the
//! uninformative ones (if asked to), merge neighbours, rank, and fill the
//! character budget. Nothing is cached between queries except the keyword
//! frequency table, which is fixed for the corpus anyway.
//!
//! [`SearchService`] owns everything a query reads. It is `Send + Sync`, so a
//! request handler can share one behind an `Arc`.

pub mod context;
pub mod dedup;
pub mod matches;

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::contracts;
use crate::corpus::{Corpus, FilenameMetadata, Metadata, MetadataResolver, TranscriptDetail};
use crate::scoring::ranking::{rank, select_top, Truncation};
use crate::scoring::KeywordImportance;
use crate::types::Snippet;
use crate::util::highlight::Highlighter;

pub use context::{passes_prefilter, ContextExtractor};
pub use dedup::{deduplicate, MergePolicy};
pub use matches::{find_all_matches, KeywordSet, Match};

/// Keyword search over a frozen corpus.
pub struct SearchService {
    corpus: Corpus,
    importance: KeywordImportance,
    config: SearchConfig,
    highlighter: Highlighter,
    resolver: Box<dyn MetadataResolver>,
}

impl SearchService {
    /// Build a service that reads metadata from the archive's filename convention.
    pub fn new(corpus: Corpus, config: SearchConfig) -> Self {
        Self::with_resolver(corpus, config, FilenameMetadata::new())
    }

    pub fn with_resolver(
        corpus: Corpus,
        config: SearchConfig,
        resolver: impl MetadataResolver + 'static,
    ) -> Self {
        let importance = KeywordImportance::new(&corpus, &config.common_keywords);
        let highlighter = Highlighter::from_config(&config);
        info!(
            documents = corpus.len(),
            chars = corpus.total_chars(),
            registry = config.common_keywords.len(),
            "search service ready"
        );
        Self {
            corpus,
            importance,
            config,
            highlighter,
            resolver: Box::new(resolver),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn importance(&self) -> &KeywordImportance {
        &self.importance
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Metadata for one document, or the fallback when the id is unknown.
    pub fn metadata(&self, document_id: &str) -> Metadata {
        self.corpus
            .get(document_id)
            .map(|doc| self.resolver.resolve(doc))
            .unwrap_or_else(Metadata::unknown)
    }

    /// Every occurrence of every keyword, without snippets or scores.
    pub fn find_all_matches<'a>(&'a self, keywords: &'a KeywordSet) -> Vec<Match<'a>> {
        find_all_matches(&self.corpus, keywords)
    }

    /// Search with the configured default budget.
    pub fn search_default<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<Snippet> {
        self.search(keywords, self.config.max_length)
    }

    /// Ranked snippets for `keywords`, at most `max_length` characters in total.
    ///
    /// Never fails: no keywords, an empty corpus, or no usable context all
    /// produce an empty list.
    pub fn search<S: AsRef<str>>(&self, keywords: &[S], max_length: usize) -> Vec<Snippet> {
        let keywords = KeywordSet::new(keywords);
        if keywords.is_empty() || self.corpus.is_empty() {
            return Vec::new();
        }

        debug!(
            importance = ?keywords
                .keywords()
                .iter()
                .map(|k| (k.as_str(), self.importance.importance(k)))
                .collect::<Vec<_>>(),
            "keyword importance"
        );

        let matches = find_all_matches(&self.corpus, &keywords);
        debug!(matches = matches.len(), "located matches");

        let extractor = ContextExtractor {
            keywords: &keywords,
            importance: &self.importance,
            config: &self.config,
            highlighter: &self.highlighter,
        };

        let mut metadata: HashMap<&str, Metadata> = HashMap::new();
        let mut snippets = Vec::new();
        let mut filtered = 0usize;
        for m in &matches {
            let meta = metadata
                .entry(m.document_id())
                .or_insert_with(|| self.resolver.resolve(m.document));
            let Some(snippet) = extractor.extract(m, meta) else {
                continue;
            };
            if self.config.require_informative_keywords
                && !passes_prefilter(&snippet.keywords_found, &self.importance)
            {
                filtered += 1;
                continue;
            }
            snippets.push(snippet);
        }
        debug!(snippets = snippets.len(), filtered, "extracted contexts");

        let mut merged = deduplicate(
            snippets,
            MergePolicy {
                gap: self.config.merge_gap,
                separator: &self.config.merge_separator,
                highlighter: &self.highlighter,
            },
        );
        debug!(merged = merged.len(), "merged neighbouring snippets");

        rank(&mut merged);
        let results = select_top(
            merged,
            max_length,
            Truncation {
                reserve: self.config.truncation_reserve,
                ellipsis: &self.config.ellipsis,
                highlighter: &self.highlighter,
            },
        );

        if cfg!(debug_assertions) {
            contracts::check_results(&results, &self.corpus, max_length);
        }
        debug!(
            results = results.len(),
            chars = results.iter().map(Snippet::char_len).sum::<usize>(),
            "selected results"
        );
        results
    }

    /// Distinct source labels across the corpus, sorted.
    pub fn sources(&self) -> Vec<String> {
        self.corpus
            .documents()
            .map(|doc| self.resolver.resolve(doc).source)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Detail view for one transcript, or `None` for an unknown id.
    pub fn detail(&self, document_id: &str, keyword: Option<&str>) -> Option<TranscriptDetail> {
        let document = self.corpus.get(document_id)?;
        Some(TranscriptDetail::build(document, self.resolver.as_ref(), keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DocumentIdSource;

    fn service(entries: &[(&str, &str)]) -> SearchService {
        SearchService::with_resolver(
            Corpus::from_map(entries.iter().copied()),
            SearchConfig::default(),
            DocumentIdSource,
        )
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchService>();
    }

    #[test]
    fn test_single_document() {
        let svc = service(&[("doc1", "柯南发现了真相。新一喜欢小兰。小兰很开心。")]);
        let results = svc.search(&["真相"], 10_000);
        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.text, "柯南发现了真相。新一喜欢小兰。小兰很开心。");
        assert!(r.highlighted_text.contains("<mark>真相</mark>"));
        assert_eq!(r.keywords_found, vec!["真相"]);
        assert_eq!(r.source, "doc1");
        assert_eq!((r.start_position, r.end_position), (0, 21));
    }

    #[test]
    fn test_empty_keywords_and_corpus() {
        let svc = service(&[("doc1", "柯南发现了真相。")]);
        assert!(svc.search::<&str>(&[], 100).is_empty());
        assert!(svc.search(&[""], 100).is_empty());

        let empty = service(&[]);
        assert!(empty.search(&["真相"], 100).is_empty());
    }

    #[test]
    fn test_metadata_fallback_for_unknown_id() {
        let svc = service(&[("doc1", "x")]);
        assert_eq!(svc.metadata("nope"), Metadata::unknown());
        assert_eq!(svc.metadata("doc1").source, "doc1");
    }

    #[test]
    fn test_sources_sorted_and_distinct() {
        let svc = SearchService::with_resolver(
            Corpus::from_map([("b", "x"), ("a", "y"), ("c", "z")]),
            SearchConfig::default(),
            |doc: &crate::corpus::Document| {
                Metadata::labelled(if doc.id() == "c" { "one" } else { "two" })
            },
        );
        assert_eq!(svc.sources(), vec!["one", "two"]);
    }

    #[test]
    fn test_detail_lookup() {
        let svc = service(&[("2001/x.txt", "青山刚昌谈映画。")]);
        let detail = svc.detail("2001/x.txt", None).unwrap();
        assert_eq!(detail.participants, vec!["青山刚昌"]);
        assert!(svc.detail("missing", None).is_none());
    }
}
