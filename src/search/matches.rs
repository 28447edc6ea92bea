// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match location: a full scan of every document for every keyword.
//!
//! No index. The corpus is a few hundred transcripts, a scan takes
//! milliseconds, and there is nothing to keep in sync. Each keyword compiles to
//! one case-insensitive literal regex per query (see [`KeywordSet`]).

use regex::Regex;

use crate::corpus::{Corpus, Document};
use crate::util::highlight::literal_pattern;

/// The query's keywords: deduplicated, non-empty, compiled once.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl KeywordSet {
    /// Build from the caller's list. Empty strings and repeats are dropped;
    /// first-seen order is kept.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            keywords: Vec::new(),
            patterns: Vec::new(),
        };
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if set.keywords.iter().any(|k| k == keyword) {
                continue;
            }
            if let Some(pattern) = literal_pattern(keyword) {
                set.keywords.push(keyword.to_string());
                set.patterns.push(pattern);
            }
        }
        set
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// `(keyword, pattern)` pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.keywords.iter().map(String::as_str).zip(&self.patterns)
    }

    /// Keywords occurring in `text`, in query order.
    pub fn keywords_in(&self, text: &str) -> Vec<String> {
        self.iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(k, _)| k.to_string())
            .collect()
    }
}

/// One keyword occurrence.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// The keyword as the caller spelled it.
    pub keyword: &'a str,
    pub document: &'a Document,
    /// Character offset of the occurrence.
    pub char_offset: usize,
}

impl Match<'_> {
    pub fn document_id(&self) -> &str {
        self.document.id()
    }
}

/// Every non-overlapping occurrence of every keyword in every non-blank document.
///
/// Ordered by document id, then keyword (query order), then position.
pub fn find_all_matches<'a>(corpus: &'a Corpus, keywords: &'a KeywordSet) -> Vec<Match<'a>> {
    let mut matches = Vec::new();
    if keywords.is_empty() {
        return matches;
    }

    for document in corpus.documents().filter(|d| !d.is_blank()) {
        for (keyword, pattern) in keywords.iter() {
            matches.extend(pattern.find_iter(document.text()).map(|m| Match {
                keyword,
                document,
                char_offset: document.char_offset(m.start()),
            }));
        }
    }
    matches
}
