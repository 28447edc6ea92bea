// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where did this transcript come from?
//!
//! The search core only needs a display label and maybe a link for each
//! document. How those are found is somebody else's business, so it sits
//! behind [`MetadataResolver`]. Resolution is infallible on purpose: a resolver
//! that can't work something out returns [`Metadata::unknown`] and the snippet
//! still ships.
//!
//! [`FilenameMetadata`] implements the archive's naming convention:
//!
//! ```text
//! 1997/1997_M1_青山刚昌_日文.txt
//! ^^^^ ^^^^^^^^^^^^^^^^ ^^^^
//! year source           language
//! ```
//!
//! For an archive member (`2001/talks.zip|2001_SP_高山南_中文.txt`) the member
//! name carries the convention and the year may come from either side.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::loader::split_archive_id;
use super::Document;

/// Label used when a document's origin can't be determined.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Display metadata for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub url: Option<String>,
    pub year: Option<String>,
    pub language: Option<String>,
}

impl Metadata {
    /// A bare source label with no link.
    pub fn labelled(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            url: None,
            year: None,
            language: None,
        }
    }

    /// The fallback: `{source: "unknown", url: None}`.
    pub fn unknown() -> Self {
        Self::labelled(UNKNOWN_SOURCE)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Resolves a document to its display metadata. Must not fail.
pub trait MetadataResolver: Send + Sync {
    fn resolve(&self, document: &Document) -> Metadata;
}

impl<F> MetadataResolver for F
where
    F: Fn(&Document) -> Metadata + Send + Sync,
{
    fn resolve(&self, document: &Document) -> Metadata {
        self(document)
    }
}

/// Uses the document id itself as the source label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentIdSource;

impl MetadataResolver for DocumentIdSource {
    fn resolve(&self, document: &Document) -> Metadata {
        Metadata::labelled(document.id())
    }
}

/// Reads year, source and language from the file path, and the link from the text.
#[derive(Debug, Clone)]
pub struct FilenameMetadata {
    url_pattern: Option<Regex>,
}

impl FilenameMetadata {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"https?://[^\s\)\]]+").ok(),
        }
    }

    /// All distinct URLs in `text`, sorted.
    pub fn urls(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.url_pattern else {
            return Vec::new();
        };
        let mut urls: Vec<String> = re.find_iter(text).map(|m| m.as_str().to_string()).collect();
        urls.sort();
        urls.dedup();
        urls
    }
}

impl Default for FilenameMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Year from a parent directory named with exactly four digits.
fn year_from_parent(path: &Path) -> Option<String> {
    let parent = path.parent()?.file_name()?.to_str()?;
    (parent.len() == 4 && parent.chars().all(|c| c.is_ascii_digit())).then(|| parent.to_string())
}

/// `(source, language)` from a stem like `1997_M1_青山刚昌_日文`.
fn source_from_stem(stem: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 4 {
        return None;
    }
    let (language, source) = parts.split_last()?;
    Some((source.join(" "), language.to_string()))
}

impl MetadataResolver for FilenameMetadata {
    fn resolve(&self, document: &Document) -> Metadata {
        let (outer, member) = split_archive_id(document.id());
        let path = Path::new(member.unwrap_or(outer));
        let stem = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.trim_end_matches(".txt"))
            .unwrap_or_default();

        let mut metadata = match source_from_stem(stem) {
            Some((source, language)) => Metadata {
                source,
                url: None,
                year: None,
                language: Some(language),
            },
            None => Metadata::unknown(),
        };
        metadata.year = year_from_parent(path).or_else(|| year_from_parent(Path::new(outer)));
        metadata.url = self.urls(document.text()).into_iter().next();
        metadata
    }
}
