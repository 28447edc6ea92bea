// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search tuning knobs.
//!
//! The radius, merge gap and budget numbers come from watching the engine on
//! real interview transcripts, not from any derivation. They live here rather
//! than as bare constants so a deployment can tune them without a rebuild.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SleuthError};

/// Characters scanned on each side of a match before sentence expansion.
pub const DEFAULT_BASE_RADIUS: usize = 200;

/// Snippets from the same document closer than this (in characters) get merged.
pub const DEFAULT_MERGE_GAP: usize = 100;

/// Trimmed snippets shorter than this are dropped.
pub const DEFAULT_MIN_SNIPPET_CHARS: usize = 10;

/// Total character budget for one result set.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

/// Characters held back when an oversized first snippet is truncated.
pub const DEFAULT_TRUNCATION_RESERVE: usize = 100;

/// Frequently occurring names and generic terms that get down-weighted.
///
/// Chinese and Japanese spellings both appear in the transcripts, so both are listed.
pub const DEFAULT_COMMON_KEYWORDS: &[&str] = &[
    // Main characters
    "柯南",
    "工藤新一",
    "新一",
    "灰原哀",
    "小哀",
    "哀",
    "小兰",
    "毛利兰",
    "毛利小五郎",
    "阿笠博士",
    "博士",
    "少年侦探团",
    // Generic franchise vocabulary
    "名侦探柯南",
    "侦探",
    "案件",
    "推理",
    "真相",
    "黑衣组织",
    "组织",
    "青山刚昌",
    "作者",
    "漫画",
    "动画",
    "剧场版",
    // Japanese
    "コナン",
    "蘭",
    "灰原",
];

/// Configuration for [`SearchService`](crate::SearchService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Preliminary context radius around each match.
    pub base_radius: usize,
    /// Gap below which neighbouring snippets are merged.
    pub merge_gap: usize,
    /// Minimum trimmed snippet length.
    pub min_snippet_chars: usize,
    /// Default total character budget used by [`SearchService::search_default`](crate::SearchService::search_default).
    pub max_length: usize,
    /// Characters reserved when truncating an oversized first snippet.
    pub truncation_reserve: usize,
    /// Drop snippets that only contain a single common keyword.
    pub require_informative_keywords: bool,
    /// Opening highlight marker.
    pub highlight_open: String,
    /// Closing highlight marker.
    pub highlight_close: String,
    /// Joiner placed between merged snippet texts.
    pub merge_separator: String,
    /// Marker appended to truncated text.
    pub ellipsis: String,
    /// Registry of common (down-weighted) keywords.
    pub common_keywords: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_BASE_RADIUS,
            merge_gap: DEFAULT_MERGE_GAP,
            min_snippet_chars: DEFAULT_MIN_SNIPPET_CHARS,
            max_length: DEFAULT_MAX_LENGTH,
            truncation_reserve: DEFAULT_TRUNCATION_RESERVE,
            require_informative_keywords: false,
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
            merge_separator: " ... ".to_string(),
            ellipsis: "...".to_string(),
            common_keywords: DEFAULT_COMMON_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SearchConfig {
    /// Create a new builder for constructing a [`SearchConfig`].
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SleuthError::io(path, e))?;
        let config: SearchConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive a search.
    pub fn validate(&self) -> Result<()> {
        if self.base_radius == 0 {
            return Err(SleuthError::Config(
                "baseRadius must be greater than zero".to_string(),
            ));
        }
        if self.min_snippet_chars == 0 {
            return Err(SleuthError::Config(
                "minSnippetChars must be greater than zero".to_string(),
            ));
        }
        if self.max_length == 0 {
            return Err(SleuthError::Config(
                "maxLength must be greater than zero".to_string(),
            ));
        }
        if self.highlight_open.is_empty() || self.highlight_close.is_empty() {
            return Err(SleuthError::Config(
                "highlight markers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for a validated [`SearchConfig`].
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn base_radius(mut self, radius: usize) -> Self {
        self.config.base_radius = radius;
        self
    }

    pub fn merge_gap(mut self, gap: usize) -> Self {
        self.config.merge_gap = gap;
        self
    }

    pub fn min_snippet_chars(mut self, chars: usize) -> Self {
        self.config.min_snippet_chars = chars;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    pub fn truncation_reserve(mut self, reserve: usize) -> Self {
        self.config.truncation_reserve = reserve;
        self
    }

    /// Enable the common-keyword pre-filter.
    pub fn require_informative_keywords(mut self, enabled: bool) -> Self {
        self.config.require_informative_keywords = enabled;
        self
    }

    pub fn highlight_markers(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.config.highlight_open = open.into();
        self.config.highlight_close = close.into();
        self
    }

    /// Replace the common-keyword registry.
    pub fn common_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.common_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Build the [`SearchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SleuthError::Config`] when a radius, length or marker is empty.
    pub fn build(self) -> Result<SearchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_radius, 200);
        assert_eq!(config.merge_gap, 100);
        assert_eq!(config.max_length, 10_000);
        assert!(!config.require_informative_keywords);
        assert!(config.common_keywords.iter().any(|k| k == "柯南"));
    }

    #[test]
    fn test_builder_rejects_zero_radius() {
        let err = SearchConfig::builder().base_radius(0).build().unwrap_err();
        assert!(matches!(err, SleuthError::Config(_)));
    }

    #[test]
    fn test_builder_rejects_empty_marker() {
        let result = SearchConfig::builder().highlight_markers("", "]").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"mergeGap": 40, "requireInformativeKeywords": true}"#)
                .unwrap();
        assert_eq!(config.merge_gap, 40);
        assert!(config.require_informative_keywords);
        assert_eq!(config.base_radius, DEFAULT_BASE_RADIUS);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sleuth.json");
        fs::write(&path, r#"{"baseRadius": 80, "commonKeywords": ["alpha"]}"#).unwrap();

        let config = SearchConfig::from_json_file(&path).unwrap();
        assert_eq!(config.base_radius, 80);
        assert_eq!(config.common_keywords, vec!["alpha".to_string()]);
    }

    #[test]
    fn test_from_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"maxLength": 0}"#).unwrap();

        assert!(SearchConfig::from_json_file(&path).is_err());
    }
}
