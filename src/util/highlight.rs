// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword highlighting.
//!
//! Keywords are literals, never patterns: `regex::escape` runs before anything
//! is compiled, so a keyword like `a.b` or `(笑)` only ever matches itself.
//! Highlighting applies one keyword at a time over the previous output, which
//! means a later keyword can land inside an earlier marker
//! (`<mark>工藤<mark>新一</mark></mark>`). Renderers cope with that fine.

use regex::{NoExpand, Regex, RegexBuilder};

use crate::config::SearchConfig;

/// Compile a case-insensitive literal matcher for `keyword`.
///
/// Returns `None` for an empty keyword (it would match everywhere) or if the
/// escaped pattern exceeds the regex size limit.
pub fn literal_pattern(keyword: &str) -> Option<Regex> {
    if keyword.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Wraps keyword occurrences in open/close markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.highlight_open.clone(), config.highlight_close.clone())
    }

    /// Wrap every case-insensitive occurrence of each keyword.
    ///
    /// The inserted text is the keyword as the caller spelled it, not the
    /// matched text, so `Conan` highlighted with `CONAN` reads `<mark>CONAN</mark>`.
    pub fn highlight(&self, text: &str, keywords: &[String]) -> String {
        let mut highlighted = text.to_string();

        for keyword in keywords {
            if let Some(re) = literal_pattern(keyword) {
                let replacement = format!("{}{}{}", self.open, keyword, self.close);
                highlighted = re
                    .replace_all(&highlighted, NoExpand(&replacement))
                    .into_owned();
            }
        }

        highlighted
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("<mark>", "</mark>")
    }
}
