// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Question understanding and answer synthesis.
//!
//! Search wants keywords; people ask questions. A [`KeywordProvider`] sits in
//! between: it turns a free-form question into keywords plus a coarse category,
//! and turns ranked snippets back into a short answer.
//!
//! Two providers ship with the crate:
//!
//! - [`MockProvider`]: offline and deterministic. Picks known character names
//!   out of the question. Good for tests and for running without a network.
//! - `GeminiProvider` (feature `gemini`): calls the Gemini `generateContent`
//!   endpoint. Malformed model output degrades to "search the whole question"
//!   rather than failing.
//!
//! Which one runs is a [`ProviderKind`], read from `SLEUTH_PROVIDER`.

#[cfg(feature = "gemini")]
pub mod gemini;
pub mod mock;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SleuthError};
use crate::types::Snippet;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;
pub use mock::MockProvider;

/// Confidence reported when the model answered but not with usable JSON.
pub const MALFORMED_CONFIDENCE: f64 = 0.5;

/// Confidence reported when the model output was unusable for any other reason.
pub const FAILED_CONFIDENCE: f64 = 0.3;

/// What kind of question this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionCategory {
    /// Plot, dialogue and scenes from the manga.
    #[serde(rename = "漫画内容")]
    MangaContent,
    /// The author's interviews, production background, character design.
    #[serde(rename = "访谈信息")]
    Interview,
    /// Needs several kinds of material.
    #[serde(rename = "综合查询")]
    General,
}

impl QuestionCategory {
    pub fn label(self) -> &'static str {
        match self {
            QuestionCategory::MangaContent => "漫画内容",
            QuestionCategory::Interview => "访谈信息",
            QuestionCategory::General => "综合查询",
        }
    }

    /// Parse a label, falling back to [`QuestionCategory::General`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "漫画内容" => QuestionCategory::MangaContent,
            "访谈信息" => QuestionCategory::Interview,
            _ => QuestionCategory::General,
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keywords pulled out of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordExtraction {
    pub keywords: Vec<String>,
    pub category: QuestionCategory,
    /// In `[0, 1]`.
    pub confidence: f64,
}

impl KeywordExtraction {
    /// Search the whole question as one keyword.
    pub fn whole_question(question: &str, confidence: f64) -> Self {
        Self {
            keywords: vec![question.to_string()],
            category: QuestionCategory::General,
            confidence,
        }
    }
}

/// Turns questions into keywords and snippets into answers.
pub trait KeywordProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract_keywords(&self, question: &str) -> Result<KeywordExtraction>;

    /// Answer `question` from ranked `snippets`. `sources` are the distinct
    /// source labels of those snippets, in rank order.
    fn generate_answer(&self, question: &str, snippets: &[Snippet], sources: &[String]) -> Result<String>;
}

/// Distinct snippet sources in rank order.
pub fn snippet_sources(snippets: &[Snippet]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for snippet in snippets {
        if !sources.contains(&snippet.source) {
            sources.push(snippet.source.clone());
        }
    }
    sources
}

// =============================================================================
// MODEL OUTPUT PARSING
// =============================================================================

#[derive(Deserialize)]
struct RawExtraction {
    keywords: Vec<String>,
    question_type: String,
    confidence: f64,
}

/// Strip a surrounding ```` ```json ```` fence, if any.
pub fn strip_json_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse a model's keyword JSON, falling back to the whole question.
///
/// Syntax errors fall back with [`MALFORMED_CONFIDENCE`]; valid JSON with
/// missing or mistyped fields, or no usable keywords, with [`FAILED_CONFIDENCE`].
pub fn parse_extraction(raw: &str, question: &str) -> KeywordExtraction {
    let parsed: std::result::Result<RawExtraction, serde_json::Error> =
        serde_json::from_str(strip_json_fence(raw));
    match parsed {
        Ok(raw) => {
            let keywords: Vec<String> = raw
                .keywords
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                warn!("model returned no keywords, searching the whole question");
                return KeywordExtraction::whole_question(question, FAILED_CONFIDENCE);
            }
            KeywordExtraction {
                keywords,
                category: QuestionCategory::from_label(&raw.question_type),
                confidence: raw.confidence.clamp(0.0, 1.0),
            }
        }
        Err(e) if e.is_data() => {
            warn!(error = %e, "incomplete keyword JSON, searching the whole question");
            KeywordExtraction::whole_question(question, FAILED_CONFIDENCE)
        }
        Err(e) => {
            warn!(error = %e, "unparseable keyword JSON, searching the whole question");
            KeywordExtraction::whole_question(question, MALFORMED_CONFIDENCE)
        }
    }
}

// =============================================================================
// PROVIDER SELECTION
// =============================================================================

/// Which provider to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Mock,
    Gemini,
}

impl ProviderKind {
    /// Read `SLEUTH_PROVIDER`. Unset means [`ProviderKind::Mock`].
    pub fn from_env() -> Result<Self> {
        match std::env::var("SLEUTH_PROVIDER") {
            Ok(value) if !value.trim().is_empty() => value.parse().map_err(SleuthError::Config),
            _ => Ok(ProviderKind::default()),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(format!("unknown provider '{}' (expected mock or gemini)", other)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Mock => f.write_str("mock"),
            ProviderKind::Gemini => f.write_str("gemini"),
        }
    }
}

/// Construct the provider for `kind`.
pub fn create_provider(kind: ProviderKind) -> Result<Box<dyn KeywordProvider>> {
    match kind {
        ProviderKind::Mock => Ok(Box::new(MockProvider)),
        #[cfg(feature = "gemini")]
        ProviderKind::Gemini => Ok(Box::new(GeminiProvider::from_env()?)),
        #[cfg(not(feature = "gemini"))]
        ProviderKind::Gemini => Err(SleuthError::provider(
            "gemini",
            "built without the `gemini` feature",
        )),
    }
}
