// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline provider: name spotting and a templated answer.

use super::{KeywordExtraction, KeywordProvider, QuestionCategory};
use crate::error::Result;
use crate::types::Snippet;

/// Character names the mock provider recognises, in extraction order.
pub const KNOWN_CHARACTERS: &[&str] = &[
    "柯南", "新一", "小兰", "小哀", "灰原", "博士", "基德", "赤井", "安室",
];

/// Confidence the mock provider always reports.
pub const MOCK_CONFIDENCE: f64 = 0.6;

/// Deterministic provider for tests and offline use.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl KeywordProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    /// Known character names in the question, or the whole question if none.
    fn extract_keywords(&self, question: &str) -> Result<KeywordExtraction> {
        let mut keywords: Vec<String> = KNOWN_CHARACTERS
            .iter()
            .filter(|name| question.contains(*name))
            .map(|name| name.to_string())
            .collect();
        if keywords.is_empty() {
            keywords.push(question.trim().to_string());
        }

        Ok(KeywordExtraction {
            keywords,
            category: QuestionCategory::General,
            confidence: MOCK_CONFIDENCE,
        })
    }

    fn generate_answer(&self, question: &str, snippets: &[Snippet], sources: &[String]) -> Result<String> {
        let Some(top) = snippets.first() else {
            return Ok(format!("没有找到与「{}」相关的资料。", question.trim()));
        };

        let mut answer = format!(
            "关于「{}」，找到 {} 条相关片段。\n\n最相关的内容：{}",
            question.trim(),
            snippets.len(),
            top.text
        );
        if !sources.is_empty() {
            answer.push_str("\n\n来源：");
            answer.push_str(&sources.join("、"));
        }
        Ok(answer)
    }
}
