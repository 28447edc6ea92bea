// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gemini backend over the Generative Language REST API.
//!
//! Blocking reqwest, one request per call, bounded by a timeout. Configuration
//! comes from the environment:
//!
//! | Variable                   | Default                                     |
//! |----------------------------|---------------------------------------------|
//! | `GEMINI_API_KEY`           | required                                    |
//! | `SLEUTH_GEMINI_MODEL`      | `gemini-2.0-flash`                          |
//! | `SLEUTH_GEMINI_TIMEOUT_MS` | `20000` (clamped to 200..=120000)           |
//! | `SLEUTH_GEMINI_BASE_URL`   | `https://generativelanguage.googleapis.com` |
//!
//! Keyword extraction never surfaces a model or transport failure: it logs and
//! falls back to searching the whole question. Answer generation does report
//! failures, since there is no sensible answer to fall back to.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{parse_extraction, KeywordExtraction, KeywordProvider, FAILED_CONFIDENCE};
use crate::error::{Result, SleuthError};
use crate::types::Snippet;

const PROVIDER: &str = "gemini";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Snippet text sent to the model per snippet, in characters.
const MAX_SNIPPET_CHARS: usize = 600;

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn api_key_from_env() -> Option<String> {
    env("GEMINI_API_KEY")
}

pub fn model_from_env() -> String {
    env("SLEUTH_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

pub fn timeout_ms_from_env() -> u64 {
    env("SLEUTH_GEMINI_TIMEOUT_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(20_000)
        .clamp(200, 120_000)
}

#[derive(Debug, Serialize)]
struct ReqPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct ReqContent {
    parts: Vec<ReqPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenCfg {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiReq {
    contents: Vec<ReqContent>,
    generation_config: GenCfg,
}

fn keyword_prompt(question: &str) -> String {
    format!(
        r#"你是一个专门分析名侦探柯南相关问题的助手。请分析用户的问题，提取关键词句并判断问题类型。

用户问题："{question}"

请以 JSON 格式返回结果，包含以下字段：
1. keywords: 关键词列表（日文和中文都要考虑，优先提取可能在漫画原文和采访作者青山刚昌时会出现的词汇，
如果词汇过于常见比如 "柯南"、"灰原哀"，则返回更有意义的短句，比如 "工藤新一的真实身份"）
2. question_type: 问题类型，选择一个："漫画内容"、"访谈信息"、"综合查询"
3. confidence: 置信度（0-1 之间的数值）

只返回 JSON，不要其他解释。"#
    )
}

fn answer_prompt(question: &str, snippets: &[Snippet], sources: &[String]) -> String {
    let mut prompt = format!(
        "根据以下资料片段，用简短的中文回答问题。资料不足时请直说。\n\n问题：{}\n\n资料：\n",
        question
    );
    for (i, snippet) in snippets.iter().enumerate() {
        let text: String = snippet.text.chars().take(MAX_SNIPPET_CHARS).collect();
        prompt.push_str(&format!("[{}] ({}) {}\n", i + 1, snippet.source, text));
    }
    if !sources.is_empty() {
        prompt.push_str(&format!("\n来源：{}\n", sources.join("、")));
    }
    prompt
}

/// `candidates[0].content.parts[*].text`, newline-joined.
fn response_text(value: &serde_json::Value) -> String {
    let mut out = String::new();
    let parts = value
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());
    for part in parts.into_iter().flatten() {
        if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(text);
        }
    }
    out
}

/// Gemini-backed provider.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Configure from the environment. Fails when no API key is set.
    pub fn from_env() -> Result<Self> {
        let api_key = api_key_from_env()
            .ok_or_else(|| SleuthError::provider(PROVIDER, "GEMINI_API_KEY is not set"))?;
        let base_url = env("SLEUTH_GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, model_from_env(), base_url, timeout_ms_from_env())
    }

    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_ms: u64,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| SleuthError::provider(PROVIDER, e.to_string()))?;
        let provider = Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        };
        info!(model = %provider.model, timeout_ms, "gemini provider ready");
        Ok(provider)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, prompt: String, max_output_tokens: u32) -> Result<String> {
        let req = GeminiReq {
            contents: vec![ReqContent {
                parts: vec![ReqPart { text: prompt }],
            }],
            generation_config: GenCfg {
                temperature: 0.0,
                max_output_tokens,
            },
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        debug!(model = %self.model, "calling gemini");
        let resp = self
            .client
            .post(url)
            .json(&req)
            .send()
            .map_err(|e| SleuthError::provider(PROVIDER, format!("request failed: {}", e.without_url())))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SleuthError::provider(PROVIDER, format!("status {}", status)));
        }

        let value: serde_json::Value = resp
            .json()
            .map_err(|e| SleuthError::provider(PROVIDER, format!("bad response body: {}", e.without_url())))?;
        let text = response_text(&value);
        if text.trim().is_empty() {
            return Err(SleuthError::provider(PROVIDER, "empty output"));
        }
        Ok(text)
    }
}

impl KeywordProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn extract_keywords(&self, question: &str) -> Result<KeywordExtraction> {
        match self.generate(keyword_prompt(question), 512) {
            Ok(text) => Ok(parse_extraction(&text, question)),
            Err(e) => {
                warn!(error = %e, "keyword extraction failed, searching the whole question");
                Ok(KeywordExtraction::whole_question(question, FAILED_CONFIDENCE))
            }
        }
    }

    fn generate_answer(&self, question: &str, snippets: &[Snippet], sources: &[String]) -> Result<String> {
        self.generate(answer_prompt(question, snippets, sources), 1024)
    }
}
