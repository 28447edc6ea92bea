// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Detail view for a single transcript.
//!
//! Search hands back snippets. Once someone clicks through, they want the whole
//! transcript with a little context: when it happened, who was in the room,
//! what kind of interview it was, and where the keyword shows up. These are
//! plain substring heuristics, good enough for a header line.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::loader::split_archive_id;
use super::{Document, Metadata, MetadataResolver};

/// People whose names mark them as interview participants.
pub const KNOWN_PARTICIPANTS: &[&str] = &[
    "青山刚昌",
    "山口胜平",
    "高山南",
    "堀川りょう",
    "林原めぐみ",
    "古谷彻",
    "小山力也",
    "大谷育江",
    "岩居由希子",
];

/// Coarse interview category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewTheme {
    /// Promotion for a theatrical film.
    Movie,
    /// Milestone or anniversary special.
    Anniversary,
    /// Focused on a character or voice cast member.
    Character,
    Regular,
}

impl fmt::Display for InterviewTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewTheme::Movie => "剧场版访谈",
            InterviewTheme::Anniversary => "纪念访谈",
            InterviewTheme::Character => "角色专访",
            InterviewTheme::Regular => "常规访谈",
        };
        f.write_str(label)
    }
}

/// First run of four ASCII digits in `title`.
pub fn extract_year(title: &str) -> Option<String> {
    let bytes = title.as_bytes();
    bytes
        .windows(4)
        .position(|w| w.iter().all(u8::is_ascii_digit))
        .map(|start| title[start..start + 4].to_string())
}

/// Known participants mentioned anywhere in `text`, in registry order.
pub fn extract_participants(text: &str) -> Vec<String> {
    KNOWN_PARTICIPANTS
        .iter()
        .filter(|name| text.contains(*name))
        .map(|name| name.to_string())
        .collect()
}

/// Guess the interview theme from its title and text.
pub fn classify_theme(title: &str, text: &str) -> InterviewTheme {
    if title.contains("剧场版") || title.contains("映画") || text.contains("映画") {
        InterviewTheme::Movie
    } else if title.contains("1000话") || text.contains("1000話") || title.contains("周年") {
        InterviewTheme::Anniversary
    } else if text.contains("角色") || title.contains("人物") || text.contains("CV") {
        InterviewTheme::Character
    } else {
        InterviewTheme::Regular
    }
}

/// Paragraphs (newline-separated) containing `keyword`, each with `window`
/// neighbouring paragraphs on either side.
///
/// Case-sensitive and literal. Overlapping blocks are returned separately.
pub fn paragraph_contexts(text: &str, keyword: &str, window: usize) -> Vec<String> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let paragraphs: Vec<&str> = text.split('\n').collect();
    paragraphs
        .iter()
        .enumerate()
        .filter(|(_, para)| para.contains(keyword))
        .map(|(i, _)| {
            let start = i.saturating_sub(window);
            let end = (i + window + 1).min(paragraphs.len());
            paragraphs[start..end].join("\n")
        })
        .collect()
}

/// Everything the detail view shows for one transcript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptDetail {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub participants: Vec<String>,
    pub theme: InterviewTheme,
    pub metadata: Metadata,
    /// Paragraph blocks around the keyword (empty without a keyword).
    pub contexts: Vec<String>,
}

impl TranscriptDetail {
    /// Paragraph window used for keyword contexts.
    pub const CONTEXT_WINDOW: usize = 1;

    pub fn build(
        document: &Document,
        resolver: &dyn MetadataResolver,
        keyword: Option<&str>,
    ) -> Self {
        let (outer, member) = split_archive_id(document.id());
        let title = Path::new(member.unwrap_or(outer))
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.trim_end_matches(".txt").to_string())
            .unwrap_or_else(|| document.id().to_string());
        let text = document.text();

        Self {
            id: document.id().to_string(),
            year: extract_year(&title),
            participants: extract_participants(text),
            theme: classify_theme(&title, text),
            metadata: resolver.resolve(document),
            contexts: keyword
                .map(|kw| paragraph_contexts(text, kw.trim(), Self::CONTEXT_WINDOW))
                .unwrap_or_default(),
            title,
        }
    }
}
