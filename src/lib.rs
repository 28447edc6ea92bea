// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword search over interview transcripts, with sentence-bounded snippets.
//!
//! Give it a handful of keywords and it scans every transcript, cuts a readable
//! excerpt around each hit, scores it, merges excerpts that crowd each other,
//! and hands back a ranked list that fits a character budget.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ find_all_    │──▶│ Context      │──▶│ deduplicate  │──▶│ rank +       │
//! │ matches      │   │ Extractor    │   │ (per doc)    │   │ select_top   │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!        ▲                  │ ▲
//!        │                  ▼ │
//! ┌──────────────┐   ┌──────────────┐
//! │ Corpus       │   │ Keyword      │   built once per corpus
//! │ (frozen)     │──▶│ Importance   │
//! └──────────────┘   └──────────────┘
//! ```
//!
//! | Module      | Role                                                    |
//! |-------------|---------------------------------------------------------|
//! | `corpus`    | Documents, loading, metadata resolution, detail view   |
//! | `search`    | Match location, context extraction, merging, service   |
//! | `scoring`   | Keyword importance, relevance score, ranking, budget   |
//! | `provider`  | Question → keywords, snippets → answer                 |
//! | `contracts` | Debug-mode invariant checks on every result list       |
//!
//! # Usage
//!
//! ```
//! use sleuth::{Corpus, SearchConfig, SearchService};
//!
//! let corpus = Corpus::from_map([("doc1", "柯南发现了真相。新一喜欢小兰。小兰很开心。")]);
//! let service = SearchService::new(corpus, SearchConfig::default());
//!
//! let results = service.search(&["真相"], 10_000);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].highlighted_text.contains("<mark>真相</mark>"));
//! ```

pub mod config;
pub mod contracts;
pub mod corpus;
pub mod error;
pub mod provider;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod util;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use corpus::{
    load_dir, Corpus, Document, DocumentIdSource, FilenameMetadata, Metadata, MetadataResolver,
    TranscriptDetail,
};
pub use error::{Result, SleuthError};
pub use provider::{
    create_provider, KeywordExtraction, KeywordProvider, MockProvider, ProviderKind,
    QuestionCategory,
};
pub use scoring::{relevance_score, KeywordImportance, MIN_SCORE};
pub use search::{KeywordSet, Match, SearchService};
pub use types::{SearchResult, Snippet};

#[cfg(feature = "gemini")]
pub use provider::GeminiProvider;
