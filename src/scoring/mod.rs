// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how snippets get their numbers.
//!
//! Rare keywords count for more than common ones. A snippet that mentions 柯南
//! is unremarkable in a corpus of Conan interviews; a snippet that mentions a
//! specific episode title is exactly what someone was looking for. Importance
//! is fixed once per corpus, scores are computed per snippet, and ranking is a
//! stable sort followed by a greedy fill of the character budget.

mod core;
pub mod importance;
pub mod ranking;

pub use core::*;
pub use importance::KeywordImportance;
