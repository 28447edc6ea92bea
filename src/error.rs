// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors for everything around the search core.
//!
//! The search pipeline itself never fails: bad matches are dropped and missing
//! metadata degrades to a fallback label. What can fail is the I/O around it,
//! and that's what this enum covers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a corpus, reading configuration, or calling a provider.
#[derive(Debug, Error)]
pub enum SleuthError {
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A transcript file is not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    /// A `.zip` transcript archive could not be opened or a member could not be read.
    #[error("failed to read archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON (config file or provider payload) could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// No document with this id in the corpus.
    #[error("no transcript with id '{0}'")]
    UnknownDocument(String),

    /// A keyword/answer provider failed or is not available.
    #[error("provider {provider} failed: {message}")]
    Provider { provider: String, message: String },
}

impl SleuthError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SleuthError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        SleuthError::Archive {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        SleuthError::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience result type for fallible operations outside the search core.
pub type Result<T> = std::result::Result<T, SleuthError>;
