// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sleuth command-line interface.
//!
//! Five subcommands, all over a directory of transcripts: `search` for ranked
//! snippets, `ask` to go through a keyword provider first, `sources` and
//! `stats` for a look at the corpus, and `show` for one transcript.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sleuth::ProviderKind;

#[derive(Parser)]
#[command(
    name = "sleuth",
    about = "Keyword search over interview transcripts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the transcripts live and how to search them.
#[derive(Args)]
pub struct CorpusArgs {
    /// Directory of .txt transcripts and .zip archives of them (searched recursively)
    #[arg(short, long)]
    pub corpus: PathBuf,

    /// JSON search configuration (missing fields use defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search transcripts for keywords and print ranked snippets
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Keywords to look for (case-insensitive, literal)
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Total character budget for the results
        #[arg(short = 'm', long)]
        max_length: Option<usize>,

        /// Drop snippets whose only keyword is a common one
        #[arg(long)]
        prefilter: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a question: extract keywords, search, synthesize
    Ask {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// The question, in any language the transcripts use
        question: String,

        /// Keyword provider (defaults to SLEUTH_PROVIDER, then mock)
        #[arg(short, long)]
        provider: Option<ProviderKind>,

        /// Total character budget for the supporting snippets
        #[arg(short = 'm', long)]
        max_length: Option<usize>,

        /// Print the answer and its snippets as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct sources in the corpus
    Sources {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show corpus size and the common-keyword frequency table
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Show one transcript with its metadata and keyword contexts
    Show {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Document id (path relative to the corpus directory)
        id: String,

        /// Keyword whose surrounding paragraphs to show
        #[arg(short, long)]
        keyword: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
