// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sleuth::provider::snippet_sources;
use sleuth::util::highlight::Highlighter;
use sleuth::{
    create_provider, Corpus, ProviderKind, QuestionCategory, Result, SearchConfig, SearchService,
    SleuthError, Snippet, TranscriptDetail,
};

mod cli;
use cli::display::{
    banner, format_chars, importance_value, pad_left, pad_right, render_highlights, row, rows,
    score_value, section_bot, section_mid, section_top, themed, BLUE, BOLD, CYAN, DIM, GRAY,
    GREEN, YELLOW,
};
use cli::{Cli, Commands, CorpusArgs};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            corpus,
            keywords,
            max_length,
            prefilter,
            json,
        } => run_search(&corpus, &keywords, max_length, prefilter, json),
        Commands::Ask {
            corpus,
            question,
            provider,
            max_length,
            json,
        } => run_ask(&corpus, &question, provider, max_length, json),
        Commands::Sources { corpus, json } => run_sources(&corpus, json),
        Commands::Stats { corpus } => run_stats(&corpus),
        Commands::Show {
            corpus,
            id,
            keyword,
            json,
        } => run_show(&corpus, &id, keyword.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `SLEUTH_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SLEUTH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ═══════════════════════════════════════════════════════════════════════════
// SETUP
// ═══════════════════════════════════════════════════════════════════════════

fn load_config(args: &CorpusArgs) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => SearchConfig::from_json_file(path),
        None => Ok(SearchConfig::default()),
    }
}

#[cfg(feature = "parallel")]
fn load_corpus(root: &Path) -> Result<Corpus> {
    use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

    let pb = ProgressBar::new(0);
    if !atty::is(atty::Stream::Stderr) {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    let style = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_prefix("loading");

    let corpus = sleuth::corpus::loader::load_dir_with_progress(root, &pb);
    pb.finish_and_clear();
    corpus
}

#[cfg(not(feature = "parallel"))]
fn load_corpus(root: &Path) -> Result<Corpus> {
    Corpus::load_dir(root)
}

fn build_service(args: &CorpusArgs, prefilter: bool) -> Result<SearchService> {
    let mut config = load_config(args)?;
    if prefilter {
        config.require_informative_keywords = true;
    }
    let corpus = load_corpus(&args.corpus)?;
    Ok(SearchService::new(corpus, config))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(
    args: &CorpusArgs,
    keywords: &[String],
    max_length: Option<usize>,
    prefilter: bool,
    json: bool,
) -> Result<()> {
    let service = build_service(args, prefilter)?;
    let budget = max_length.unwrap_or(service.config().max_length);
    let results = service.search(keywords, budget);

    if json {
        return print_json(&results);
    }
    banner(&format!("🔍 {}", keywords.join(" · ")));
    print_snippets(&results, service.config());
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskOutput<'a> {
    question: &'a str,
    provider: &'static str,
    keywords: &'a [String],
    category: QuestionCategory,
    confidence: f64,
    answer: &'a str,
    sources: &'a [String],
    snippets: &'a [Snippet],
}

fn run_ask(
    args: &CorpusArgs,
    question: &str,
    provider: Option<ProviderKind>,
    max_length: Option<usize>,
    json: bool,
) -> Result<()> {
    let kind = match provider {
        Some(kind) => kind,
        None => ProviderKind::from_env()?,
    };
    let provider = create_provider(kind)?;
    let extraction = provider.extract_keywords(question)?;
    info!(
        provider = provider.name(),
        keywords = ?extraction.keywords,
        category = %extraction.category,
        confidence = extraction.confidence,
        "extracted keywords"
    );

    let service = build_service(args, false)?;
    let budget = max_length.unwrap_or(service.config().max_length);
    let results = service.search(&extraction.keywords, budget);
    let sources = snippet_sources(&results);
    let answer = provider.generate_answer(question, &results, &sources)?;

    if json {
        return print_json(&AskOutput {
            question,
            provider: provider.name(),
            keywords: &extraction.keywords,
            category: extraction.category,
            confidence: extraction.confidence,
            answer: &answer,
            sources: &sources,
            snippets: &results,
        });
    }

    banner(&format!("💬 {}", question));
    section_top("keywords");
    row(&format!(
        "{}  {}  {}",
        themed(YELLOW, &[BOLD], &extraction.keywords.join(" · ")),
        themed(GRAY, &[], extraction.category.label()),
        themed(GRAY, &[DIM], &format!("confidence {:.1}", extraction.confidence)),
    ));
    section_mid("answer");
    rows(&answer, |line| line.to_string());
    if !sources.is_empty() {
        section_mid("sources");
        for source in &sources {
            row(&themed(CYAN, &[], source));
        }
    }
    section_bot();
    Ok(())
}

fn run_sources(args: &CorpusArgs, json: bool) -> Result<()> {
    let service = build_service(args, false)?;
    let sources = service.sources();
    if json {
        return print_json(&sources);
    }
    for source in &sources {
        println!("{}", source);
    }
    Ok(())
}

fn run_stats(args: &CorpusArgs) -> Result<()> {
    let service = build_service(args, false)?;
    let corpus = service.corpus();
    let importance = service.importance();

    banner("📚 corpus");
    section_top("size");
    row(&format!(
        "{} transcripts, {}",
        themed(GREEN, &[BOLD], &corpus.len().to_string()),
        format_chars(corpus.total_chars())
    ));
    section_mid("common keywords");
    row(&themed(
        GRAY,
        &[DIM],
        &format!("{}{}  importance", pad_right("keyword", 16), pad_left("frequency", 10)),
    ));
    for (keyword, frequency) in importance.iter() {
        row(&format!(
            "{}{}  {}",
            pad_right(keyword, 16),
            pad_left(&frequency.to_string(), 10),
            importance_value(importance.importance(keyword))
        ));
    }
    section_bot();
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
    #[serde(flatten)]
    detail: &'a TranscriptDetail,
    text: &'a str,
}

fn run_show(args: &CorpusArgs, id: &str, keyword: Option<&str>, json: bool) -> Result<()> {
    let service = build_service(args, false)?;
    let detail = service
        .detail(id, keyword)
        .ok_or_else(|| SleuthError::UnknownDocument(id.to_string()))?;
    let text = service
        .corpus()
        .get(id)
        .map(|doc| doc.text())
        .unwrap_or_default();

    if json {
        return print_json(&ShowOutput {
            detail: &detail,
            text,
        });
    }

    banner(&detail.title);
    section_top("interview");
    let field = |label: &str, value: &str| {
        row(&format!("{} {}", themed(GRAY, &[], &pad_right(label, 14)), value));
    };
    field("source", &detail.metadata.source);
    field("year", detail.year.as_deref().unwrap_or("-"));
    field("language", detail.metadata.language.as_deref().unwrap_or("-"));
    field("theme", &detail.theme.to_string());
    field("participants", &detail.participants.join("、"));
    if let Some(url) = &detail.metadata.url {
        field("url", &themed(BLUE, &[], url));
    }

    let highlighter = Highlighter::from_config(service.config());
    match keyword.map(str::trim).filter(|k| !k.is_empty()) {
        Some(kw) => {
            let keywords = vec![kw.to_string()];
            if detail.contexts.is_empty() {
                section_mid("contexts");
                row(&themed(GRAY, &[], &format!("'{}' does not occur", kw)));
            }
            for (i, context) in detail.contexts.iter().enumerate() {
                section_mid(&format!("context {}", i + 1));
                rows(context, |line| {
                    render_highlights(
                        &highlighter.highlight(line, &keywords),
                        &service.config().highlight_open,
                        &service.config().highlight_close,
                    )
                });
            }
        }
        None => {
            section_mid("transcript");
            rows(text, |line| line.to_string());
        }
    }
    section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════

fn print_snippets(results: &[Snippet], config: &SearchConfig) {
    if results.is_empty() {
        println!("{}", themed(GRAY, &[], "  no matching snippets"));
        return;
    }

    let highlighter = Highlighter::from_config(config);
    for (i, snippet) in results.iter().enumerate() {
        section_top(&format!("#{} {}", i + 1, snippet.source));
        row(&format!(
            "{} {}  {}",
            themed(GRAY, &[], "score"),
            score_value(snippet.relevance_score),
            themed(
                GRAY,
                &[DIM],
                &format!(
                    "{} @ {}..{}",
                    snippet.document_id, snippet.start_position, snippet.end_position
                )
            ),
        ));
        if let Some(url) = &snippet.url {
            row(&themed(BLUE, &[], url));
        }
        section_mid("snippet");
        rows(&snippet.text, |line| {
            render_highlights(
                &highlighter.highlight(line, &snippet.keywords_found),
                &config.highlight_open,
                &config.highlight_close,
            )
        });
        section_bot();
    }

    let total: usize = results.iter().map(Snippet::char_len).sum();
    println!(
        "{}",
        themed(
            GRAY,
            &[],
            &format!("  {} snippets, {}", results.len(), format_chars(total))
        )
    );
}
