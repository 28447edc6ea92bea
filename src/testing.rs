//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::config::SearchConfig;
use crate::corpus::{Corpus, DocumentIdSource};
use crate::search::SearchService;
use crate::types::Snippet;

/// Create a snippet with the given span and score.
///
/// `highlighted_text` is left equal to `text`.
pub fn make_snippet(doc: &str, text: &str, start: usize, end: usize, score: f64) -> Snippet {
    Snippet {
        document_id: doc.to_string(),
        text: text.to_string(),
        keywords_found: vec![],
        relevance_score: score,
        source: doc.to_string(),
        url: None,
        highlighted_text: text.to_string(),
        start_position: start,
        end_position: end,
    }
}

/// A small archive laid out like the real one: `year/year_id_speaker_language.txt`.
pub fn sample_corpus() -> Corpus {
    Corpus::from_map([
        (
            "1997/1997_M1_青山刚昌_日文.txt",
            "采访者：剧场版第一部的构思是怎样的？\n\
             青山刚昌：最开始想的是钟楼的场景。柯南在那里发现了真相。\n\
             采访者：新一和小兰的关系呢？\n\
             青山刚昌：新一喜欢小兰，这一点从来没有变过。小兰很开心。\n\
             来源：https://www.bilibili.com/read/readlist/rl725889",
        ),
        (
            "2001/2001_SP_高山南_中文.txt",
            "高山南：为柯南配音已经很多年了。\n\
             每次录音都很紧张！灰原哀的台词总是很冷静。\n\
             我最喜欢的角色是阿笠博士，他的发明总能帮上柯南。",
        ),
        (
            "2017/2017_1000话_青山刚昌_日文.txt",
            "1000話を迎えて。コナンと蘭の物語はまだ続きます。\n\
             黑衣组织的真相会在最后揭晓吗？青山刚昌：请期待。",
        ),
        ("其他/bbs_aptx.txt", "论坛整理的访谈合集。赤井秀一的身份之谜。"),
    ])
}

/// A service over `entries` that labels each snippet with its document id.
pub fn service_for(entries: &[(&str, &str)]) -> SearchService {
    service_with_config(entries, SearchConfig::default())
}

pub fn service_with_config(entries: &[(&str, &str)], config: SearchConfig) -> SearchService {
    SearchService::with_resolver(
        Corpus::from_map(entries.iter().copied()),
        config,
        DocumentIdSource,
    )
}

const SYNTHETIC_WORDS: &[&str] = &[
    "柯南", "小兰", "新一", "博士", "灰原", "案件", "推理", "真相", "组织", "侦探", "米花町", "钟楼",
    "采访", "作者", "剧场版", "漫画", "动画", "录音", "台词", "角色",
];

const SYNTHETIC_ENDINGS: &[char] = &['。', '！', '？', '\n'];

/// Deterministic pseudo-transcript of `sentences` sentences.
pub fn synthetic_transcript(seed: u64, sentences: usize) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut text = String::new();
    for _ in 0..sentences {
        let words = 4 + next() % 8;
        for _ in 0..words {
            text.push_str(SYNTHETIC_WORDS[next() % SYNTHETIC_WORDS.len()]);
        }
        text.push(SYNTHETIC_ENDINGS[next() % SYNTHETIC_ENDINGS.len()]);
    }
    text
}

/// `documents` synthetic transcripts of `sentences` sentences each.
pub fn synthetic_corpus(documents: usize, sentences: usize) -> Corpus {
    (0..documents)
        .map(|i| (format!("{:04}/doc_{}.txt", 1990 + i % 30, i), synthetic_transcript(i as u64, sentences)))
        .collect()
}
