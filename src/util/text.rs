// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character-offset helpers.

/// Characters that end a sentence in the transcripts.
pub const SENTENCE_DELIMITERS: [char; 4] = ['。', '！', '？', '\n'];

/// Is `c` a sentence delimiter?
#[inline]
pub fn is_sentence_delimiter(c: char) -> bool {
    SENTENCE_DELIMITERS.contains(&c)
}

/// Length of `s` in characters.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of every character in `text`, followed by `text.len()`.
///
/// The trailing sentinel means `starts[n]` is valid for `n == char_len(text)`,
/// so half-open character ranges convert to byte ranges without special cases.
pub fn char_starts(text: &str) -> Vec<usize> {
    let mut starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    starts.push(text.len());
    starts
}

/// The first `n` characters of `s` (all of `s` if it is shorter).
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}
