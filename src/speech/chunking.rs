// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Split text into request-sized pieces for the TTS endpoint
//!
//! The endpoint rejects long inputs, so text is cut at sentence punctuation
//! first, then at whitespace, and only as a last resort inside a word.
//! Neighbouring pieces are packed back together while they fit.

/// Longest text (in chars) sent in one TTS request
pub const MAX_CHUNK_CHARS: usize = 100;

const BREAK_AFTER: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '。', '！', '？', '；', '：', '，', '、', '।', '॥',
];

/// Split `text` into chunks of at most `max_chars` chars
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        for part in fit_sentence(&sentence, max_chars) {
            pack(&mut chunks, &mut current, part, max_chars);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut buf = String::new();

    for c in text.chars() {
        buf.push(c);
        if BREAK_AFTER.contains(&c) {
            sentences.push(std::mem::take(&mut buf));
        }
    }
    sentences.push(buf);

    sentences
        .into_iter()
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

fn fit_sentence(sentence: &str, max_chars: usize) -> Vec<String> {
    if sentence.chars().count() <= max_chars {
        return vec![sentence.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    for word in sentence.split_whitespace() {
        if word.chars().count() > max_chars {
            for piece in hard_split(word, max_chars) {
                pack(&mut parts, &mut current, piece, max_chars);
            }
        } else {
            pack(&mut parts, &mut current, word.to_string(), max_chars);
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn hard_split(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars)
        .map(|c| c.iter().collect())
        .collect()
}

fn pack(chunks: &mut Vec<String>, current: &mut String, part: String, max_chars: usize) {
    let joined = if current.is_empty() {
        part.chars().count()
    } else {
        current.chars().count() + 1 + part.chars().count()
    };

    if joined <= max_chars {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&part);
    } else {
        if !current.is_empty() {
            chunks.push(std::mem::take(current));
        }
        *current = part;
    }
}
