//! Case-insensitive substring matching.
//!
//! ASCII input takes a byte-level fast path. Anything else is folded per
//! char with Unicode lowercasing while keeping the byte offsets of the
//! original text, so spans always land on char boundaries of the input.

use std::ops::Range;

use crate::document::Document;

/// 1-based numbers of every line containing `query`, ascending.
///
/// One entry per matching line regardless of how often it matches.
/// An empty query matches nothing.
pub fn find_hits(document: &Document, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = fold(query);
    document
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| contains_folded(line, query, &needle))
        .map(|(idx, _)| idx + 1)
        .collect()
}

/// Whether `line` contains `query`, ignoring case.
pub fn contains_ignore_case(line: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    contains_folded(line, query, &fold(query))
}

/// Byte ranges of every non-overlapping occurrence of `query` in `line`.
///
/// Scanning is left to right and resumes right after each match.
///
/// # Example
///
/// ```
/// use glance::search::highlight_spans;
///
/// assert_eq!(highlight_spans("foofoo", "FOO"), vec![0..3, 3..6]);
/// assert!(highlight_spans("foofoo", "").is_empty());
/// ```
pub fn highlight_spans(line: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    if line.is_ascii() && query.is_ascii() {
        return ascii_spans(line.as_bytes(), query.as_bytes());
    }

    let needle = fold(query);
    let hay = fold_with_offsets(line);
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(start) = find_from(&hay, &needle, from) {
        let last = start + needle.len() - 1;
        let span = hay[start].start..hay[last].end;
        from = last + 1;
        // A match can end inside a char whose lowercase form expands to
        // several chars; skip the rest of that char.
        while from < hay.len() && hay[from].start < span.end {
            from += 1;
        }
        spans.push(span);
    }
    spans
}

#[derive(Debug, Clone, Copy)]
struct FoldedChar {
    start: usize,
    end: usize,
    ch: char,
}

fn fold(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

fn fold_with_offsets(text: &str) -> Vec<FoldedChar> {
    text.char_indices()
        .flat_map(|(start, c)| {
            let end = start + c.len_utf8();
            c.to_lowercase().map(move |ch| FoldedChar { start, end, ch })
        })
        .collect()
}

fn contains_folded(line: &str, query: &str, needle: &[char]) -> bool {
    if line.is_ascii() && query.is_ascii() {
        let q = query.as_bytes();
        return line.len() >= q.len()
            && line
                .as_bytes()
                .windows(q.len())
                .any(|w| w.eq_ignore_ascii_case(q));
    }
    find_from(&fold_with_offsets(line), needle, 0).is_some()
}

fn find_from(hay: &[FoldedChar], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&k| {
        hay[k..k + needle.len()]
            .iter()
            .zip(needle)
            .all(|(h, n)| h.ch == *n)
    })
}

fn ascii_spans(hay: &[u8], needle: &[u8]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= hay.len() {
        if hay[pos..pos + needle.len()].eq_ignore_ascii_case(needle) {
            spans.push(pos..pos + needle.len());
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    spans
}
