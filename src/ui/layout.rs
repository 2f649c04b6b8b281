//! Frame composition.
//!
//! [`compose`] turns the model into a [`FrameLayout`]: the rows to draw with
//! their gutters and highlight spans, the scrollbar geometry and the status
//! line. It decides no colors; the renderer maps each part to a style slot.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{LoadState, Model};
use crate::search::highlight_spans;

use super::scrollbar::{self, ScrollbarLayout};
use super::status::{self, StatusLine};

/// Marker appended to lines cut at the right edge.
pub const TRUNCATION_MARKER: &str = "...";

const REPLACEMENT_CHAR: char = '\u{fffd}';

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    pub body: Body,
    pub scrollbar: Option<ScrollbarLayout>,
    pub status: Option<StatusLine>,
}

/// The text area contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading(String),
    Error(String),
    Lines(Vec<RowLayout>),
}

/// One screen row of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// Line number, `None` on wrapped continuation rows
    pub line_number: Option<usize>,
    /// Right-aligned number plus separator; blank on continuation rows
    pub gutter: String,
    /// Display text with tabs expanded and the truncation marker appended
    pub text: String,
    /// Byte ranges of `text` to highlight
    pub highlights: Vec<Range<usize>>,
    /// Whether this row shows the current line
    pub current: bool,
    /// Whether the line was cut to fit
    pub truncated: bool,
}

/// Build the frame description for `model`.
pub fn compose(model: &Model) -> FrameLayout {
    let ui = &model.config.ui;
    let body = match &model.load_state {
        LoadState::Loading => Body::Loading(format!("Loading {}…", model.file_path.display())),
        LoadState::Failed(message) => Body::Error(message.clone()),
        LoadState::Ready => Body::Lines(compose_rows(model)),
    };
    let scrollbar = ui.show_scrollbar.then(|| {
        scrollbar::compute(
            model.viewport.height(),
            model.viewport.offset(),
            model.document.line_count(),
        )
    });
    let status = ui.show_status.then(|| status::status_line(model));
    FrameLayout {
        body,
        scrollbar,
        status,
    }
}

/// Columns taken by the line-number gutter, separator included.
pub fn gutter_width(line_count: usize) -> usize {
    digit_count(line_count).max(2) + 1
}

fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

fn format_gutter(number: usize, width: usize) -> String {
    format!("{number:>w$} ", w = width.saturating_sub(1))
}

/// Columns taken by the gutter as currently configured.
fn active_gutter_width(model: &Model) -> usize {
    if model.config.editor.show_line_numbers {
        gutter_width(model.document.line_count())
    } else {
        0
    }
}

/// Columns left for text beside the gutter.
fn content_width(model: &Model) -> usize {
    usize::from(model.viewport.width()).saturating_sub(active_gutter_width(model))
}

/// Screen rows that line `index` (0-based) fills when wrapped at the
/// model's current width.
pub fn wrapped_rows(model: &Model) -> impl Fn(usize) -> usize + '_ {
    let width = content_width(model);
    let tab_width = model.config.editor.tab_width;
    let document = &model.document;
    move |index| {
        document
            .lines()
            .get(index)
            .map_or(1, |line| wrap_ranges(&expand_line(line, tab_width), width).len())
    }
}

fn compose_rows(model: &Model) -> Vec<RowLayout> {
    let viewport = model.viewport;
    let editor = &model.config.editor;
    let gutter = active_gutter_width(model);
    let content_width = content_width(model);
    let height = usize::from(viewport.height());
    let query = model.search.highlight();

    let mut rows = Vec::with_capacity(height);
    let visible = model.document.slice(viewport.offset(), height);
    for (i, raw) in visible.iter().enumerate() {
        let number = viewport.offset() + i + 1;
        let current = number == viewport.current_line();
        let (expanded, spans) =
            expand_with_spans(raw, editor.tab_width, &highlight_spans(raw, query));
        let gutter_text = (gutter > 0).then(|| format_gutter(number, gutter));

        if editor.word_wrap {
            let chunks = wrap_ranges(&expanded, content_width);
            for (chunk_index, chunk) in chunks.into_iter().enumerate() {
                if rows.len() == height {
                    break;
                }
                let first = chunk_index == 0;
                rows.push(RowLayout {
                    line_number: first.then_some(number),
                    gutter: match &gutter_text {
                        Some(text) if first => text.clone(),
                        Some(_) => " ".repeat(gutter),
                        None => String::new(),
                    },
                    text: expanded[chunk.clone()].to_string(),
                    highlights: clip_spans(&spans, &chunk),
                    current,
                    truncated: false,
                });
            }
            if rows.len() == height {
                break;
            }
        } else {
            let (kept, truncated) = truncate_to_width(&expanded, content_width);
            // Only matches wholly inside the kept text count.
            let highlights = spans
                .iter()
                .filter(|span| span.end <= kept.len())
                .cloned()
                .collect();
            let mut text = kept.to_string();
            if truncated && content_width >= TRUNCATION_MARKER.len() {
                text.push_str(TRUNCATION_MARKER);
            }
            rows.push(RowLayout {
                line_number: Some(number),
                gutter: gutter_text.unwrap_or_default(),
                text,
                highlights,
                current,
                truncated,
            });
        }
    }
    rows
}

/// Expand tabs to `tab_width` spaces and replace other control characters.
pub fn expand_line(line: &str, tab_width: usize) -> String {
    expand_with_spans(line, tab_width, &[]).0
}

/// Expand `line` like [`expand_line`] and move `spans` (byte ranges of
/// `line` on char boundaries) onto the expanded text.
fn expand_with_spans(
    line: &str,
    tab_width: usize,
    spans: &[Range<usize>],
) -> (String, Vec<Range<usize>>) {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len());
    // Expanded offset of each raw char boundary, end included.
    let mut offsets = vec![0; line.len() + 1];
    for (idx, c) in line.char_indices() {
        offsets[idx] = out.len();
        match c {
            '\t' => out.extend(std::iter::repeat_n(' ', tab_width)),
            c if c.is_control() => out.push(REPLACEMENT_CHAR),
            c => out.push(c),
        }
    }
    offsets[line.len()] = out.len();
    let spans = spans
        .iter()
        .map(|span| offsets[span.start]..offsets[span.end])
        .collect();
    (out, spans)
}

/// Cut `text` to fit `width` columns.
///
/// Returns the kept prefix and whether anything was cut. When cut, the
/// prefix leaves room for [`TRUNCATION_MARKER`] unless `width` is too
/// narrow to hold it.
pub fn truncate_to_width(text: &str, width: usize) -> (&str, bool) {
    if text.width() <= width {
        return (text, false);
    }
    let budget = if width >= TRUNCATION_MARKER.len() {
        width - TRUNCATION_MARKER.len()
    } else {
        width
    };
    (prefix_within(text, budget), true)
}

fn prefix_within(text: &str, budget: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Split `text` into byte ranges of at most `width` columns each.
///
/// An empty line yields one empty range. A char wider than `width` gets a
/// row to itself.
pub fn wrap_ranges(text: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width && idx > start {
            ranges.push(start..idx);
            start = idx;
            used = 0;
        }
        used += w;
    }
    ranges.push(start..text.len());
    ranges
}

/// Intersect `spans` with `chunk`, rebased to the chunk start.
fn clip_spans(spans: &[Range<usize>], chunk: &Range<usize>) -> Vec<Range<usize>> {
    spans
        .iter()
        .filter_map(|span| {
            let start = span.start.max(chunk.start);
            let end = span.end.min(chunk.end);
            (start < end).then(|| start - chunk.start..end - chunk.start)
        })
        .collect()
}
