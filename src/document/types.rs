//! Core document type.

use std::ops::Range;

use crate::error::{Result, ViewerError};

/// An immutable loaded text file with its line index.
///
/// A document always has at least one line: empty input produces a single
/// empty line so the viewport never has to special-case zero lines.
///
/// # Example
///
/// ```
/// use glance::document::Document;
///
/// let doc = Document::load("alpha\nbeta");
/// assert_eq!(doc.line_count(), 2);
/// assert_eq!(doc.line_at(2).unwrap(), "beta");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Original text as loaded
    source: String,
    /// Display lines, split on `\n` with any trailing `\r` removed
    lines: Vec<String>,
}

impl Document {
    /// Build a document by splitting `text` on newlines.
    pub fn load(text: impl Into<String>) -> Self {
        let source = text.into();
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { source, lines }
    }

    /// Create an empty document (one empty line).
    pub fn empty() -> Self {
        Self::load(String::new())
    }

    /// Number of lines, always at least 1.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OutOfRange`] if `line` is 0 or past the end.
    pub fn line_at(&self, line: usize) -> Result<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
            .ok_or(ViewerError::OutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// All display lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines `offset..offset + height`, clamped to the document.
    pub fn slice(&self, offset: usize, height: usize) -> &[String] {
        let range = self.clamped_range(offset, height);
        &self.lines[range]
    }

    /// Original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Size of the original text in bytes.
    pub fn byte_size(&self) -> usize {
        self.source.len()
    }

    fn clamped_range(&self, offset: usize, height: usize) -> Range<usize> {
        let start = offset.min(self.lines.len());
        let end = offset.saturating_add(height).min(self.lines.len());
        start..end
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
