//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible area of the document and
//! handles all scroll operations. Every operation consumes the viewport and
//! returns the updated one, with the offset clamped to the document.

use std::ops::Range;

/// Manages the visible portion of a document.
///
/// The viewport tracks:
/// - Text area dimensions (width, height)
/// - Current scroll offset (0-based first visible line)
/// - Current reference line (1-based)
/// - Total document length
/// - Under word wrap, the furthest offset that still fills the screen
///
/// # Example
///
/// ```
/// use glance::ui::viewport::Viewport;
///
/// let vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// let vp = vp.scroll_by(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// assert_eq!(vp.current_line(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    current_line: usize,
    total_lines: usize,
    /// Offset limit measured in wrapped rows; `None` means one row per line
    wrapped_max_offset: Option<usize>,
}

impl Viewport {
    /// Create a new viewport at the top of the document.
    ///
    /// # Arguments
    ///
    /// * `width` - Text area width in columns
    /// * `height` - Text area height in rows
    /// * `total_lines` - Total lines in the document
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            current_line: 1,
            total_lines,
            wrapped_max_offset: None,
        }
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the 1-based reference line.
    pub const fn current_line(&self) -> usize {
        self.current_line
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of lines in the document.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Get the range of visible lines (0-based).
    ///
    /// Returns a range from the current offset to offset + height,
    /// clamped to the document bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end.max(start)
    }

    /// Check if we can scroll up.
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    /// Check if we can scroll down.
    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll by `delta` lines; negative scrolls up.
    #[must_use]
    pub fn scroll_by(self, delta: isize) -> Self {
        let offset = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta.unsigned_abs())
        };
        self.with_scroll_offset(offset)
    }

    /// Scroll up by n lines.
    #[must_use]
    pub fn scroll_up(self, n: usize) -> Self {
        self.with_scroll_offset(self.offset.saturating_sub(n))
    }

    /// Scroll down by n lines.
    #[must_use]
    pub fn scroll_down(self, n: usize) -> Self {
        self.with_scroll_offset(self.offset.saturating_add(n))
    }

    /// Scroll up one page.
    #[must_use]
    pub fn page_up(self) -> Self {
        self.scroll_up(self.height as usize)
    }

    /// Scroll down one page.
    #[must_use]
    pub fn page_down(self) -> Self {
        self.scroll_down(self.height as usize)
    }

    /// Go to the beginning of the document.
    #[must_use]
    pub const fn go_to_top(mut self) -> Self {
        self.offset = 0;
        self.current_line = 1;
        self
    }

    /// Go to the end of the document.
    #[must_use]
    pub const fn go_to_bottom(mut self) -> Self {
        self.offset = self.max_offset();
        self.current_line = self.last_line();
        self
    }

    /// Center `line` (1-based) in the viewport and make it the current line.
    ///
    /// Near the document edges the offset clamps, so the line may sit above
    /// or below center.
    #[must_use]
    pub fn jump_to_line(self, line: usize) -> Self {
        self.jump_to_line_in_rows(line, |_| 1)
    }

    /// Like [`Self::jump_to_line`], where line `i` (0-based) fills
    /// `rows_of(i)` screen rows.
    ///
    /// At most half the height is spent on the lines above the target, so
    /// its first row is always on screen.
    #[must_use]
    pub fn jump_to_line_in_rows(mut self, line: usize, rows_of: impl Fn(usize) -> usize) -> Self {
        let target = line.clamp(1, self.last_line());
        let half = self.height as usize / 2;
        let mut offset = target - 1;
        let mut rows_above = 0;
        while offset > 0 {
            let rows = rows_above + rows_of(offset - 1).max(1);
            if rows > half {
                break;
            }
            rows_above = rows;
            offset -= 1;
        }
        self.offset = offset.min(self.max_offset());
        self.current_line = target;
        self
    }

    /// Limit scrolling for wrapped lines, where line `i` (0-based) fills
    /// `rows_of(i)` screen rows.
    ///
    /// The furthest offset becomes the one whose remaining lines still fit,
    /// so the last line can always be reached. Call again whenever the size,
    /// the document or the wrap width changes.
    #[must_use]
    pub fn with_wrapped_rows(mut self, rows_of: impl Fn(usize) -> usize) -> Self {
        let height = self.height as usize;
        let mut offset = self.total_lines;
        let mut rows_below = 0;
        while offset > 0 {
            let rows = rows_below + rows_of(offset - 1).max(1);
            if rows > height {
                break;
            }
            rows_below = rows;
            offset -= 1;
        }
        // A last line taller than the screen still starts at the top.
        if offset == self.total_lines && height > 0 {
            offset = offset.saturating_sub(1);
        }
        self.wrapped_max_offset = Some(offset);
        self.clamp_offset()
    }

    /// Return to one screen row per line.
    #[must_use]
    pub fn without_wrapped_rows(mut self) -> Self {
        self.wrapped_max_offset = None;
        self.clamp_offset()
    }

    /// Resize the viewport.
    ///
    /// The current line is pulled back on screen when the resize hid it.
    #[must_use]
    pub fn resize(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        // Clamp offset if document is now shorter than viewport
        self = self.clamp_offset();
        let first = self.offset + 1;
        let last = (self.offset + height as usize).min(self.total_lines).max(first);
        self.current_line = self.current_line.clamp(first, last).min(self.last_line());
        self
    }

    /// Update the total number of lines (e.g., after reload).
    #[must_use]
    pub fn set_total_lines(mut self, total: usize) -> Self {
        self.total_lines = total;
        self = self.clamp_offset();
        self.current_line = self.current_line.clamp(1, self.last_line());
        self
    }

    fn clamp_offset(mut self) -> Self {
        self.offset = self.offset.min(self.max_offset());
        self
    }

    fn with_scroll_offset(mut self, offset: usize) -> Self {
        self.offset = offset.min(self.max_offset());
        self.current_line = (self.offset + 1).min(self.last_line());
        self
    }

    /// Calculate the maximum valid offset.
    const fn max_offset(&self) -> usize {
        match self.wrapped_max_offset {
            Some(max) if max <= self.total_lines => max,
            _ => self.total_lines.saturating_sub(self.height as usize),
        }
    }

    const fn last_line(&self) -> usize {
        if self.total_lines == 0 {
            1
        } else {
            self.total_lines
        }
    }
}
