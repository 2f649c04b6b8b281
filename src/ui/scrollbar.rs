//! Scrollbar geometry.

/// Layout of the one-column scrollbar beside the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarLayout {
    /// Everything fits; only the track is drawn
    Track { height: u16 },
    /// A thumb of `size` rows starting `position` rows from the top
    Thumb { height: u16, position: u16, size: u16 },
}

/// One cell of the drawn scrollbar, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollbarCell {
    Track,
    /// A one-row thumb
    Single,
    Top,
    Body,
    Bottom,
}

impl ScrollbarCell {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Track => "│",
            Self::Single | Self::Body => "█",
            Self::Top => "▀",
            Self::Bottom => "▄",
        }
    }

    pub const fn is_thumb(self) -> bool {
        !matches!(self, Self::Track)
    }
}

/// Compute the scrollbar for a `height`-row viewport at `offset` over
/// `line_count` lines.
///
/// The thumb covers `round(height² / line_count)` rows (at least one) and
/// starts at `floor(offset * height / line_count)`, pulled up so it never
/// runs past the bottom.
pub fn compute(height: u16, offset: usize, line_count: usize) -> ScrollbarLayout {
    let h = u64::from(height);
    let total = line_count as u64;
    if h == 0 || total <= h {
        return ScrollbarLayout::Track { height };
    }
    let size = ((2 * h * h + total) / (2 * total)).clamp(1, h);
    let position = (offset as u64 * h / total).min(h - size);
    ScrollbarLayout::Thumb {
        height,
        // Both are bounded by `height`, so they fit in u16.
        position: u16::try_from(position).unwrap_or(height),
        size: u16::try_from(size).unwrap_or(height),
    }
}

impl ScrollbarLayout {
    pub const fn height(&self) -> u16 {
        match *self {
            Self::Track { height } | Self::Thumb { height, .. } => height,
        }
    }

    /// The cells to draw, one per row.
    pub fn cells(&self) -> Vec<ScrollbarCell> {
        match *self {
            Self::Track { height } => vec![ScrollbarCell::Track; usize::from(height)],
            Self::Thumb {
                height,
                position,
                size,
            } => (0..height)
                .map(|row| {
                    if row < position || row >= position + size {
                        ScrollbarCell::Track
                    } else if size == 1 {
                        ScrollbarCell::Single
                    } else if row == position {
                        ScrollbarCell::Top
                    } else if row == position + size - 1 {
                        ScrollbarCell::Bottom
                    } else {
                        ScrollbarCell::Body
                    }
                })
                .collect(),
        }
    }
}
