//! Theming and color definitions.
//!
//! Maps the `#rrggbb` slots of a [`Theme`] onto the ratatui styles used by
//! each part of the frame. Colors degrade to the xterm 256-color cube on
//! terminals without truecolor support.

use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme;

/// Foreground used for load errors.
const ERROR_COLOR: &str = "#e06c75";

/// Resolved styles for every drawn element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    pub line_number: Style,
    pub normal_line: Style,
    pub current_line: Style,
    pub search_match: Style,
    /// Placeholder text such as the loading message
    pub empty_text: Style,
    pub track: Style,
    pub thumb: Style,
    pub status_base: Style,
    pub status_left: Style,
    pub status_middle: Style,
    pub status_right: Style,
    pub status_search: Style,
    pub error: Style,
}

impl Styles {
    pub fn from_theme(theme: &Theme) -> Self {
        Self::from_theme_with(theme, supports_truecolor())
    }

    fn from_theme_with(theme: &Theme, truecolor: bool) -> Self {
        let color = |hex: &str| color_for_terminal(hex, truecolor);
        let background = color(&theme.background);
        let foreground = color(&theme.foreground);
        let selection = color(&theme.selection);
        let accent = color(&theme.accent);
        let line_numbers = color(&theme.line_numbers);
        let base = Style::default().fg(foreground).bg(background);

        Self {
            line_number: base.fg(line_numbers),
            normal_line: base,
            current_line: base.bg(selection),
            search_match: Style::default()
                .fg(background)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            empty_text: base.fg(line_numbers).add_modifier(Modifier::ITALIC),
            track: base.fg(selection),
            thumb: base.fg(accent),
            status_base: Style::default().fg(foreground).bg(selection),
            status_left: Style::default()
                .fg(background)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            status_middle: Style::default().fg(foreground).bg(selection),
            status_right: Style::default().fg(background).bg(accent),
            status_search: Style::default()
                .fg(foreground)
                .bg(selection)
                .add_modifier(Modifier::BOLD),
            error: base.fg(color(ERROR_COLOR)).add_modifier(Modifier::BOLD),
        }
    }
}

/// Parse `#rrggbb` (the `#` is optional). Returns `None` if malformed.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn color_for_terminal(hex: &str, truecolor: bool) -> Color {
    let Some((r, g, b)) = parse_hex_color(hex) else {
        tracing::debug!("invalid theme color {hex:?}, using terminal default");
        return Color::Reset;
    };
    if truecolor {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_256(r, g, b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("GLANCE_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    term.is_some_and(|t| {
        let lower = t.to_ascii_lowercase();
        lower.contains("direct") || lower.contains("truecolor")
    })
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
