use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;

use super::layout::{Body, FrameLayout, RowLayout};
use super::scrollbar::ScrollbarLayout;
use super::status::StatusLine;
use super::style::Styles;

/// Render a composed frame.
pub fn render(layout: &FrameLayout, theme: &Theme, frame: &mut Frame) {
    let styles = Styles::from_theme(theme);
    render_with(layout, &styles, frame);
}

pub(super) fn render_with(layout: &FrameLayout, styles: &Styles, frame: &mut Frame) {
    let area = frame.area();
    let status_height = u16::from(layout.status.is_some());
    let [main_area, status_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(status_height)]).areas(area);
    let scrollbar_width = u16::from(layout.scrollbar.is_some());
    let [text_area, scrollbar_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(scrollbar_width)])
            .areas(main_area);

    render_body(&layout.body, styles, frame, text_area);
    if let Some(scrollbar) = &layout.scrollbar {
        render_scrollbar(scrollbar, styles, frame, scrollbar_area);
    }
    if let Some(status) = &layout.status {
        render_status(status, styles, frame, status_area);
    }
}

fn render_body(body: &Body, styles: &Styles, frame: &mut Frame, area: Rect) {
    let paragraph = match body {
        Body::Loading(message) => Paragraph::new(message.as_str()).style(styles.empty_text),
        Body::Error(message) => Paragraph::new(message.as_str()).style(styles.error),
        Body::Lines(rows) => {
            let lines: Vec<Line> = rows.iter().map(|row| row_line(row, styles)).collect();
            Paragraph::new(lines).style(styles.normal_line)
        }
    };
    frame.render_widget(paragraph, area);
}

fn row_line<'a>(row: &'a RowLayout, styles: &Styles) -> Line<'a> {
    let base = if row.current {
        styles.current_line
    } else {
        styles.normal_line
    };
    let mut spans = Vec::with_capacity(row.highlights.len() * 2 + 2);
    if !row.gutter.is_empty() {
        spans.push(Span::styled(row.gutter.as_str(), styles.line_number));
    }
    let mut cursor = 0;
    for hl in &row.highlights {
        if hl.start > cursor {
            spans.push(Span::styled(&row.text[cursor..hl.start], base));
        }
        spans.push(Span::styled(&row.text[hl.clone()], styles.search_match));
        cursor = hl.end;
    }
    if cursor < row.text.len() {
        spans.push(Span::styled(&row.text[cursor..], base));
    }
    Line::from(spans).style(base)
}

fn render_scrollbar(scrollbar: &ScrollbarLayout, styles: &Styles, frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = scrollbar
        .cells()
        .into_iter()
        .map(|cell| {
            let style = if cell.is_thumb() {
                styles.thumb
            } else {
                styles.track
            };
            Line::styled(cell.symbol(), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(styles.track), area);
}

fn render_status(status: &StatusLine, styles: &Styles, frame: &mut Frame, area: Rect) {
    match status {
        StatusLine::Search(prompt) => {
            frame.render_widget(
                Paragraph::new(prompt.as_str()).style(styles.status_search),
                area,
            );
        }
        StatusLine::Normal {
            left,
            middle,
            right,
        } => {
            frame.render_widget(Paragraph::new("").style(styles.status_base), area);
            let left = format!(" {left} ");
            let right = format!(" {right} ");
            let [left_area, middle_area, right_area] = Layout::horizontal([
                Constraint::Length(column_count(&left)),
                Constraint::Fill(1),
                Constraint::Length(column_count(&right)),
            ])
            .areas(area);
            frame.render_widget(Paragraph::new(left).style(styles.status_left), left_area);
            frame.render_widget(
                Paragraph::new(middle.as_str())
                    .style(styles.status_middle)
                    .alignment(Alignment::Center),
                middle_area,
            );
            frame.render_widget(Paragraph::new(right).style(styles.status_right), right_area);
        }
    }
}

fn column_count(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}
