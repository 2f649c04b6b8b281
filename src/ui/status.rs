use crate::app::{Mode, Model};

/// Text of the status row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// File info, key hints and position
    Normal {
        left: String,
        middle: String,
        right: String,
    },
    /// The search prompt with hit counter
    Search(String),
}

pub fn status_line(model: &Model) -> StatusLine {
    let search = &model.search;
    if model.mode == Mode::Search {
        let results = if search.hits().is_empty() {
            "No matches".to_string()
        } else {
            format!("{}/{}", search.hit_index() + 1, search.hits().len())
        };
        return StatusLine::Search(format!("/{} ({results})", search.query()));
    }

    let name = model
        .file_path
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let left = format!("{name} - {}", format_file_size(model.document.byte_size()));

    let mut middle = format!(
        "NORMAL | /: search | n/N: next/prev | {}: quit",
        model.config.keybindings.quit_key
    );
    if model.watch_enabled {
        middle.push_str(" | watching");
    }

    let current = model.viewport.current_line();
    let total = model.document.line_count();
    let mut right = format!("Line {current}/{total} [{}%]", percentage(current, total));
    if !search.hits().is_empty() {
        right.push_str(&format!(
            " [hit {}/{}]",
            search.hit_index() + 1,
            search.hits().len()
        ));
    }

    StatusLine::Normal {
        left,
        middle,
        right,
    }
}

/// Position through the document, rounded down.
pub const fn percentage(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { current * 100 / total }
}

/// Human-readable size: bytes below 1 KB, then one decimal of KB or MB.
pub fn format_file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    #[allow(clippy::cast_precision_loss)]
    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / MB)
    }
}
