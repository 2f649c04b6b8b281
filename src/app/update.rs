use std::sync::Arc;

use crate::app::Model;
use crate::app::model::{LoadState, Mode};
use crate::app::tasks::Task;
use crate::document::Document;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Search
    /// Enter search mode with an empty query
    StartSearch,
    /// Append a character to the query
    SearchInput(char),
    /// Delete the last query character
    SearchBackspace,
    /// Run the query and jump to the first hit
    CommitSearch,
    /// Leave search mode, clearing query and highlights
    CancelSearch,
    /// Go to next search hit
    NextHit,
    /// Go to previous search hit
    PrevHit,

    // Display
    /// Show or hide the line-number gutter
    ToggleLineNumbers,
    /// Switch between truncating and wrapping long lines
    ToggleWordWrap,

    // File and background work
    /// File changed externally, reload
    FileChanged,
    /// Force reload file
    ForceReload,
    /// A load task finished
    FileLoaded(Result<Arc<Document>, String>),
    /// A search task finished for the given commit generation
    SearchCompleted {
        generation: u64,
        hits: Vec<usize>,
        jump_to_first: bool,
    },

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ScrollUp(_)
                | Self::ScrollDown(_)
                | Self::PageUp
                | Self::PageDown
                | Self::GoToTop
                | Self::GoToBottom
                | Self::NextHit
                | Self::PrevHit
                | Self::StartSearch
        )
    }

    const fn is_search_input(&self) -> bool {
        matches!(
            self,
            Self::SearchInput(_) | Self::SearchBackspace | Self::CommitSearch | Self::CancelSearch
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Background work is queued on the model and run by the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Keys mean different things per mode; drop messages from the other one.
    match model.mode {
        Mode::Normal if msg.is_search_input() => return model,
        Mode::Search if msg.is_navigation() => return model,
        _ => {}
    }

    match msg {
        // Navigation
        Message::ScrollUp(n) => model.viewport = model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport = model.viewport.scroll_down(n),
        Message::PageUp => model.viewport = model.viewport.page_up(),
        Message::PageDown => model.viewport = model.viewport.page_down(),
        Message::GoToTop => model.viewport = model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport = model.viewport.go_to_bottom(),

        // Search
        Message::StartSearch => {
            model.search = std::mem::take(&mut model.search).reset();
            model.mode = Mode::Search;
        }
        Message::SearchInput(c) => {
            model.search = std::mem::take(&mut model.search).push_char(c);
        }
        Message::SearchBackspace => {
            model.search = std::mem::take(&mut model.search).pop_char();
        }
        Message::CommitSearch => {
            model.mode = Mode::Normal;
            submit_search(&mut model, true);
        }
        Message::CancelSearch => {
            model.search = std::mem::take(&mut model.search).reset();
            model.mode = Mode::Normal;
        }
        Message::NextHit => {
            model.search = std::mem::take(&mut model.search).next();
            jump_to_current_hit(&mut model);
        }
        Message::PrevHit => {
            model.search = std::mem::take(&mut model.search).previous();
            jump_to_current_hit(&mut model);
        }
        Message::SearchCompleted {
            generation,
            hits,
            jump_to_first,
        } => {
            if !model.search.is_current(generation) {
                tracing::debug!(
                    generation,
                    current = model.search.generation(),
                    "discarding stale search result"
                );
                return model;
            }
            tracing::debug!(hits = hits.len(), "search completed");
            model.search = std::mem::take(&mut model.search).with_hits(hits);
            if jump_to_first {
                jump_to_current_hit(&mut model);
            }
        }

        // Display
        Message::ToggleLineNumbers => {
            model.config.editor.show_line_numbers = !model.config.editor.show_line_numbers;
            model.refit_viewport();
        }
        Message::ToggleWordWrap => {
            model.config.editor.word_wrap = !model.config.editor.word_wrap;
            model.refit_viewport();
        }

        // File and background work
        Message::FileChanged | Message::ForceReload => model.request_load(),
        Message::FileLoaded(Ok(document)) => {
            tracing::info!(
                path = %model.file_path.display(),
                lines = document.line_count(),
                "document loaded"
            );
            model.viewport = model.viewport.set_total_lines(document.line_count());
            model.document = document;
            model.load_state = LoadState::Ready;
            model.refit_viewport();
            // Re-run the committed search so hits track the new content. An
            // unfinished one was scanning the old document and is superseded.
            if model.search.is_pending() {
                let jump = model.search_jump;
                submit_search(&mut model, jump);
            } else if !model.search.highlight().is_empty() {
                submit_search(&mut model, false);
            }
        }
        Message::FileLoaded(Err(err)) => {
            if model.load_state == LoadState::Ready {
                tracing::warn!(path = %model.file_path.display(), "reload failed: {err}");
            } else {
                tracing::error!(path = %model.file_path.display(), "load failed: {err}");
                model.load_state = LoadState::Failed(err);
            }
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            let (text_width, text_height) = model.text_area();
            model.viewport = model.viewport.resize(text_width, text_height);
            model.refit_viewport();
        }
        Message::Redraw => {}

        // Application
        Message::Quit => model.should_quit = true,
    }

    model
}

/// Start a search for the current query, superseding any in flight.
///
/// An empty query is resolved immediately with no hits.
fn submit_search(model: &mut Model, jump_to_first: bool) {
    let search = std::mem::take(&mut model.search).begin_commit();
    if search.query().is_empty() {
        model.search = search.with_hits(Vec::new());
        return;
    }
    model.tasks.push(Task::Search {
        generation: search.generation(),
        query: search.query().to_string(),
        document: Arc::clone(&model.document),
        jump_to_first,
    });
    model.search = search;
    model.search_jump = jump_to_first;
}

fn jump_to_current_hit(model: &mut Model) {
    if let Some(line) = model.search.current_hit() {
        model.jump_to_line(line);
    }
}
