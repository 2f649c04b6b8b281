use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, UiConfig};
use crate::document::Document;
use crate::search::SearchState;
use crate::ui::layout::wrapped_rows;
use crate::ui::viewport::Viewport;

use super::tasks::Task;

/// Input interpretation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Search,
}

/// Progress of loading the viewed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Loading failed; the message is shown instead of content.
    Failed(String),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Path of the viewed file
    pub file_path: PathBuf,
    /// Loaded text, shared read-only with search workers
    pub document: Arc<Document>,
    pub load_state: LoadState,
    pub viewport: Viewport,
    pub search: SearchState,
    pub mode: Mode,
    /// Display settings, theme and keybindings
    pub config: Config,
    /// Full terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Whether the file is watched for changes
    pub watch_enabled: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether the in-flight search should jump to its first hit
    pub(super) search_jump: bool,
    /// Background work requested by the last updates, drained by the event loop
    pub(super) tasks: Vec<Task>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("load_state", &self.load_state)
            .field("viewport", &self.viewport)
            .field("mode", &self.mode)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model that is waiting for `file_path` to load.
    pub fn new(file_path: PathBuf, config: Config, terminal_size: (u16, u16)) -> Self {
        let document = Arc::new(Document::empty());
        let (width, height) = text_area(terminal_size, &config.ui);
        Self {
            viewport: Viewport::new(width, height, document.line_count()),
            document,
            file_path,
            load_state: LoadState::Loading,
            search: SearchState::new(),
            mode: Mode::Normal,
            config,
            terminal_size,
            watch_enabled: false,
            should_quit: false,
            search_jump: false,
            tasks: Vec::new(),
        }
    }

    /// Install an already loaded document.
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.viewport = self.viewport.set_total_lines(document.line_count());
        self.document = Arc::new(document);
        self.load_state = LoadState::Ready;
        self.refit_viewport();
        self
    }

    /// Ask the event loop to (re)load the file.
    pub fn request_load(&mut self) {
        self.tasks.push(Task::Load(self.file_path.clone()));
    }

    /// Take the background tasks queued since the last call.
    pub fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    /// Tasks waiting to be dispatched.
    pub fn pending_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Recompute the scroll limit after the wrap width or content changed.
    pub fn refit_viewport(&mut self) {
        self.viewport = if self.config.editor.word_wrap {
            self.viewport.with_wrapped_rows(wrapped_rows(self))
        } else {
            self.viewport.without_wrapped_rows()
        };
    }

    /// Center `line` on screen, counting wrapped rows when wrapping.
    pub fn jump_to_line(&mut self, line: usize) {
        self.viewport = if self.config.editor.word_wrap {
            self.viewport.jump_to_line_in_rows(line, wrapped_rows(self))
        } else {
            self.viewport.jump_to_line(line)
        };
    }

    /// Text area available for the document: the terminal minus the
    /// scrollbar column and status row when they are shown.
    pub fn text_area(&self) -> (u16, u16) {
        text_area(self.terminal_size, &self.config.ui)
    }
}

fn text_area((width, height): (u16, u16), ui: &UiConfig) -> (u16, u16) {
    (
        width.saturating_sub(u16::from(ui.show_scrollbar)),
        height.saturating_sub(u16::from(ui.show_status)),
    )
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), Config::default(), (80, 24))
    }
}
