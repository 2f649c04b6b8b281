//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File loading and searching run as [`Task`]s on worker threads; their
//! results come back as messages.

mod effects;
mod event_loop;
mod input;
mod model;
mod tasks;
mod update;

pub use input::{KeyBinding, KeyMap, handle_event};
pub use model::{LoadState, Mode, Model};
pub use tasks::{Task, TaskRunner, load_file};
pub use update::{Message, update};

use std::path::PathBuf;

use ratatui::Frame;

use crate::config::Config;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    config: Config,
    watch_enabled: bool,
}

impl App {
    /// Create a new application for the given file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            config: Config::default(),
            watch_enabled: false,
        }
    }

    /// Use these settings instead of the defaults.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable file watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Draw one frame of `model`.
    pub fn view(model: &Model, frame: &mut Frame) {
        let layout = crate::ui::compose(model);
        crate::ui::render(&layout, &model.config.theme, frame);
    }
}

#[cfg(test)]
mod tests;
