// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. search::SearchState)
    clippy::module_name_repetitions
)]

//! # Glance
//!
//! A terminal text file viewer with incremental search.
//!
//! Glance shows a file in the terminal with:
//! - A line-number gutter and scrollbar
//! - Case-insensitive search with hit navigation and highlighting
//! - Optional word wrap
//! - File watching for live reload
//!
//! ## Architecture
//!
//! Glance uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Compose a frame layout, then render it
//!
//! ## Modules
//!
//! - [`app`]: Main application loop, state and background tasks
//! - [`config`]: JSON configuration and CLI overrides
//! - [`document`]: Loaded text and its line index
//! - [`error`]: Error types for the core
//! - [`search`]: Search functionality
//! - [`ui`]: Viewport, layout composition and rendering
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod search;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::config::Config;
    pub use crate::document::Document;
    pub use crate::error::ViewerError;
    pub use crate::search::SearchState;
    pub use crate::ui::viewport::Viewport;
}
