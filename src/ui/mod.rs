//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`layout`]: Pure composition of a frame from the model
//! - [`scrollbar`] and [`status`]: Derived scrollbar and status row
//! - [`style`]: Theming and colors

pub mod layout;
pub mod scrollbar;
pub mod status;
pub mod style;
pub mod viewport;

mod render;

pub use layout::{Body, FrameLayout, RowLayout, compose, gutter_width};
pub use render::render;
