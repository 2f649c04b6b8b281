//! Search functionality.
//!
//! Provides text search within documents with:
//! - Case-insensitive substring matching
//! - One hit per matching line, in document order
//! - Next/previous navigation with wraparound
//! - Match highlighting spans

mod matcher;
mod state;

pub use matcher::{contains_ignore_case, find_hits, highlight_spans};
pub use state::SearchState;
