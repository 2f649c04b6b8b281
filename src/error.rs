//! Error types for the viewer core.
//!
//! File loading failures are surfaced to the user as a terminal error state.
//! Index errors indicate a clamping bug and should never be observed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the document and loading layers.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The file could not be opened or read.
    #[error("Failed to read {}: {source}", path.display())]
    FileLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A 1-based line lookup fell outside the document.
    #[error("Line {line} out of range (document has {line_count} lines)")]
    OutOfRange { line: usize, line_count: usize },
}

impl ViewerError {
    /// Create a `FileLoad` error for `path`.
    pub fn file_load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileLoad {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
