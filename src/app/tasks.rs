//! Background work: file loading and searching.
//!
//! Tasks run on worker threads and report back by sending a [`Message`]
//! into the event loop's channel. Workers never touch the [`Model`]; all
//! state changes happen when the event loop applies the completion message.
//!
//! [`Model`]: crate::app::Model

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::app::Message;
use crate::document::{Document, document_from_bytes};
use crate::error::{Result, ViewerError};
use crate::search::find_hits;

/// A unit of background work requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Read and index the file at this path
    Load(PathBuf),
    /// Scan `document` for `query`, tagged with the commit generation
    Search {
        generation: u64,
        query: String,
        document: Arc<Document>,
        jump_to_first: bool,
    },
}

impl Task {
    /// Perform the task on the current thread and build its completion.
    pub fn run(self) -> Message {
        match self {
            Self::Load(path) => {
                let result = load_file(&path)
                    .map(Arc::new)
                    .map_err(|err| err.to_string());
                Message::FileLoaded(result)
            }
            Self::Search {
                generation,
                query,
                document,
                jump_to_first,
            } => Message::SearchCompleted {
                generation,
                hits: find_hits(&document, &query),
                jump_to_first,
            },
        }
    }
}

/// Read a file and build its document.
///
/// # Errors
///
/// Returns [`ViewerError::FileLoad`] if the file cannot be read.
pub fn load_file(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|err| ViewerError::file_load(path, err))?;
    Ok(document_from_bytes(bytes))
}

/// Spawns tasks on worker threads and routes completions to the event loop.
#[derive(Debug, Clone)]
pub struct TaskRunner {
    tx: Sender<Message>,
}

impl TaskRunner {
    pub const fn new(tx: Sender<Message>) -> Self {
        Self { tx }
    }

    /// A sender into the event loop's channel, for other background sources.
    pub fn sender(&self) -> Sender<Message> {
        self.tx.clone()
    }

    /// Run `task` in the background. Its completion arrives on the channel.
    pub fn submit(&self, task: Task) {
        tracing::debug!(task = task_name(&task), "submitting task");
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(task.run());
        });
    }
}

const fn task_name(task: &Task) -> &'static str {
    match task {
        Task::Load(_) => "load",
        Task::Search { .. } => "search",
    }
}
