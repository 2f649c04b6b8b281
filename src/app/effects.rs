use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::app::tasks::TaskRunner;
use crate::app::{Message, Model};
use crate::watcher::FileWatcher;

/// Debounce applied to bursts of file system events.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Start every task queued by `update` on the runner.
pub(super) fn dispatch_tasks(model: &mut Model, runner: &TaskRunner) {
    for task in model.take_tasks() {
        runner.submit(task);
    }
}

/// Create the watcher when watching is enabled, disabling it on failure.
///
/// Settled changes are sent to the runner's channel as
/// [`Message::FileChanged`].
pub(super) fn make_file_watcher(model: &mut Model, runner: &TaskRunner) -> Option<FileWatcher> {
    if !model.watch_enabled {
        return None;
    }
    match watch(&model.file_path, runner.sender()) {
        Ok(watcher) => {
            tracing::info!(path = %watcher.target_path().display(), "watching for changes");
            Some(watcher)
        }
        Err(err) => {
            tracing::warn!(path = %model.file_path.display(), "watch unavailable: {err}");
            model.watch_enabled = false;
            None
        }
    }
}

fn watch(path: &Path, tx: Sender<Message>) -> notify::Result<FileWatcher> {
    FileWatcher::spawn(path, WATCH_DEBOUNCE, move || {
        // A closed channel means the event loop has exited.
        tx.send(Message::FileChanged).is_ok()
    })
}
