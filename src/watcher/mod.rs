//! File watching for live reload.
//!
//! Uses notify crate for cross-platform file system events. The parent
//! directory is watched so editors that save by renaming a temporary file
//! are still noticed. Relevant events are coalesced on a debounce thread,
//! which reports each quiet-after-burst change through a callback.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a single file while alive.
///
/// Dropping it stops the notify backend, which closes the event channel and
/// ends the debounce thread.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    target: WatchTarget,
    _debouncer: JoinHandle<()>,
}

impl FileWatcher {
    /// Watch `path` and call `on_change` once per burst of changes, after
    /// `debounce` without further events.
    ///
    /// `on_change` returns whether to keep watching; returning `false` stops
    /// the debounce thread.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn spawn<F>(
        path: impl AsRef<Path>,
        debounce: Duration,
        on_change: F,
    ) -> notify::Result<Self>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let target = WatchTarget::new(path.as_ref());
        let (tx, rx) = mpsc::channel();
        let filter = target.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if filter.matches(&event) => {
                let _ = tx.send(());
            }
            Ok(event) => {
                tracing::trace!(kind = ?event.kind, paths = ?event.paths, "ignoring watch event");
            }
            Err(err) => tracing::warn!("watch error: {err}"),
        })?;
        watcher.watch(&target.root, RecursiveMode::NonRecursive)?;

        let debouncer = std::thread::spawn(move || debounce_loop(&rx, debounce, on_change));
        Ok(Self {
            _watcher: watcher,
            target,
            _debouncer: debouncer,
        })
    }

    /// The canonical path of the file being watched.
    pub fn target_path(&self) -> &Path {
        &self.target.path
    }
}

/// Wait for a change, then for `debounce` of silence, then report it.
fn debounce_loop<F>(rx: &Receiver<()>, debounce: Duration, mut on_change: F)
where
    F: FnMut() -> bool,
{
    while rx.recv().is_ok() {
        loop {
            match rx.recv_timeout(debounce) {
                Ok(()) => {}
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
        tracing::debug!("file change settled");
        if !on_change() {
            return;
        }
    }
}

/// The watched file and the directory holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WatchTarget {
    root: PathBuf,
    path: PathBuf,
    name: Option<OsString>,
}

impl WatchTarget {
    fn new(path: &Path) -> Self {
        // Event paths from the OS are canonical; match them against ours.
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self { root, path, name }
    }

    /// Whether `event` may have changed the file's contents.
    ///
    /// Directory-level events count: some backends report a rename into
    /// place only against the directory.
    fn matches(&self, event: &Event) -> bool {
        event.paths.iter().any(|p| {
            p == &self.root
                || p == &self.path
                || self
                    .name
                    .as_deref()
                    .is_some_and(|name| p.file_name() == Some(name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use std::time::Instant;
    use tempfile::tempdir;

    fn event_for(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    fn target_in(dir: &Path) -> WatchTarget {
        let path = dir.join("server.log");
        std::fs::write(&path, "boot").unwrap();
        WatchTarget::new(&path)
    }

    #[test]
    fn test_directory_level_event_matches() {
        let dir = tempdir().unwrap();
        let canonical_dir = dir.path().canonicalize().unwrap();
        let target = target_in(&canonical_dir);
        assert!(target.matches(&event_for(vec![canonical_dir])));
    }

    #[test]
    fn test_sibling_file_event_is_ignored() {
        let dir = tempdir().unwrap();
        let canonical_dir = dir.path().canonicalize().unwrap();
        let target = target_in(&canonical_dir);
        assert!(!target.matches(&event_for(vec![canonical_dir.join("other.log")])));
        assert!(target.matches(&event_for(vec![canonical_dir.join("server.log")])));
    }

    #[test]
    fn test_relative_file_watches_current_directory() {
        let target = WatchTarget::new(Path::new("definitely-missing-notes.txt"));
        assert_eq!(target.root, PathBuf::from("."));
    }

    #[test]
    fn test_burst_is_reported_once() {
        let (tx, rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            debounce_loop(&rx, Duration::from_millis(30), move || {
                done_tx.send(()).is_ok()
            });
        });
        for _ in 0..5 {
            tx.send(()).unwrap();
        }
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(done_rx.recv_timeout(Duration::from_millis(100)).is_err());

        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_debounce_stops_when_callback_declines() {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            debounce_loop(&rx, Duration::from_millis(10), || false);
        });
        tx.send(()).unwrap();
        // The loop returns after the first report even though tx stays open.
        handle.join().unwrap();
        drop(tx);
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap().join("watched.txt");
        std::fs::write(&path, "original").unwrap();

        let (tx, rx) = mpsc::channel();
        let _watcher = FileWatcher::spawn(&path, Duration::from_millis(50), move || {
            tx.send(()).is_ok()
        })
        .unwrap();

        // Give the backend time to register the watch
        std::thread::sleep(Duration::from_millis(500));
        let started = Instant::now();
        std::fs::write(&path, "modified").unwrap();

        assert!(
            rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "watcher should detect modification within 5 seconds"
        );
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
