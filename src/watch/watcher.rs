// Notify-based file watcher
//
// Parent directories of tracked files are watched non-recursively. A single
// dedicated worker thread blocks on the notification channel, reloads
// modified files into the store, and posts one `ContextChanged` per batch to
// the UI event queue. The worker never touches the display.
//
// The notify callback holds the only sender, so dropping the watcher
// disconnects the channel and ends the worker. A disconnect without a
// prior `stop()` means the notification stream died.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::context::{base_name, lock_store, SharedStore};
use crate::errors::{read_text, QuillError, Result};
use crate::session::AppEvent;

/// How a modified path is matched against tracked entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WatchMatch {
    /// Full path equality
    #[default]
    Path,
    /// Base name only; same-named files in different directories cross-update
    Name,
}

/// Owns the notification primitive and the worker thread.
pub struct FileWatcher {
    watcher: Option<RecommendedWatcher>,
    stopping: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    watched: HashSet<PathBuf>,
}

impl FileWatcher {
    /// Create the notification primitive and start the worker.
    pub fn start(
        store: SharedStore,
        events: UnboundedSender<AppEvent>,
        match_mode: WatchMatch,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Receiver gone means the worker already exited
            let _ = tx.send(res);
        })
        .map_err(QuillError::WatcherInit)?;

        let stopping = Arc::new(AtomicBool::new(false));
        let worker = WatchWorker {
            rx,
            store,
            events,
            match_mode,
            stopping: Arc::clone(&stopping),
        };
        let handle = thread::Builder::new()
            .name("quill-watch".to_string())
            .spawn(move || worker.run())
            .map_err(QuillError::WorkerSpawn)?;

        info!(match_mode = ?match_mode, "File watcher started");

        Ok(Self {
            watcher: Some(watcher),
            stopping,
            worker: Some(handle),
            watched: HashSet::new(),
        })
    }

    /// Watch the directory containing `file_path`.
    ///
    /// Returns `Ok(false)` when that directory is already registered.
    pub fn subscribe(&mut self, file_path: &Path) -> Result<bool> {
        let dir = watch_dir_for(file_path);
        if self.watched.contains(&dir) {
            return Ok(false);
        }

        let Some(watcher) = self.watcher.as_mut() else {
            return Err(QuillError::WatchStream);
        };

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| QuillError::WatchRegistration {
                path: dir.clone(),
                source,
            })?;

        debug!(dir = %dir.display(), "Watching directory");
        self.watched.insert(dir);
        Ok(true)
    }

    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self.watched.iter().cloned().collect();
        dirs.sort();
        dirs
    }

    /// False once the worker has exited, whether stopped or because the
    /// notification stream ended.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Tear down the notification primitive and join the worker.
    pub fn stop(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };

        self.stopping.store(true, Ordering::SeqCst);
        // Dropping the watcher drops the callback's sender
        self.watcher.take();

        if handle.join().is_err() {
            error!("File watch worker panicked");
        }
        info!("File watcher stopped");
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Directory to register for a tracked file, canonicalized when possible so
/// event paths line up with canonical tracked paths.
fn watch_dir_for(file_path: &Path) -> PathBuf {
    let parent = match file_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf())
}

struct WatchWorker {
    rx: mpsc::Receiver<notify::Result<Event>>,
    store: SharedStore,
    events: UnboundedSender<AppEvent>,
    match_mode: WatchMatch,
    stopping: Arc<AtomicBool>,
}

impl WatchWorker {
    fn run(self) {
        debug!("File watch worker running");

        loop {
            let Ok(first) = self.rx.recv() else {
                if self.stopping.load(Ordering::SeqCst) {
                    debug!("File watch worker stopping");
                } else {
                    error!("{}; live file updates have stopped", QuillError::WatchStream);
                }
                return;
            };

            let mut changed: Vec<String> = Vec::new();

            for res in std::iter::once(first).chain(self.rx.try_iter()) {
                match res {
                    Ok(event) => self.handle_event(event, &mut changed),
                    Err(e) => warn!("File watch error: {}", e),
                }
            }

            if !changed.is_empty()
                && self
                    .events
                    .send(AppEvent::ContextChanged { files: changed })
                    .is_err()
            {
                debug!("Event queue closed, watch worker exiting");
                return;
            }
        }
    }

    fn handle_event(&self, event: Event, changed: &mut Vec<String>) {
        if !matches!(event.kind, EventKind::Modify(_)) {
            return;
        }

        for path in &event.paths {
            if let Some(name) = self.reload(path) {
                if !changed.contains(&name) {
                    changed.push(name);
                }
            }
        }
    }

    /// Re-read `path` and apply it to every matching entry. Returns the base
    /// name when something changed.
    fn reload(&self, path: &Path) -> Option<String> {
        let name = base_name(path);

        let tracked = {
            let store = lock_store(&self.store);
            match self.match_mode {
                WatchMatch::Path => store.is_tracked_path(path),
                WatchMatch::Name => store.is_tracked_name(&name),
            }
        };
        if !tracked {
            return None;
        }

        let content = match read_text(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("{}; keeping previous content", e);
                return None;
            }
        };

        let updated = {
            let mut store = lock_store(&self.store);
            match self.match_mode {
                WatchMatch::Path => store.update_by_path(path, &content),
                WatchMatch::Name => store.update_all_by_name(&name, &content),
            }
        };

        if updated == 0 {
            return None;
        }
        debug!(path = %path.display(), entries = updated, "Reloaded tracked file");
        Some(name)
    }
}
