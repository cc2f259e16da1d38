// Application root: store, collector, watcher and current prompt inputs
//
// The session is constructed explicitly and owns the watcher's lifecycle.
// Dropping a path adds its files to the store and subscribes their parent
// directories; rendering snapshots the store under the lock and formats
// outside it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::events::AppEvent;
use crate::context::{lock_store, ContextStore, DirectoryCollector, SharedStore, TrackedFile};
use crate::errors::{read_text, QuillError};
use crate::prompt::{render, TaskType};
use crate::watch::{FileWatcher, WatchMatch};

/// Construction options for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub task: TaskType,
    pub instruction: String,
    pub watch: bool,
    pub match_by: WatchMatch,
    pub follow_symlinks: bool,
}

/// Outcome of dropping one or more paths.
#[derive(Debug, Default)]
pub struct DropReport {
    /// Base names added, in order
    pub added: Vec<String>,
    /// Files that could not be read
    pub failed: Vec<(PathBuf, String)>,
}

impl DropReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.failed.is_empty()
    }
}

pub struct Session {
    store: SharedStore,
    task: TaskType,
    instruction: String,
    collector: DirectoryCollector,
    watcher: Option<FileWatcher>,
}

impl Session {
    /// Build a session. When watching is requested but the watcher cannot
    /// start, the session continues without live updates.
    pub fn new(options: SessionOptions, events: UnboundedSender<AppEvent>) -> Self {
        let store: SharedStore = Arc::new(Mutex::new(ContextStore::new()));

        let watcher = if options.watch {
            match FileWatcher::start(Arc::clone(&store), events, options.match_by) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!("{}; continuing without live updates", e);
                    None
                }
            }
        } else {
            debug!("File watching disabled");
            None
        };

        Self {
            store,
            task: options.task,
            instruction: options.instruction,
            collector: DirectoryCollector::new().follow_symlinks(options.follow_symlinks),
            watcher,
        }
    }

    /// Add every path: directories are expanded recursively, files added
    /// directly. Unreadable files are reported and skipped.
    pub fn drop_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> DropReport {
        let mut report = DropReport::default();

        for root in paths {
            let root = root.as_ref();
            let files = if root.is_dir() {
                self.collector.collect(root)
            } else {
                vec![root.to_path_buf()]
            };

            for file in files {
                match self.add_path(&file) {
                    Ok(name) => report.added.push(name),
                    Err(e) => {
                        warn!("{}", e);
                        report.failed.push((file, e.to_string()));
                    }
                }
            }
        }

        info!(
            added = report.added.len(),
            failed = report.failed.len(),
            "Dropped paths"
        );
        report
    }

    /// Read one file into the store and subscribe its directory.
    ///
    /// Nothing is added when the read fails. A watch registration failure
    /// is logged; the file stays tracked without live updates.
    pub fn add_path(&mut self, path: &Path) -> Result<String, QuillError> {
        let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let content = read_text(&path)?;

        let name = {
            let mut store = lock_store(&self.store);
            store.add_file(path.clone(), content);
            store
                .entries()
                .last()
                .map(|f| f.file_name.clone())
                .unwrap_or_default()
        };

        if let Some(watcher) = self.watcher.as_mut() {
            if let Err(e) = watcher.subscribe(&path) {
                warn!("{}; {} will not receive live updates", e, name);
            }
        }

        debug!(path = %path.display(), "Tracking file");
        Ok(name)
    }

    /// Remove the entry at `index` (0-based). Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<TrackedFile> {
        lock_store(&self.store).remove_at(index)
    }

    pub fn task(&self) -> TaskType {
        self.task
    }

    pub fn set_task(&mut self, task: TaskType) {
        self.task = task;
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    /// Append a line to the instruction text.
    pub fn append_instruction(&mut self, line: &str) {
        if !self.instruction.is_empty() {
            self.instruction.push('\n');
        }
        self.instruction.push_str(line);
    }

    /// Render the prompt from the current state.
    pub fn render(&self) -> String {
        let files = lock_store(&self.store).snapshot();
        render(self.task, &self.instruction, &files)
    }

    /// Tracked files, cloned for listing.
    pub fn tracked(&self) -> Vec<TrackedFile> {
        lock_store(&self.store).entries().cloned().collect()
    }

    pub fn file_count(&self) -> usize {
        lock_store(&self.store).len()
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(FileWatcher::is_running)
    }

    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        self.watcher
            .as_ref()
            .map(FileWatcher::watched_dirs)
            .unwrap_or_default()
    }

    /// Stop watching. Tracked state is kept.
    pub fn shutdown(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session(watch: bool) -> Session {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        Session::new(
            SessionOptions {
                watch,
                ..Default::default()
            },
            tx,
        )
    }

    #[test]
    fn test_drop_file_and_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("pkg")).unwrap();
        fs::write(tmp.path().join("pkg/inner.rs"), "inner").unwrap();
        fs::write(tmp.path().join("single.rs"), "single").unwrap();

        let mut s = session(false);
        let report = s.drop_paths(&[tmp.path().join("single.rs"), tmp.path().join("pkg")]);

        assert_eq!(report.added, vec!["single.rs", "inner.rs"]);
        assert!(report.failed.is_empty());
        assert_eq!(s.file_count(), 2);
    }

    #[test]
    fn test_unreadable_file_not_added() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.bin"), [0xc3, 0x28]).unwrap();
        fs::write(tmp.path().join("good.txt"), "ok").unwrap();

        let mut s = session(false);
        let report = s.drop_paths(&[tmp.path().join("bad.bin"), tmp.path().join("good.txt")]);

        assert_eq!(report.added, vec!["good.txt"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(s.file_count(), 1);
    }

    #[test]
    fn test_missing_path_reported() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(false);
        let report = s.drop_paths(&[tmp.path().join("nope.txt")]);
        assert!(report.added.is_empty());
        assert_eq!(report.failed.len(), 1);
    }

    #[test]
    fn test_append_instruction_joins_lines() {
        let mut s = session(false);
        s.append_instruction("first");
        s.append_instruction("second");
        assert_eq!(s.instruction(), "first\nsecond");
    }

    #[test]
    fn test_render_reflects_removal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "A").unwrap();
        fs::write(tmp.path().join("b.txt"), "B").unwrap();

        let mut s = session(false);
        s.drop_paths(&[tmp.path().join("a.txt"), tmp.path().join("b.txt")]);
        assert!(s.remove_at(0).is_some());
        assert!(s.remove_at(5).is_none());

        let prompt = s.render();
        assert!(!prompt.contains("File: a.txt"));
        assert!(prompt.contains("File: b.txt\n```\nB```\n\n"));
    }

    #[test]
    fn test_watching_subscribes_parent_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "A").unwrap();
        fs::write(tmp.path().join("b.txt"), "B").unwrap();

        let mut s = session(true);
        s.drop_paths(&[tmp.path()]);

        assert!(s.is_watching());
        assert_eq!(s.watched_dirs(), vec![fs::canonicalize(tmp.path()).unwrap()]);
        s.shutdown();
        assert!(!s.is_watching());
    }
}
