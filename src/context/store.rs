// Ordered registry of tracked files and their current contents

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Store handle shared between the UI loop and the watch worker.
pub type SharedStore = Arc<Mutex<ContextStore>>;

/// Lock a shared store. A panic elsewhere while holding the lock leaves the
/// list itself intact, so poisoning is ignored.
pub fn lock_store(store: &Mutex<ContextStore>) -> MutexGuard<'_, ContextStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One file currently contributing to the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedFile {
    /// Base name, shown in listings and in the rendered `File:` line
    pub file_name: String,
    /// Full path as resolved when the file was added
    pub path: PathBuf,
    /// Text at the last successful read
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl TrackedFile {
    pub fn new(file_name: impl Into<String>, path: PathBuf, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            path,
            content: content.into(),
            updated_at: Utc::now(),
        }
    }

    fn replace_content(&mut self, content: &str) {
        self.content.clear();
        self.content.push_str(content);
        self.updated_at = Utc::now();
    }
}

/// Insertion-ordered list of tracked files.
///
/// Names are not unique: the same base name from two directories gives two
/// entries. Share it across threads as `Arc<Mutex<ContextStore>>`.
#[derive(Debug, Default)]
pub struct ContextStore {
    files: Vec<TrackedFile>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry by name only. Its path is the bare name, so in
    /// path-matching mode the watcher never reloads it. Use `add_file` for
    /// files on disk.
    pub fn add(&mut self, file_name: impl Into<String>, content: impl Into<String>) {
        let file_name = file_name.into();
        let path = PathBuf::from(&file_name);
        self.files.push(TrackedFile::new(file_name, path, content));
    }

    /// Append an entry for a file on disk, named after its base name.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let file_name = base_name(&path);
        self.files.push(TrackedFile::new(file_name, path, content));
    }

    /// Remove the entry at `index`. Out of range is a no-op returning `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<TrackedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Replace the content of the first entry named `file_name`.
    pub fn update_by_name(&mut self, file_name: &str, content: &str) -> bool {
        match self.files.iter_mut().find(|f| f.file_name == file_name) {
            Some(file) => {
                file.replace_content(content);
                true
            }
            None => false,
        }
    }

    /// Replace the content of every entry named `file_name`.
    pub fn update_all_by_name(&mut self, file_name: &str, content: &str) -> usize {
        let mut updated = 0;
        for file in self.files.iter_mut().filter(|f| f.file_name == file_name) {
            file.replace_content(content);
            updated += 1;
        }
        updated
    }

    /// Replace the content of every entry whose path is `path`.
    pub fn update_by_path(&mut self, path: &Path, content: &str) -> usize {
        let mut updated = 0;
        for file in self.files.iter_mut().filter(|f| f.path == path) {
            file.replace_content(content);
            updated += 1;
        }
        updated
    }

    pub fn is_tracked_path(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    pub fn is_tracked_name(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| f.file_name == file_name)
    }

    /// Owned copy of the ordered `(file_name, content)` pairs.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.files
            .iter()
            .map(|f| (f.file_name.clone(), f.content.clone()))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TrackedFile> {
        self.files.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TrackedFile> {
        self.files.get(index)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Final path component as a string, or the whole path when there is none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
