// Recursive file collection for dropped directories
//
// Depth-first, no depth limit, no ignore files. Entries that fail (usually
// permission errors) are logged and skipped so siblings still get collected.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::QuillError;

/// Enumerates regular files beneath a root path.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCollector {
    follow_symlinks: bool,
}

impl DirectoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symlinked directories while descending.
    ///
    /// walkdir reports symlink loops as entry errors, which are skipped.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Every regular file reachable from `root`, in filesystem-listing order.
    ///
    /// A file root yields itself. A missing root yields nothing.
    pub fn collect(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    let err = QuillError::Collect { path, source };
                    warn!("{}", err);
                    continue;
                }
            };

            if is_regular_file(&entry) {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), count = files.len(), "Collected files");
        files
    }
}

/// Regular files, including symlinks that resolve to one when not following.
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
