// Error types for the context and watch subsystems
//
// Everything here is recoverable locally except `WatchStream`, which ends
// the watcher worker but never the process.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuillError {
    /// A tracked file could not be read (missing, permissions, not UTF-8)
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be registered for change notifications
    #[error("Failed to watch {}: {source}", path.display())]
    WatchRegistration {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The notification channel disconnected; live updates have stopped
    #[error("File watch stream terminated")]
    WatchStream,

    /// The platform notification primitive could not be created
    #[error("Failed to start file watcher: {0}")]
    WatcherInit(#[source] notify::Error),

    /// The watch worker thread could not be spawned
    #[error("Failed to spawn watch worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// One entry of a directory traversal failed
    #[error("Failed to traverse {}: {source}", path.display())]
    Collect {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, QuillError>;

/// Read a file fully as UTF-8 text.
///
/// Invalid UTF-8 surfaces as an `InvalidData` read failure.
pub fn read_text(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| QuillError::Read {
        path: path.to_path_buf(),
        source,
    })
}
