// Filesystem watching for tracked files

mod watcher;

pub use watcher::{FileWatcher, WatchMatch};
