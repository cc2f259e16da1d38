// File context tracking
//
// The ordered store of tracked files and the directory collector that
// expands dropped directories into individual files.

pub mod collector;
pub mod store;

pub use collector::DirectoryCollector;
pub use store::{base_name, lock_store, ContextStore, SharedStore, TrackedFile};
