// Quill - prompt assembly with live file context
// Library exports

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod watch;

pub use context::{ContextStore, DirectoryCollector, TrackedFile};
pub use errors::QuillError;
pub use prompt::{render, TaskType};
pub use session::{AppEvent, Session, SessionOptions};
pub use watch::{FileWatcher, WatchMatch};
