// Session: the explicitly constructed application root
// Public interface for the UI loop and the watcher

mod events;
#[allow(clippy::module_inception)]
mod session;

pub use events::AppEvent;
pub use session::{DropReport, Session, SessionOptions};
