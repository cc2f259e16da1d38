// Events consumed by the UI loop
//
// Everything that should end in a display update goes through this queue,
// so only the UI loop ever renders or writes to the terminal.

/// A message on the UI event queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A line typed at the prompt
    Input(String),
    /// Input closed (Ctrl-D / Ctrl-C)
    Eof,
    /// The watcher reloaded these tracked files (base names)
    ContextChanged { files: Vec<String> },
}
