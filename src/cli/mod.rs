// CLI module
// Public interface for the terminal shell

mod app;
mod args;
mod clipboard;
mod commands;
mod display;
mod input;

pub use app::{App, Flow};
pub use args::Args;
pub use clipboard::PromptClipboard;
pub use commands::{format_help, Command, Input};
pub use display::{PromptDisplay, RecordingDisplay, TerminalDisplay};
pub use input::spawn_input_worker;
