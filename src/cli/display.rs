// Display surfaces for the rendered prompt

use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};

/// Where the UI loop sends rendered prompts and status messages.
pub trait PromptDisplay {
    /// The prompt was re-rendered after a state change.
    fn prompt_updated(&mut self, prompt: &str, file_count: usize);

    /// Show the full prompt text.
    fn show_prompt(&mut self, prompt: &str);

    /// A short status or error message.
    fn notice(&mut self, message: &str);
}

/// Prints to stdout, styled when attached to a terminal.
pub struct TerminalDisplay {
    is_interactive: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            is_interactive: io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptDisplay for TerminalDisplay {
    fn prompt_updated(&mut self, prompt: &str, file_count: usize) {
        let line = format!(
            "Prompt updated: {} files, {} chars",
            file_count,
            prompt.chars().count()
        );
        if self.is_interactive {
            println!("{}", line.dark_grey());
        } else {
            println!("{}", line);
        }
    }

    fn show_prompt(&mut self, prompt: &str) {
        let mut stdout = io::stdout().lock();
        if self.is_interactive {
            let _ = writeln!(stdout, "{}", "── Final Prompt ──".cyan().bold());
            let _ = write!(stdout, "{}", prompt);
            let _ = writeln!(stdout, "{}", "──────────────────".cyan().bold());
        } else {
            let _ = write!(stdout, "{}", prompt);
        }
        let _ = stdout.flush();
    }

    fn notice(&mut self, message: &str) {
        if self.is_interactive {
            println!("{}", message.yellow());
        } else {
            println!("{}", message);
        }
    }
}

/// Keeps everything in memory. Used by tests and embedders.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub last_prompt: Option<String>,
    pub shown: Vec<String>,
    pub notices: Vec<String>,
    pub updates: usize,
}

impl PromptDisplay for RecordingDisplay {
    fn prompt_updated(&mut self, prompt: &str, _file_count: usize) {
        self.last_prompt = Some(prompt.to_string());
        self.updates += 1;
    }

    fn show_prompt(&mut self, prompt: &str) {
        self.last_prompt = Some(prompt.to_string());
        self.shown.push(prompt.to_string());
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
