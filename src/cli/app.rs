// UI loop
//
// The single consumer of `AppEvent`s. All rendering and all display writes
// happen here, whether triggered by typed input or by the file watcher.

use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use super::clipboard::PromptClipboard;
use super::commands::{format_help, Command, Input};
use super::display::PromptDisplay;
use crate::prompt::TaskType;
use crate::session::{AppEvent, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<D: PromptDisplay> {
    session: Session,
    display: D,
    events: UnboundedReceiver<AppEvent>,
    clipboard: PromptClipboard,
}

impl<D: PromptDisplay> App<D> {
    pub fn new(session: Session, display: D, events: UnboundedReceiver<AppEvent>) -> Self {
        Self {
            session,
            display,
            events,
            clipboard: PromptClipboard::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Process events until input closes or the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.refresh();

        while let Some(event) = self.events.recv().await {
            if self.handle_event(event) == Flow::Quit {
                break;
            }
        }

        self.session.shutdown();
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Input(line) => self.handle_input(&line),
            AppEvent::Eof => Flow::Quit,
            AppEvent::ContextChanged { files } => {
                debug!(files = ?files, "Context changed on disk");
                self.display.notice(&format!("Reloaded {}", files.join(", ")));
                self.refresh();
                Flow::Continue
            }
        }
    }

    pub fn handle_input(&mut self, line: &str) -> Flow {
        match Input::parse(line) {
            Input::Empty => Flow::Continue,
            Input::Text(text) => {
                self.session.append_instruction(&text);
                self.refresh();
                Flow::Continue
            }
            Input::Command(command) => self.handle_command(command),
        }
    }

    /// Add paths and report what happened.
    pub fn drop_paths(&mut self, paths: &[PathBuf]) {
        if paths.is_empty() {
            return;
        }

        let report = self.session.drop_paths(paths);
        for (path, error) in &report.failed {
            self.display
                .notice(&format!("Skipped {}: {}", path.display(), error));
        }
        if report.added.is_empty() {
            self.display.notice("No files added");
        } else {
            self.display
                .notice(&format!("Added {} file(s)", report.added.len()));
            self.refresh();
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Add(paths) => {
                if paths.is_empty() {
                    self.display.notice("Usage: /add <path>...");
                } else {
                    self.drop_paths(&paths);
                }
            }
            Command::Remove(arg) => self.remove(&arg),
            Command::List => self.list(),
            Command::Task(name) => self.set_task(&name),
            Command::Instruct(text) => {
                self.session.set_instruction(text);
                self.refresh();
            }
            Command::Clear => {
                self.session.set_instruction(String::new());
                self.refresh();
            }
            Command::Show => {
                let prompt = self.session.render();
                self.display.show_prompt(&prompt);
            }
            Command::Copy => {
                let prompt = self.session.render();
                match self.clipboard.copy(&prompt) {
                    Ok(()) => self.display.notice(&format!(
                        "Copied {} chars to clipboard",
                        prompt.chars().count()
                    )),
                    Err(e) => self.display.notice(&format!("{:#}", e)),
                }
            }
            Command::Watch => self.watch_status(),
            Command::Help => self.display.notice(&format_help()),
            Command::Quit => return Flow::Quit,
            Command::Unknown(name) => self.display.notice(&format!(
                "Unknown command: {}. Type /help for commands.",
                name
            )),
        }
        Flow::Continue
    }

    fn remove(&mut self, arg: &str) {
        let Ok(position) = arg.parse::<usize>() else {
            self.display.notice("Usage: /remove <n> (see /list)");
            return;
        };

        match position
            .checked_sub(1)
            .and_then(|index| self.session.remove_at(index))
        {
            Some(file) => {
                self.display.notice(&format!("Removed {}", file.file_name));
                self.refresh();
            }
            None => self
                .display
                .notice(&format!("No file numbered {}", position)),
        }
    }

    fn list(&mut self) {
        let files = self.session.tracked();
        if files.is_empty() {
            self.display
                .notice("No files tracked. Use /add <path> to add some.");
            return;
        }

        let lines: Vec<String> = files
            .iter()
            .enumerate()
            .map(|(i, f)| {
                format!(
                    "{:>3}. {}  ({}, updated {})",
                    i + 1,
                    f.file_name,
                    f.path.display(),
                    f.updated_at.with_timezone(&Local).format("%H:%M:%S")
                )
            })
            .collect();
        self.display.notice(&lines.join("\n"));
    }

    fn set_task(&mut self, name: &str) {
        if name.is_empty() {
            let options: Vec<&str> = TaskType::ALL.iter().map(TaskType::as_str).collect();
            self.display.notice(&format!(
                "Task: {} (options: {})",
                self.session.task(),
                options.join(", ")
            ));
            return;
        }

        let task = match TaskType::try_parse(name) {
            Some(task) => task,
            None => {
                self.display
                    .notice(&format!("Unknown task type '{}', using Feature", name));
                TaskType::Feature
            }
        };
        self.session.set_task(task);
        self.refresh();
    }

    fn watch_status(&mut self) {
        if !self.session.is_watching() {
            self.display.notice("File watching is off");
            return;
        }

        let dirs = self.session.watched_dirs();
        if dirs.is_empty() {
            self.display.notice("Watching nothing yet");
        } else {
            let lines: Vec<String> = dirs
                .iter()
                .map(|d| format!("  {}", d.display()))
                .collect();
            self.display
                .notice(&format!("Watching:\n{}", lines.join("\n")));
        }
    }

    /// Re-render and hand the result to the display.
    fn refresh(&mut self) {
        let prompt = self.session.render();
        self.display
            .prompt_updated(&prompt, self.session.file_count());
    }
}
