// Line input worker
//
// Reads lines on a detached OS thread and posts them to the UI queue. The
// thread is not joined: it is usually blocked in readline when the app
// quits, and process exit ends it.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::session::AppEvent;

const PROMPT: &str = "quill> ";

pub fn spawn_input_worker(events: UnboundedSender<AppEvent>) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("quill-input".to_string())
        .spawn(move || read_lines(events))?;
    Ok(())
}

fn read_lines(events: UnboundedSender<AppEvent>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            warn!("Failed to open line editor: {}", e);
            let _ = events.send(AppEvent::Eof);
            return;
        }
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if events.send(AppEvent::Input(line)).is_err() {
                    return;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                let _ = events.send(AppEvent::Eof);
                return;
            }
            Err(e) => {
                warn!("Input error: {}", e);
                let _ = events.send(AppEvent::Eof);
                return;
            }
        }
    }
}
