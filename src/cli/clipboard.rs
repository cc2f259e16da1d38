// System clipboard access via arboard

use anyhow::{Context, Result};

/// Lazily opened clipboard handle.
///
/// On X11/Wayland the copied text is served by this process, so the handle
/// is kept for the lifetime of the REPL rather than reopened per copy.
#[derive(Default)]
pub struct PromptClipboard {
    inner: Option<arboard::Clipboard>,
}

impl PromptClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("Clipboard unavailable")?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_string())
            .context("Failed to copy prompt to clipboard")?;
        Ok(())
    }
}
