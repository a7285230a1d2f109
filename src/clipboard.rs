//! Copying snippet code to the system clipboard.

use anyhow::{Context, Result};
use std::fmt;

/// Something that accepts copied text. The UI talks to this instead of the
/// platform clipboard directly.
pub trait ClipboardSink: fmt::Debug {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard, opened lazily on first copy and kept alive
/// afterwards (X11/Wayland drop the selection when the owner goes away).
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().context("Failed to open system clipboard")?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .context("System clipboard is not available")
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text.to_owned())
            .context("Failed to write to clipboard")?;
        tracing::info!(bytes = text.len(), "copied snippet to clipboard");
        Ok(())
    }
}

/// One-shot copy for short-lived processes such as the CLI.
///
/// On Linux the call blocks until another application has taken the
/// selection, otherwise the contents would vanish when the process exits.
pub fn copy_and_wait(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to open system clipboard")?;

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait()
            .text(text.to_owned())
            .context("Failed to write to clipboard")?;
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    {
        clipboard
            .set_text(text.to_owned())
            .context("Failed to write to clipboard")?;
    }

    tracing::info!(bytes = text.len(), "copied snippet to clipboard");
    Ok(())
}

/// Keeps copied text in memory; used by tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Vec<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        self.contents.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_records_copies() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.copy_text("git rebase -i").unwrap();
        clipboard.copy_text("arr.sort()").unwrap();
        assert_eq!(clipboard.contents, vec!["git rebase -i", "arr.sort()"]);
    }
}
