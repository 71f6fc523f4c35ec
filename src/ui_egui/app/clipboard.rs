//! Clipboard access for share links, with a manual-copy fallback.

use anyhow::{Context as _, Result};

#[cfg_attr(test, mockall::automock)]
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard. Opened on first use and kept open, since on X11 the
/// copied text only lives as long as the handle.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new().context("Failed to open the system clipboard")?,
        };
        let handle = self.handle.insert(handle);
        if let Err(err) = handle.set_text(text) {
            // Reopen on the next attempt
            self.handle = None;
            return Err(err).context("Failed to write to the system clipboard");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Copied,
    /// Clipboard unavailable; show the link so it can be copied by hand
    ManualCopy(String),
}

pub fn copy_share_link(clipboard: &mut dyn ClipboardWriter, link: &str) -> ShareOutcome {
    match clipboard.write_text(link) {
        Ok(()) => ShareOutcome::Copied,
        Err(err) => {
            log::warn!("Clipboard unavailable, showing link instead: {err:#}");
            ShareOutcome::ManualCopy(link.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copied_when_clipboard_works() {
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .withf(|text| text.to_string() == "https://example.com/c?theme=default")
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(
            copy_share_link(&mut clipboard, "https://example.com/c?theme=default"),
            ShareOutcome::Copied
        );
    }

    #[test]
    fn test_falls_back_to_manual_copy() {
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .returning(|_| Err(anyhow::anyhow!("no clipboard")));

        assert_eq!(
            copy_share_link(&mut clipboard, "https://example.com/c"),
            ShareOutcome::ManualCopy("https://example.com/c".to_string())
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_system_clipboard_without_display_falls_back_to_manual_copy() {
        let has_display = ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()));
        if has_display {
            return;
        }

        let mut clipboard = SystemClipboard::new();
        assert_eq!(
            copy_share_link(&mut clipboard, "https://example.com/c"),
            ShareOutcome::ManualCopy("https://example.com/c".to_string())
        );
        assert!(clipboard.handle.is_none());
    }
}
