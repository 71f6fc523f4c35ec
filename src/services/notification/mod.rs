use std::sync::Arc;

use anyhow::Result;
use notify_rust::{Notification, Timeout};
use tokio::runtime::Handle;

/// Freedesktop sound theme name played with the completion notification.
const COMPLETION_SOUND: &str = "alarm-clock-elapsed";

/// One-shot effect fired when the countdown reaches zero.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionEffect {
    fn fire(&self, title: &str, message: &str) -> Result<()>;
}

/// Service for displaying system notifications
pub struct NotificationService {
    enabled: bool,
    play_sound: bool,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            enabled: true,
            play_sound: true,
        }
    }

    pub fn with_options(enabled: bool, play_sound: bool) -> Self {
        Self {
            enabled,
            play_sound,
        }
    }

    /// Check if notifications are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show the "time's up" notification, with the alarm sound when enabled
    pub fn show_completion_alert(&self, title: &str, message: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(10000));
        if self.play_sound {
            notification.sound_name(COMPLETION_SOUND);
        }

        notification
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionEffect for NotificationService {
    fn fire(&self, title: &str, message: &str) -> Result<()> {
        self.show_completion_alert(title, message)
    }
}

/// Runs another effect on the runtime's blocking pool so a slow
/// notification daemon never stalls the caller.
///
/// `fire` returns as soon as the work is queued; failures are logged
/// from the worker.
pub struct BackgroundEffect {
    inner: Arc<dyn CompletionEffect + Send + Sync>,
    runtime: Handle,
}

impl BackgroundEffect {
    pub fn new(inner: Arc<dyn CompletionEffect + Send + Sync>, runtime: Handle) -> Self {
        Self { inner, runtime }
    }
}

impl CompletionEffect for BackgroundEffect {
    fn fire(&self, title: &str, message: &str) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let title = title.to_owned();
        let message = message.to_owned();
        self.runtime.spawn_blocking(move || {
            if let Err(err) = inner.fire(&title, &message) {
                log::warn!("Completion effect unavailable: {err:#}");
            }
        });
        Ok(())
    }
}
