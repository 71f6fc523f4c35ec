//! Toast notifications for brief feedback messages.
//!
//! Toasts appear at the bottom of the window and fade away. They carry
//! validation errors, "link copied" feedback and background load failures.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }

    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 70, 40),
                ToastLevel::Info => Color32::from_rgb(30, 50, 80),
                ToastLevel::Warning => Color32::from_rgb(80, 60, 20),
                ToastLevel::Error => Color32::from_rgb(80, 30, 30),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(220, 255, 220),
                ToastLevel::Info => Color32::from_rgb(220, 235, 255),
                ToastLevel::Warning => Color32::from_rgb(255, 245, 200),
                ToastLevel::Error => Color32::from_rgb(255, 220, 220),
            }
        }
    }

    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(100, 220, 120),
                ToastLevel::Info => Color32::from_rgb(100, 180, 255),
                ToastLevel::Warning => Color32::from_rgb(255, 200, 80),
                ToastLevel::Error => Color32::from_rgb(255, 120, 120),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 120, 50),
                ToastLevel::Info => Color32::from_rgb(30, 80, 150),
                ToastLevel::Warning => Color32::from_rgb(150, 100, 0),
                ToastLevel::Error => Color32::from_rgb(180, 40, 40),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        // Errors stay up longer so they can be read
        let duration = match level {
            ToastLevel::Error | ToastLevel::Warning => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        };
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Opacity for the last half second fade out
    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed();
        let fade_start = self.duration.saturating_sub(Duration::from_millis(500));

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            ((self.duration - elapsed).as_secs_f32() / 0.5).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Error));
    }

    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Render active toasts centered at the bottom, newest on top
    pub fn render(&mut self, ctx: &Context, is_dark_theme: bool) {
        self.cleanup();

        if self.toasts.is_empty() {
            return;
        }

        // Keep repainting while toasts fade
        ctx.request_repaint();

        let screen_rect = ctx.screen_rect();
        let toast_width = 320.0_f32.min(screen_rect.width() - 20.0);
        let toast_height = 40.0;
        let margin = 12.0;
        let spacing = 5.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.center().x - toast_width / 2.0,
                screen_rect.bottom() - toast_height - margin - y_offset,
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let bg_color = toast.level.background_color(is_dark_theme).gamma_multiply(opacity);
                    let text_color = toast.level.text_color(is_dark_theme).gamma_multiply(opacity);

                    egui::Frame::none()
                        .fill(bg_color)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(text_color).strong());
                                ui.label(RichText::new(&toast.message).color(text_color));
                            });
                        });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_is_visible() {
        let toast = Toast::new("Link copied!", ToastLevel::Success);
        assert!(!toast.is_expired());
        assert_eq!(toast.opacity(), 1.0);
    }

    #[test]
    fn test_errors_linger_longer() {
        let info = Toast::new("a", ToastLevel::Info);
        let error = Toast::new("b", ToastLevel::Error);
        assert!(error.duration > info.duration);
    }

    #[test]
    fn test_cleanup_drops_expired() {
        let mut manager = ToastManager::new();
        manager.add(Toast {
            duration: Duration::ZERO,
            ..Toast::new("gone", ToastLevel::Info)
        });
        manager.success("kept");
        manager.cleanup();
        assert_eq!(manager.toasts.len(), 1);
    }
}
