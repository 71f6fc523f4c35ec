mod actions;
mod background;
mod clipboard;
mod confirm;
mod display;
mod form;
mod lifecycle;
mod toast;

use std::path::PathBuf;
use std::time::Instant;

use self::background::BackgroundState;
use self::clipboard::SystemClipboard;
use self::confirm::ConfirmDialogState;
use self::form::FormState;
use self::toast::ToastManager;
use crate::models::countdown::Theme;
use crate::models::settings::AppConfig;
use crate::services::countdown::CountdownService;
use crate::services::notification::BackgroundEffect;
use crate::ui_egui::theme::CountdownTheme;

const MIN_ROOT_WIDTH: f32 = 380.0;
const MIN_ROOT_HEIGHT: f32 = 480.0;

pub struct CountdownApp {
    /// Settings from config.toml
    config: AppConfig,
    countdown_service: CountdownService,
    /// Where the countdown snapshot is saved
    storage_path: PathBuf,
    /// Completion notification, shown off the UI thread
    completion_effect: BackgroundEffect,
    /// Runs background loads and uploads off the UI thread
    runtime: tokio::runtime::Runtime,
    form: FormState,
    background: BackgroundState,
    /// Currently applied palette
    active_theme: CountdownTheme,
    /// Theme the palette was built from
    applied_theme: Option<Theme>,
    /// System dark mode, detected once at startup
    system_prefers_dark: bool,
    toast_manager: ToastManager,
    confirm_dialog: ConfirmDialogState,
    clipboard: SystemClipboard,
    /// Link shown for manual copying when the clipboard is unavailable
    share_fallback: Option<String>,
    link_copied_at: Option<Instant>,
    window_title: String,
}

impl eframe::App for CountdownApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}

impl CountdownApp {
    pub fn min_window_size() -> [f32; 2] {
        [MIN_ROOT_WIDTH, MIN_ROOT_HEIGHT]
    }
}
