use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;

use super::background::BackgroundState;
use super::clipboard::SystemClipboard;
use super::confirm::ConfirmDialogState;
use super::display;
use super::form::{render_form, FormCommand, FormContext, FormState};
use super::toast::ToastManager;
use super::CountdownApp;
use crate::models::settings::AppConfig;
use crate::services::countdown::{CountdownPhase, CountdownService, TickOutcome};
use crate::services::notification::{BackgroundEffect, NotificationService};
use crate::ui_egui::theme::CountdownTheme;
use crate::utils::date::format_target_label;

const CONFIG_FILE_NAME: &str = "config.toml";
const STORAGE_FILE_NAME: &str = "countdown.json";
const LINK_COPIED_FEEDBACK: Duration = Duration::from_secs(2);

impl CountdownApp {
    /// Build the app, restoring the saved countdown and applying `share_link` on top.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        share_link: Option<String>,
    ) -> Result<Self> {
        let storage_path = config
            .storage_path
            .clone()
            .unwrap_or_else(default_storage_path);
        log::info!("Countdown storage: {}", storage_path.display());

        let mut countdown_service =
            load_countdown_service(&storage_path, config.default_target());

        if let Some(link) = share_link.as_deref() {
            // Link values replace what was saved and are written back immediately
            if countdown_service.apply_share_link(link) {
                persist(&mut countdown_service, &storage_path);
            }
        }
        countdown_service.start();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("countdown-worker")
            .enable_all()
            .build()
            .context("Failed to start background runtime")?;

        let notification_service =
            NotificationService::with_options(config.notifications_enabled, config.play_sound);
        let completion_effect =
            BackgroundEffect::new(Arc::new(notification_service), runtime.handle().clone());
        let form = FormState::from_config(countdown_service.config());
        let system_prefers_dark = CountdownTheme::system_prefers_dark();

        let mut app = Self {
            config,
            countdown_service,
            storage_path,
            completion_effect,
            runtime,
            form,
            background: BackgroundState::default(),
            active_theme: CountdownTheme::light(),
            applied_theme: None,
            system_prefers_dark,
            toast_manager: ToastManager::new(),
            confirm_dialog: ConfirmDialogState::new(),
            clipboard: SystemClipboard::new(),
            share_fallback: None,
            link_copied_at: None,
            window_title: String::new(),
        };

        app.apply_theme(&cc.egui_ctx);
        Ok(app)
    }

    /// Location of config.toml in the platform config directory.
    pub fn config_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        }
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.countdown_service.config().theme;
        if self.applied_theme == Some(theme) {
            return;
        }

        let palette = CountdownTheme::for_theme(theme, self.system_prefers_dark);
        palette.apply_to_context(ctx);
        self.active_theme = palette;
        self.applied_theme = Some(theme);
        log::debug!("Applied theme {theme}");
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background_upload(ctx);
        self.apply_theme(ctx);

        let now = Utc::now();
        if self.countdown_service.tick(now, &self.completion_effect) == TickOutcome::Elapsed {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestUserAttention(
                egui::UserAttentionType::Critical,
            ));
        }
        self.update_window_title(ctx);

        let commands = self.render_main_panel(ctx, now);
        if !commands.is_empty() {
            self.apply_form_commands(commands);
        }

        self.sync_background(ctx);

        if let Some(action) = self.confirm_dialog.render(ctx) {
            self.execute_confirmed(action);
        }
        self.render_share_fallback(ctx);

        self.persist_if_needed();

        // Only a running countdown schedules refreshes
        if self.countdown_service.is_ticking() {
            ctx.request_repaint_after(self.config.tick_interval());
        }

        // Render toast notifications (last, so they appear on top)
        let is_dark = self.active_theme.is_dark;
        self.toast_manager.render(ctx, is_dark);
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist_if_needed();
    }

    fn persist_if_needed(&mut self) {
        if self.countdown_service.is_dirty() {
            persist(&mut self.countdown_service, &self.storage_path);
        }
    }

    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = self.countdown_service.config().title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }

    fn share_label(&mut self, ctx: &egui::Context) -> &'static str {
        match self.link_copied_at {
            Some(copied_at) if copied_at.elapsed() < LINK_COPIED_FEEDBACK => {
                ctx.request_repaint_after(LINK_COPIED_FEEDBACK.saturating_sub(copied_at.elapsed()));
                "Link copied!"
            }
            Some(_) => {
                self.link_copied_at = None;
                "Copy share link"
            }
            None => "Copy share link",
        }
    }

    fn render_main_panel(&mut self, ctx: &egui::Context, now: DateTime<Utc>) -> Vec<FormCommand> {
        let share_label = self.share_label(ctx);
        let config = self.countdown_service.config();
        let title = config.title();
        let target_label = format_target_label(config.target());
        let view = self.countdown_service.view(now);
        let paused = matches!(self.countdown_service.phase(), CountdownPhase::Paused { .. });
        // No edits behind an open confirmation
        let form_enabled = !self.confirm_dialog.is_open();
        let form_context = FormContext {
            theme: config.theme,
            primary_action: self.countdown_service.primary_action(),
            has_embedded_background: config.background().embedded_data_url().is_some(),
            upload_in_progress: self.background.upload_in_progress(),
            share_label,
        };

        let mut commands = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.background.texture {
                display::paint_cover(ui, ui.max_rect(), texture);
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(16.0);
                display::render_header(ui, &title, &target_label, &self.active_theme);
                if paused {
                    ui.vertical_centered(|ui| {
                        ui.weak("Paused");
                    });
                }
                ui.add_space(16.0);
                display::render_countdown(ui, &view, &self.active_theme);
                ui.add_space(16.0);

                egui::Frame::none()
                    .fill(self.active_theme.card_background)
                    .rounding(12.0)
                    .inner_margin(egui::Margin::same(16.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.add_enabled_ui(form_enabled, |ui| {
                            commands = render_form(ui, &mut self.form, &form_context);
                        });
                    });
                ui.add_space(16.0);
            });
        });
        commands
    }

    fn render_share_fallback(&mut self, ctx: &egui::Context) {
        let Some(link) = self.share_fallback.as_deref() else {
            return;
        };

        let mut open = true;
        egui::Window::new("Copy this link")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The clipboard is unavailable. Select the link and copy it:");
                // Read-only buffer: selectable but not editable
                let mut text = link;
                ui.add(egui::TextEdit::singleline(&mut text).desired_width(360.0));
            });

        if !open {
            self.share_fallback = None;
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "TripCountdown")
}

fn default_storage_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(STORAGE_FILE_NAME),
        None => PathBuf::from(STORAGE_FILE_NAME),
    }
}

fn load_countdown_service(
    path: &Path,
    default_target: Option<DateTime<Utc>>,
) -> CountdownService {
    match CountdownService::load_from_disk(path, default_target) {
        Ok(service) => service,
        Err(err) => {
            log::warn!("Failed to load saved countdown: {err:?}");
            CountdownService::with_default_target(default_target)
        }
    }
}

fn persist(service: &mut CountdownService, path: &Path) {
    if let Err(err) = service.save_to_disk(path) {
        log::error!("Failed to persist countdown: {err:?}");
    } else {
        service.mark_clean();
    }
}
