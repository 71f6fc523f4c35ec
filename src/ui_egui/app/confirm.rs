//! Confirmation dialog for actions the user must approve.
//!
//! Resetting the countdown and starting a countdown whose target is not in
//! the future both go through here.

use egui::{Context, RichText};

use crate::services::countdown::TargetProposal;
use crate::utils::date::format_target_label;

/// Actions that need an explicit yes before they run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Clear the saved target
    ResetCountdown,
    /// Start a countdown that ends immediately
    StartPastTarget { proposal: TargetProposal },
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::ResetCountdown => "Reset Countdown",
            ConfirmAction::StartPastTarget { .. } => "Target In The Past",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfirmAction::ResetCountdown => "Reset and clear the saved target?".to_string(),
            ConfirmAction::StartPastTarget { proposal } => format!(
                "{} is in the past or now.\n\nDo you want to start a timer that immediately ends?",
                format_target_label(Some(proposal.target))
            ),
        }
    }

    pub fn confirm_text(&self) -> &'static str {
        match self {
            ConfirmAction::ResetCountdown => "Reset",
            ConfirmAction::StartPastTarget { .. } => "Start",
        }
    }

    /// Destructive actions get a red confirm button
    pub fn is_destructive(&self) -> bool {
        matches!(self, ConfirmAction::ResetCountdown)
    }
}

#[derive(Debug, Default)]
pub struct ConfirmDialogState {
    pending_action: Option<ConfirmAction>,
}

impl ConfirmDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation, replacing any question still open
    pub fn request(&mut self, action: ConfirmAction) {
        self.pending_action = Some(action);
    }

    pub fn is_open(&self) -> bool {
        self.pending_action.is_some()
    }

    /// Render the dialog. Returns the action once the user confirms it;
    /// cancelling (button or Escape) simply closes the dialog.
    pub fn render(&mut self, ctx: &Context) -> Option<ConfirmAction> {
        let action = self.pending_action.as_ref()?;

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new(action.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.set_max_width(400.0);

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("⚠")
                            .size(24.0)
                            .color(egui::Color32::from_rgb(220, 150, 50)),
                    );
                    ui.vertical(|ui| {
                        ui.label(action.message());
                    });
                });

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let confirm_button = if action.is_destructive() {
                            egui::Button::new(
                                RichText::new(action.confirm_text()).color(egui::Color32::WHITE),
                            )
                            .fill(egui::Color32::from_rgb(180, 60, 60))
                        } else {
                            egui::Button::new(action.confirm_text())
                        };

                        if ui.add(confirm_button).clicked() {
                            confirmed = true;
                        }

                        ui.add_space(10.0);

                        if ui.button("Cancel").clicked() {
                            cancelled = true;
                        }
                    });
                });

                ui.add_space(5.0);
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancelled = true;
        }

        if confirmed && !cancelled {
            return self.pending_action.take();
        }
        if cancelled {
            log::debug!("Confirmation cancelled");
            self.pending_action = None;
        }
        None
    }
}
