use chrono::{Local, NaiveDate};
use egui_extras::DatePickerButton;

use crate::models::countdown::{CountdownConfig, Theme};
use crate::services::countdown::PrimaryAction;
use crate::utils::date::to_input_value;

/// Edits requested by the form this frame, applied by the app afterwards.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum FormCommand {
    SetEventName(String),
    SetPartnerName(String),
    SetDoneMessage(String),
    SetBackgroundUrl(String),
    SetTheme(Theme),
    UploadBackground,
    ClearBackground,
    SetTarget,
    TogglePause,
    RequestReset,
    CopyShareLink,
}

/// Text buffers backing the form inputs.
#[derive(Debug, Clone, Default)]
pub(super) struct FormState {
    pub event_name: String,
    pub partner_name: String,
    pub done_message: String,
    pub background_url: String,
    pub target_input: String,
    /// The background URL is still being typed; hold off fetching it
    pub background_url_has_focus: bool,
}

impl FormState {
    pub fn from_config(config: &CountdownConfig) -> Self {
        Self {
            event_name: config.event_name.clone(),
            partner_name: config.partner_name.clone(),
            done_message: config.done_message.clone(),
            background_url: config
                .background()
                .external_url()
                .unwrap_or_default()
                .to_string(),
            target_input: config.target().map(to_input_value).unwrap_or_default(),
            background_url_has_focus: false,
        }
    }
}

/// Labels and enablement the form needs from the rest of the app.
pub(super) struct FormContext<'a> {
    pub theme: Theme,
    pub primary_action: Option<PrimaryAction>,
    pub has_embedded_background: bool,
    pub upload_in_progress: bool,
    pub share_label: &'a str,
}

pub(super) fn render_form(
    ui: &mut egui::Ui,
    form: &mut FormState,
    context: &FormContext<'_>,
) -> Vec<FormCommand> {
    let mut commands = Vec::new();

    egui::Grid::new("countdown_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .striped(false)
        .show(ui, |ui| {
            ui.label("Event");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut form.event_name)
                        .desired_width(f32::INFINITY)
                        .hint_text("Our trip"),
                )
                .changed()
            {
                commands.push(FormCommand::SetEventName(form.event_name.clone()));
            }
            ui.end_row();

            ui.label("Partner");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut form.partner_name)
                        .desired_width(f32::INFINITY)
                        .hint_text("Who's coming along"),
                )
                .changed()
            {
                commands.push(FormCommand::SetPartnerName(form.partner_name.clone()));
            }
            ui.end_row();

            ui.label("Done message");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut form.done_message)
                        .desired_width(f32::INFINITY)
                        .hint_text("Time's up!"),
                )
                .changed()
            {
                commands.push(FormCommand::SetDoneMessage(form.done_message.clone()));
            }
            ui.end_row();

            ui.label("Target");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut form.target_input)
                        .desired_width(150.0)
                        .hint_text("YYYY-MM-DDTHH:MM"),
                );

                let mut picked_date = date_part(&form.target_input)
                    .unwrap_or_else(|| Local::now().date_naive());
                if ui
                    .add(DatePickerButton::new(&mut picked_date).id_source("countdown_target_date"))
                    .changed()
                {
                    form.target_input = replace_date_part(&form.target_input, picked_date);
                }

                if ui.button("Set").clicked() {
                    commands.push(FormCommand::SetTarget);
                }
            });
            ui.end_row();

            ui.label("Background URL");
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut form.background_url)
                        .desired_width(220.0)
                        .hint_text("https://…"),
                );
                form.background_url_has_focus = response.has_focus();
                if response.changed() {
                    commands.push(FormCommand::SetBackgroundUrl(form.background_url.clone()));
                }

                let upload_label = if context.upload_in_progress {
                    "Choosing…"
                } else {
                    "Upload…"
                };
                if ui
                    .add_enabled(!context.upload_in_progress, egui::Button::new(upload_label))
                    .clicked()
                {
                    commands.push(FormCommand::UploadBackground);
                }

                if ui.button("Clear").clicked() {
                    commands.push(FormCommand::ClearBackground);
                }
            });
            ui.end_row();

            if context.has_embedded_background {
                ui.label("");
                ui.weak("Using uploaded image");
                ui.end_row();
            }

            ui.label("Theme");
            let mut selected = context.theme;
            egui::ComboBox::from_id_source("countdown_theme")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for theme in Theme::ALL {
                        ui.selectable_value(&mut selected, theme, theme.label());
                    }
                });
            if selected != context.theme {
                commands.push(FormCommand::SetTheme(selected));
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        // One control for both pause and resume, disabled when neither applies
        let pause_label = context
            .primary_action
            .map(|action| action.label())
            .unwrap_or(PrimaryAction::Pause.label());
        if ui
            .add_enabled(context.primary_action.is_some(), egui::Button::new(pause_label))
            .clicked()
        {
            commands.push(FormCommand::TogglePause);
        }

        if ui.button("Reset").clicked() {
            commands.push(FormCommand::RequestReset);
        }

        if ui.button(context.share_label).clicked() {
            commands.push(FormCommand::CopyShareLink);
        }
    });

    commands
}

fn date_part(input: &str) -> Option<NaiveDate> {
    input
        .trim()
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

/// Swap the date of the input, keeping any time already typed.
fn replace_date_part(input: &str, date: NaiveDate) -> String {
    let trimmed = input.trim();
    let time = match date_part(trimmed) {
        Some(_) => trimmed.get(11..).unwrap_or_default(),
        None => "",
    };
    let time = if time.is_empty() { "00:00" } else { time };
    format!("{}T{}", date.format("%Y-%m-%d"), time)
}
