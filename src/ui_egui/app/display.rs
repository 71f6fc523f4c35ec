use egui::{Align, Layout, Rect, RichText, Vec2};

use crate::services::countdown::{CountdownFields, CountdownView};
use crate::ui_egui::theme::CountdownTheme;

const UNIT_CAPTIONS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];

/// Paint `texture` so it covers `rect`, cropping whichever axis overflows.
pub(super) fn paint_cover(ui: &egui::Ui, rect: Rect, texture: &egui::TextureHandle) {
    let image_size = texture.size_vec2();
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return;
    }

    let scale = (rect.width() / image_size.x).max(rect.height() / image_size.y);
    let visible = rect.size() / (image_size * scale);
    let min = (Vec2::splat(1.0) - visible) * 0.5;
    let uv = Rect::from_min_size(min.to_pos2(), visible);

    ui.painter()
        .image(texture.id(), rect, uv, egui::Color32::WHITE);
}

pub(super) fn render_header(
    ui: &mut egui::Ui,
    title: &str,
    target_label: &str,
    theme: &CountdownTheme,
) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(title)
                .size(28.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.label(
            RichText::new(format!("Target: {target_label}"))
                .size(14.0)
                .color(theme.text_secondary),
        );
    });
}

pub(super) fn render_countdown(ui: &mut egui::Ui, view: &CountdownView, theme: &CountdownTheme) {
    egui::Frame::none()
        .fill(theme.card_background)
        .rounding(12.0)
        .inner_margin(egui::Margin::symmetric(16.0, 20.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            match view {
                CountdownView::Counting(fields) => render_fields(ui, fields, theme),
                CountdownView::TimeUp(text) => {
                    render_fields(ui, &CountdownFields::ZERO, theme);
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(text)
                                .size(34.0)
                                .strong()
                                .color(theme.accent),
                        );
                    });
                }
            }
        });
}

fn render_fields(ui: &mut egui::Ui, fields: &CountdownFields, theme: &CountdownTheme) {
    let values = fields.formatted();
    ui.columns(4, |columns| {
        for ((column, value), caption) in columns.iter_mut().zip(values.iter()).zip(UNIT_CAPTIONS) {
            column.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(
                    RichText::new(value)
                        .size(44.0)
                        .monospace()
                        .strong()
                        .color(theme.digits),
                );
                ui.label(
                    RichText::new(caption)
                        .size(13.0)
                        .color(theme.text_secondary),
                );
            });
        }
    });
}
