//! Theme palettes for the countdown window
//!
//! Each [`Theme`] variant maps to a palette. The default theme follows the
//! system light/dark preference.

use egui::Color32;

use crate::models::countdown::Theme;

/// Colors used to paint the countdown window
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Window background behind everything
    pub app_background: Color32,

    /// Background of the countdown card
    pub card_background: Color32,

    /// Buttons and highlights
    pub accent: Color32,

    /// Large countdown digits
    pub digits: Color32,

    /// Primary text color (headings, labels)
    pub text_primary: Color32,

    /// Secondary text color (unit captions, hints)
    pub text_secondary: Color32,
}

impl CountdownTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            card_background: Color32::from_rgba_unmultiplied(255, 255, 255, 225),
            accent: Color32::from_rgb(100, 150, 255),
            digits: Color32::from_rgb(15, 32, 70),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            card_background: Color32::from_rgba_unmultiplied(40, 40, 40, 225),
            accent: Color32::from_rgb(100, 150, 255),
            digits: Color32::from_rgb(240, 240, 240),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    pub fn romantic() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(255, 228, 236),
            card_background: Color32::from_rgba_unmultiplied(255, 245, 248, 225),
            accent: Color32::from_rgb(214, 51, 108),
            digits: Color32::from_rgb(150, 20, 70),
            text_primary: Color32::from_rgb(90, 20, 50),
            text_secondary: Color32::from_rgb(160, 90, 120),
        }
    }

    pub fn beach() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(210, 240, 250),
            card_background: Color32::from_rgba_unmultiplied(255, 250, 235, 225),
            accent: Color32::from_rgb(0, 150, 170),
            digits: Color32::from_rgb(10, 90, 120),
            text_primary: Color32::from_rgb(20, 60, 80),
            text_secondary: Color32::from_rgb(120, 110, 80),
        }
    }

    pub fn party() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(35, 10, 60),
            card_background: Color32::from_rgba_unmultiplied(60, 20, 95, 225),
            accent: Color32::from_rgb(255, 200, 0),
            digits: Color32::from_rgb(255, 110, 200),
            text_primary: Color32::from_rgb(250, 240, 255),
            text_secondary: Color32::from_rgb(200, 170, 230),
        }
    }

    /// Palette for a theme; `prefer_dark` only matters for the default theme.
    pub fn for_theme(theme: Theme, prefer_dark: bool) -> Self {
        match theme {
            Theme::Default if prefer_dark => Self::dark(),
            Theme::Default => Self::light(),
            Theme::Romantic => Self::romantic(),
            Theme::Beach => Self::beach(),
            Theme::Party => Self::party(),
        }
    }

    pub fn system_prefers_dark() -> bool {
        matches!(dark_light::detect(), dark_light::Mode::Dark)
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.selection.bg_fill = self.accent;
        visuals.hyperlink_color = self.accent;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}
