use crate::notify::Severity;
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub accent_primary: Color32,
    pub accent_secondary: Color32,
    pub success: Color32,
    pub danger: Color32,
    pub like: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub border_subtle: Color32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_8: u8,
    pub radius_12: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0xF4, 0xF5, 0xFB),
            surface_1: Color32::from_rgb(0xFF, 0xFF, 0xFF),
            surface_2: Color32::from_rgb(0xF8, 0xF9, 0xFA),
            accent_primary: Color32::from_rgb(0x66, 0x7E, 0xEA),
            accent_secondary: Color32::from_rgb(0x76, 0x4B, 0xA2),
            success: Color32::from_rgb(0x51, 0xCF, 0x66),
            danger: Color32::from_rgb(0xFF, 0x6B, 0x6B),
            like: Color32::from_rgb(0xE0, 0x31, 0x31),
            text_primary: Color32::from_rgb(0x33, 0x33, 0x33),
            text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
            text_on_accent: Color32::WHITE,
            border_subtle: Color32::from_rgb(0xE1, 0xE5, 0xE9),
            spacing_8: Self::P8,
            spacing_12: Self::P12,
            spacing_16: Self::P16,
            spacing_24: Self::P24,
            radius_8: Self::R8,
            radius_12: Self::R12,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R12: u8 = 12;
    pub const P8: f32 = 8.0;
    pub const P12: f32 = 12.0;
    pub const P16: f32 = 16.0;
    pub const P24: f32 = 24.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_0;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_1;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_primary);
        visuals.widgets.active.bg_fill = self.accent_primary;
        visuals.widgets.active.fg_stroke.color = self.text_on_accent;
        visuals.selection.bg_fill = self.accent_primary;
        visuals.selection.stroke = Stroke::new(1.0, self.text_on_accent);
        visuals.hyperlink_color = self.accent_primary;
        visuals.window_fill = self.surface_1;
        visuals.window_stroke = Stroke::NONE;
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 10],
            blur: 30,
            spread: 0,
            color: Color32::from_black_alpha(50),
        };

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(22.0));
        style.text_styles.insert(TextStyle::Name("hero".into()), FontId::proportional(48.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self, fill: Color32, inner_padding: i8) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(inner_padding))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 15,
                spread: 0,
                color: Color32::from_black_alpha(20),
            })
    }

    pub fn card_frame(&self) -> Frame {
        self.panel_frame(self.surface_1, self.spacing_16 as i8)
    }

    pub fn nav_frame(&self) -> Frame {
        Frame::new()
            .fill(self.accent_secondary)
            .inner_margin(Margin::symmetric(self.spacing_24 as i8, self.spacing_12 as i8))
    }

    pub fn toast_frame(&self, severity: Severity) -> Frame {
        Frame::new()
            .fill(self.severity_color(severity))
            .inner_margin(Margin::symmetric(self.spacing_16 as i8, self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .shadow(egui::epaint::Shadow {
                offset: [0, 4],
                blur: 12,
                spread: 0,
                color: Color32::from_black_alpha(40),
            })
    }

    pub fn severity_color(&self, severity: Severity) -> Color32 {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.danger,
        }
    }

    pub fn primary_button<'a>(&self, label: impl Into<egui::WidgetText>) -> egui::Button<'a> {
        let label: egui::WidgetText = label.into();
        egui::Button::new(label.color(self.text_on_accent))
            .fill(self.accent_primary)
            .corner_radius(CornerRadius::same(self.radius_8))
    }

    pub fn tag(&self, ui: &mut egui::Ui, text: &str) {
        Frame::new()
            .fill(self.accent_primary.gamma_multiply(0.15))
            .inner_margin(Margin::symmetric(8, 2))
            .corner_radius(CornerRadius::same(self.radius_12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(text).small().color(self.accent_primary));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use crate::notify::Severity;
    use eframe::egui::Color32;

    #[test]
    fn toasts_are_colored_by_severity() {
        let theme = Theme::default();
        assert_eq!(
            theme.severity_color(Severity::Success),
            Color32::from_rgb(0x51, 0xCF, 0x66)
        );
        assert_eq!(
            theme.severity_color(Severity::Error),
            Color32::from_rgb(0xFF, 0x6B, 0x6B)
        );
    }
}
