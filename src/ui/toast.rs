use crate::notify::Toasts;
use crate::theme::Theme;
use eframe::egui::{self, Align2, Id, Order, RichText};
use std::time::Instant;

const TOAST_WIDTH: f32 = 320.0;

/// Draws the toast stack in the top-right corner, newest last.
pub fn show(ctx: &egui::Context, theme: &Theme, toasts: &mut Toasts, now: Instant) {
    let visible = toasts.visible(now);
    if visible.is_empty() {
        return;
    }

    egui::Area::new(Id::new("toasts"))
        .order(Order::Tooltip)
        .anchor(Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for toast in visible {
                theme
                    .toast_frame(toast.notification.severity)
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.label(
                            RichText::new(&toast.notification.message)
                                .color(theme.text_on_accent),
                        );
                    });
            }
        });
}
