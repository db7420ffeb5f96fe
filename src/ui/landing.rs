use crate::modal::ModalKind;
use crate::signal::SignalBus;
use crate::theme::Theme;
use eframe::egui::{self, Align, Layout, RichText, TextStyle};

const FEATURES: [(&str, &str); 3] = [
    (
        "Connect",
        "Find developers who share your stack and send them a friend request.",
    ),
    ("Showcase", "Publish your projects with live demos and source links."),
    ("Share", "Post short stories about what you are building and learning."),
];

/// Signed-out home page. Its buttons broadcast open requests that the root
/// auth dialog picks up.
pub fn show(ctx: &egui::Context, theme: &Theme, bus: &SignalBus) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(ui.available_height() * 0.15);
            ui.label(
                RichText::new("InstaDev")
                    .text_style(TextStyle::Name("hero".into()))
                    .strong()
                    .color(theme.accent_secondary),
            );
            ui.label(
                RichText::new("Connect, collaborate and share with developers worldwide")
                    .size(18.0)
                    .color(theme.text_muted),
            );
            ui.add_space(theme.spacing_24);

            ui.horizontal(|ui| {
                let width = 2.0 * 160.0 + ui.spacing().item_spacing.x;
                ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
                if ui
                    .add(theme.primary_button("Login").min_size(egui::vec2(160.0, 40.0)))
                    .clicked()
                {
                    bus.open_modal(ModalKind::Login);
                }
                if ui
                    .add(egui::Button::new("Join Community").min_size(egui::vec2(160.0, 40.0)))
                    .clicked()
                {
                    bus.open_modal(ModalKind::Register);
                }
            });
            ui.add_space(theme.spacing_24 * 2.0);

            ui.columns(FEATURES.len(), |columns| {
                for (column, (title, blurb)) in columns.iter_mut().zip(FEATURES) {
                    theme.card_frame().show(column, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.strong(title);
                            ui.label(RichText::new(blurb).color(theme.text_muted));
                        });
                    });
                }
            });
        });
    });
}
