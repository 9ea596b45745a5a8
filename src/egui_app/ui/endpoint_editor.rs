use super::{EguiApp, style};
use eframe::egui::{self, Margin, RichText};

impl EguiApp {
    /// Inline row for changing the GraphQL endpoint; hidden unless opened.
    pub(super) fn render_endpoint_editor(&mut self, ui: &mut egui::Ui) {
        if !self.controller.ui.endpoint.open {
            return;
        }
        let palette = style::palette();
        let mut apply = false;
        let mut cancel = false;
        egui::Frame::new()
            .fill(palette.bg_tertiary)
            .stroke(style::card_stroke())
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.label(RichText::new("Prediction service endpoint").color(palette.text_primary));
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.controller.ui.endpoint.input)
                            .hint_text("http://localhost:5000/graphql")
                            .desired_width(ui.available_width() - 130.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        apply = true;
                    }
                    if ui.button("Save").clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
                if let Some(err) = self.controller.ui.endpoint.last_error.as_ref() {
                    ui.label(
                        RichText::new(err)
                            .color(style::status_badge_color(style::StatusTone::Error)),
                    );
                }
            });
        ui.add_space(8.0);

        if cancel {
            self.controller.close_endpoint_editor();
        } else if apply {
            self.controller.apply_endpoint_edit();
        }
    }
}
