use super::{APP_TITLE, EguiApp, style};
use crate::egui_app::state::{ExampleReview, RATING_SCALE_MAX};
use crate::prediction::Prediction;
use eframe::egui::{self, Margin, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormAction {
    None,
    Submit,
    Clear,
    Example(ExampleReview),
}

impl EguiApp {
    /// Review box, action row, and the latest outcome.
    pub(super) fn render_prediction_form(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(APP_TITLE).color(palette.accent_ice));
        });
        ui.add_space(10.0);

        let action = self.render_review_input(ui);
        ui.add_space(12.0);
        self.render_outcome(ui);

        match action {
            FormAction::None => {}
            FormAction::Submit => self.controller.submit(),
            FormAction::Clear => self.controller.clear_input(),
            FormAction::Example(example) => self.controller.load_example(example),
        }
    }

    fn render_review_input(&mut self, ui: &mut egui::Ui) -> FormAction {
        let palette = style::palette();
        let loading = self.controller.form.is_loading();
        let mut action = FormAction::None;

        ui.label(RichText::new("Course instructor review").color(palette.text_primary));
        let response = ui.add(
            egui::TextEdit::multiline(self.controller.form.input_mut())
                .hint_text("Paste a review of the instructor…")
                .desired_width(f32::INFINITY)
                .desired_rows(8),
        );
        if self.controller.ui.focus_input_requested {
            response.request_focus();
            self.controller.ui.focus_input_requested = false;
        }
        let submit_shortcut = response.has_focus()
            && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        ui.add_space(6.0);
        let can_submit = !loading && !self.controller.form.input_is_blank();
        ui.horizontal(|ui| {
            for example in [ExampleReview::Negative, ExampleReview::Positive] {
                if ui
                    .add_enabled(!loading, egui::Button::new(example.label()))
                    .clicked()
                {
                    action = FormAction::Example(example);
                }
            }
            if ui
                .add_enabled(!loading, egui::Button::new("Clear"))
                .clicked()
            {
                action = FormAction::Clear;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let predict = ui
                    .add_enabled(can_submit, egui::Button::new("Predict"))
                    .on_hover_text("Ctrl+Enter");
                if predict.clicked() {
                    action = FormAction::Submit;
                }
                if loading {
                    ui.add(egui::Spinner::new().size(16.0));
                }
            });
        });
        if submit_shortcut && can_submit {
            action = FormAction::Submit;
        }
        action
    }

    fn render_outcome(&self, ui: &mut egui::Ui) {
        let palette = style::palette();
        if let Some(error) = self.controller.form.error() {
            ui.label(
                RichText::new(error)
                    .color(style::status_badge_color(style::StatusTone::Error))
                    .strong(),
            );
            return;
        }
        if self.controller.form.is_loading() {
            ui.label(
                RichText::new("Waiting for the prediction service…").color(palette.text_muted),
            );
            return;
        }
        let Some(prediction) = self.controller.form.result() else {
            return;
        };
        render_result_card(ui, prediction);
    }
}

fn render_result_card(ui: &mut egui::Ui, prediction: Prediction) {
    let palette = style::palette();
    egui::Frame::new()
        .fill(palette.bg_tertiary)
        .stroke(style::card_stroke())
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new("Rating").color(palette.text_muted));
                ui.label(
                    RichText::new(format_rating(prediction.rating))
                        .size(28.0)
                        .strong()
                        .color(style::rating_color(prediction.rating, RATING_SCALE_MAX)),
                );
                ui.add_space(24.0);
                ui.label(RichText::new("Confidence").color(palette.text_muted));
                ui.label(
                    RichText::new(format_confidence(prediction.confidence))
                        .size(20.0)
                        .color(palette.text_primary),
                );
            });
        });
}

fn format_rating(rating: f64) -> String {
    format!("{rating:.2}")
}

fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_result_values() {
        assert_eq!(format_rating(4.2), "4.20");
        assert_eq!(format_confidence(0.87), "87.0%");
        assert_eq!(format_confidence(1.0), "100.0%");
    }
}
