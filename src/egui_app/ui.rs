//! egui renderer for the prediction form.
use std::time::Duration;

use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText};

mod endpoint_editor;
mod prediction_form;
pub mod style;

/// Title shown in the window and above the form.
pub const APP_TITLE: &str = "Instructor review rating predictor";
/// Smallest usable window size.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [420.0, 380.0];
/// Repaint cadence while a request is pending so results surface promptly.
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status = &self.controller.ui.status;
                    ui.add_space(4.0);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let endpoint = self.controller.endpoint().to_string();
                        if ui
                            .small_button("Change")
                            .on_hover_text("Edit the prediction service endpoint")
                            .clicked()
                        {
                            self.controller.open_endpoint_editor();
                        }
                        ui.label(RichText::new(endpoint).color(palette.text_muted).small());
                    });
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_endpoint_editor(ui);
            self.render_prediction_form(ui);
        });
        if self.controller.form.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }
}
