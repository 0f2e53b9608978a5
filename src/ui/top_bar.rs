//! Top bar UI: app title, displayed timestep and status.

use super::colors;
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("Nozzle Viewer")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                // Status text
                let status_color = if state.status_message.starts_with("Failed") {
                    colors::ui::ERROR
                } else {
                    Color32::GRAY
                };
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(status_color),
                );

                if state.focus.was_auto_paused_by_blur() {
                    ui.separator();
                    ui.label(
                        RichText::new("paused (window inactive)")
                            .size(12.0)
                            .color(colors::ui::LABEL),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_stats(ui, state);
                });
            });
        });
}

fn render_stats(ui: &mut egui::Ui, state: &AppState) {
    if let Some(latency) = state.last_fetch_latency_ms {
        stat(ui, "load", format!("{:.0} ms", latency));
    }

    if let Some(points) = state.viewport.points() {
        stat(ui, "particles", points.len().to_string());
    }

    if let Some(step) = state.loading_step {
        ui.spinner();
        ui.label(
            RichText::new(format!("loading {}", step))
                .size(11.0)
                .color(colors::ui::LABEL),
        );
        ui.separator();
    }

    if let Some(step) = state.displayed_step {
        ui.label(
            RichText::new(format!("t = {}", step))
                .monospace()
                .size(13.0)
                .color(colors::ui::ACTIVE),
        );
    }
}

fn stat(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(RichText::new(value).size(12.0).color(colors::ui::VALUE));
    ui.label(RichText::new(label).size(11.0).color(colors::ui::LABEL));
    ui.separator();
}
