//! Bottom panel UI: play/pause and the timestep slider.

use super::colors;
use crate::particles::RESOLUTION_STEP;
use crate::state::{AppState, PlaybackAffordance, PlaybackPhase};
use eframe::egui::{self, Align2, FontId, RichText, Stroke};
use egui_phosphor::regular as icons;

/// Horizontal space reserved around the slider.
const SLIDER_MARGIN: f32 = 60.0;

pub fn render_bottom_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("bottom_panel")
        .exact_height(70.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            let panel_width = ui.max_rect().width();
            ui.horizontal(|ui| {
                render_play_button(ui, state);
                ui.separator();
                render_slider(ui, state, panel_width);
            });
        });
}

fn render_play_button(ui: &mut egui::Ui, state: &mut AppState) {
    let (glyph, action) = match state.playback.affordance() {
        PlaybackAffordance::Play => (icons::PLAY, "Play"),
        PlaybackAffordance::Pause => (icons::PAUSE, "Pause"),
    };
    let hint = format!(
        "{} (space), one step every {:.1} s",
        action,
        state.playback.interval().as_secs_f32()
    );

    if ui
        .button(RichText::new(glyph).size(18.0))
        .on_hover_text(hint)
        .clicked()
    {
        state.user_toggle_playback();
    }

    // A loop that ran past the last step stays "playing" but never advances
    if let PlaybackPhase::Playing { index } = state.playback.phase() {
        if index > state.playback.timeline().len() {
            ui.label(RichText::new("halted").size(11.0).color(colors::ui::ERROR));
        }
    }
}

fn render_slider(ui: &mut egui::Ui, state: &mut AppState, panel_width: f32) {
    let timeline = state.playback.timeline();
    let (min, max) = (timeline.min_value(), timeline.max_value());

    // Narrow windows get a fixed-width slider, wide ones half the window
    let width = if panel_width < 960.0 {
        480.0
    } else {
        panel_width / 2.0
    };
    ui.spacing_mut().slider_width = (width - SLIDER_MARGIN).max(100.0);

    // Edit a copy so programmatic moves never look like user input
    let mut value = state.playback.slider_value();
    let response = ui.add(
        egui::Slider::new(&mut value, min..=max)
            .step_by(RESOLUTION_STEP)
            .show_value(false),
    );
    if response.changed() {
        state.user_scrub(value);
    }

    ui.label(
        RichText::new(format!("{:.2}", state.playback.slider_value()))
            .monospace()
            .size(13.0)
            .color(colors::ui::VALUE),
    );

    paint_ticks(ui, response.rect, state, min, max);
}

/// Labels each valid timestep under the slider rail.
fn paint_ticks(ui: &egui::Ui, rect: egui::Rect, state: &AppState, min: f64, max: f64) {
    let painter = ui.painter();
    let handle_radius = rect.height() / 2.5;
    let rail_left = rect.left() + handle_radius;
    let rail_width = (rect.width() - 2.0 * handle_radius).max(1.0);
    let span = (max - min).max(f64::EPSILON);
    let current = state.playback.current_step();

    for &step in state.playback.timeline().steps() {
        let t = ((step.value() - min) / span) as f32;
        let x = rail_left + t * rail_width;
        let color = if Some(step) == current {
            colors::slider::TICK_CURRENT
        } else {
            colors::slider::TICK
        };

        painter.line_segment(
            [
                egui::pos2(x, rect.bottom()),
                egui::pos2(x, rect.bottom() + 4.0),
            ],
            Stroke::new(1.0, color),
        );
        painter.text(
            egui::pos2(x, rect.bottom() + 5.0),
            Align2::CENTER_TOP,
            step.label(),
            FontId::monospace(10.0),
            color,
        );
    }
}
