//! Central canvas UI: the 3D particle view.

use crate::state::AppState;
use eframe::egui::{self, Color32, CursorIcon, PointerButton, Sense};
use glam::Vec2;

/// Radians of orbit per dragged point.
const ORBIT_SPEED: f32 = 0.005;

/// Zoom step per scrolled point.
const ZOOM_SPEED: f32 = 0.01;

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) =
                ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            state.viewport.resize(rect.width(), rect.height());
            handle_canvas_interaction(ui, &response, state);

            state.viewport.paint(&painter, rect);

            if !state.revealed {
                render_loading_overlay(ui, rect);
            }
        });
}

fn handle_canvas_interaction(ui: &egui::Ui, response: &egui::Response, state: &mut AppState) {
    let delta = response.drag_delta();

    if response.dragged_by(PointerButton::Primary) {
        ui.ctx().set_cursor_icon(CursorIcon::Move);
        if delta != egui::Vec2::ZERO {
            state
                .viewport
                .camera
                .orbit(-delta.x * ORBIT_SPEED, -delta.y * ORBIT_SPEED);
            state.viewport.render();
        }
    } else if response.dragged_by(PointerButton::Secondary) {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
        if delta != egui::Vec2::ZERO {
            let height = response.rect.height();
            state
                .viewport
                .camera
                .pan(Vec2::new(delta.x, delta.y), height);
            state.viewport.render();
        }
    }

    // Handle scroll for zooming
    if response.hovered() {
        let scroll_delta = ui.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            state.viewport.camera.zoom(scroll_delta.y * ZOOM_SPEED);
            state.viewport.render();
        }
    }

    // Reset view on double-click
    if response.double_clicked() {
        state.viewport.reset_camera();
    }
}

/// Covers the canvas until the startup dataset has been painted.
fn render_loading_overlay(ui: &egui::Ui, rect: egui::Rect) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(230));
    ui.ctx().set_cursor_icon(CursorIcon::Progress);

    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Loading particles...",
        egui::FontId::proportional(16.0),
        Color32::GRAY,
    );
}
