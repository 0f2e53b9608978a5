//! Right panel UI: taxonomy graph and viewer settings.

use super::colors;
use crate::graph::NodeTint;
use crate::state::{AppState, ViewerSettings};
use eframe::egui::{self, Color32, RichText};
use egui_graphs::{
    DefaultEdgeShape, DefaultNodeShape, FruchtermanReingold, FruchtermanReingoldState, GraphView,
    LayoutForceDirected, SettingsInteraction, SettingsStyle,
};
use petgraph::graph::DefaultIx;
use petgraph::Undirected;

type TaxonomyView<'a> = GraphView<
    'a,
    &'static str,
    f32,
    Undirected,
    DefaultIx,
    DefaultNodeShape,
    DefaultEdgeShape,
    FruchtermanReingoldState,
    LayoutForceDirected<FruchtermanReingold>,
>;

pub fn render_graph_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("graph_panel")
        .resizable(true)
        .default_width(360.0)
        .min_width(240.0)
        .max_width(560.0)
        .show(ctx, |ui| {
            ui.heading("Taxonomy");
            ui.label(
                RichText::new("Drag to pin, double-click to release")
                    .size(11.0)
                    .color(colors::ui::LABEL),
            );
            ui.separator();

            render_graph(ui, state);

            ui.add_space(5.0);
            render_settings_section(ui, state);
        });
}

fn render_graph(ui: &mut egui::Ui, state: &mut AppState) {
    let width = ui.available_width();
    let height = (width * 1.2).min(ui.available_height() - 140.0).max(120.0);
    let now = state.frame_time;

    state.graph.color_nodes(|tint| match tint {
        NodeTint::Default => colors::graph::NODE,
        NodeTint::Pinned => colors::graph::NODE_PINNED,
        NodeTint::Released => colors::graph::NODE_RELEASED,
    });
    state.graph.apply_pins();

    let interaction = SettingsInteraction::new()
        .with_dragging_enabled(true)
        .with_node_clicking_enabled(true);
    let style = SettingsStyle::new().with_labels_always(true);

    let response = ui
        .allocate_ui(egui::vec2(width, height), |ui| {
            let rect = ui.max_rect();
            ui.painter().rect_filled(rect, 4.0, colors::graph::BACKGROUND);
            ui.add(
                &mut TaxonomyView::new(state.graph.graph_mut())
                    .with_interactions(&interaction)
                    .with_styles(&style),
            )
        })
        .inner;

    let dragged = state.graph.dragged_node();
    state.graph.observe_drag(dragged, now);
    state.graph.apply_pins();

    if response.double_clicked() {
        if let Some(idx) = state.graph.graph().hovered_node() {
            state.graph.release(idx, now);
        }
    }
}

fn render_settings_section(ui: &mut egui::Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Settings").strong())
        .default_open(true)
        .show(ui, |ui| {
            let mut changed = false;

            ui.horizontal(|ui| {
                ui.label("Particle size:");
                let size = egui::Slider::new(&mut state.settings.point_size, 0.05..=1.0);
                changed |= ui.add(size.step_by(0.05)).changed();
            });

            ui.horizontal(|ui| {
                ui.label("Advance every:");
                let range =
                    ViewerSettings::min_interval_secs()..=ViewerSettings::max_interval_secs();
                let interval = egui::Slider::new(&mut state.settings.advance_interval_secs, range)
                    .step_by(0.5)
                    .suffix(" s");
                changed |= ui.add(interval).changed();
            });

            changed |= ui
                .checkbox(&mut state.settings.autoplay, "Play on startup")
                .changed();

            if changed {
                state.apply_settings();
            }

            ui.add_space(4.0);
            let (status, color) = if state.graph.is_active(state.frame_time) {
                (
                    format!("Layout running ({} links)", state.graph.attached_links()),
                    colors::ui::ACTIVE,
                )
            } else {
                ("Layout settled".to_string(), Color32::GRAY)
            };
            ui.label(RichText::new(status).size(11.0).color(color));
        });
}
