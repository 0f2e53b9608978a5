//! UI modules for the Nozzle Viewer application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, status, and displayed timestep
//! - Central canvas: 3D particle view
//! - Bottom panel: Play/pause and timestep slider
//! - Right panel: Taxonomy graph and settings

mod bottom_panel;
mod canvas;
mod colors;
mod graph_panel;
mod top_bar;

pub use bottom_panel::render_bottom_panel;
pub use canvas::render_canvas;
pub use graph_panel::render_graph_panel;
pub use top_bar::render_top_bar;
