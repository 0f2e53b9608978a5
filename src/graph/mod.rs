//! Force-directed taxonomy graph.
//!
//! Independent of the particle playback; it only shares the window.

mod state;
mod taxonomy;

pub use state::{GraphState, NodeTint};
