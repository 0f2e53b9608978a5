//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Failure indicator.
    pub const ERROR: Color32 = Color32::from_rgb(255, 110, 110);
}

/// Colors for the timestep slider.
pub mod slider {
    use super::Color32;

    /// Tick mark and label color.
    pub const TICK: Color32 = Color32::from_rgb(120, 120, 140);
    /// Tick of the displayed step.
    pub const TICK_CURRENT: Color32 = Color32::from_rgb(100, 180, 255);
}

/// Colors for the taxonomy graph.
pub mod graph {
    use super::Color32;

    pub const BACKGROUND: Color32 = Color32::from_rgb(22, 22, 28);
    /// Untouched node fill.
    pub const NODE: Color32 = Color32::from_rgb(140, 170, 220);
    /// hsl(350, 71%, 86%)
    pub const NODE_PINNED: Color32 = Color32::from_rgb(245, 194, 202);
    /// hsl(50, 65%, 75%)
    pub const NODE_RELEASED: Color32 = Color32::from_rgb(233, 219, 150);
}
