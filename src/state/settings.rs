//! Viewer settings.
//!
//! Settings are persisted to localStorage so they survive page reloads.
//! Native builds have no localStorage and always start from defaults.

use super::playback::DEFAULT_ADVANCE_INTERVAL;
use crate::assets::AssetPaths;
use crate::particles::{Timeline, DEFAULT_BURST_INTERVAL, DEFAULT_BURST_PASSES, DEFAULT_STEPS};
use crate::scene::DEFAULT_POINT_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-adjustable viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Directory holding `{step}.csv` particle exports.
    pub data_root: String,
    pub model_root: String,
    pub model_name: String,
    /// Timesteps with exported particle data.
    pub steps: Vec<f64>,
    /// Seconds between automatic timestep advances.
    pub advance_interval_secs: f64,
    pub burst_passes: u32,
    pub burst_interval_ms: u64,
    /// Particle size in world units.
    pub point_size: f32,
    /// Start playing as soon as the app opens.
    pub autoplay: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let paths = AssetPaths::default();
        Self {
            data_root: paths.data_root,
            model_root: paths.model_root,
            model_name: paths.model_name,
            steps: DEFAULT_STEPS.to_vec(),
            advance_interval_secs: DEFAULT_ADVANCE_INTERVAL.as_secs_f64(),
            burst_passes: DEFAULT_BURST_PASSES,
            burst_interval_ms: DEFAULT_BURST_INTERVAL.as_millis() as u64,
            point_size: DEFAULT_POINT_SIZE,
            autoplay: true,
        }
    }
}

impl ViewerSettings {
    /// localStorage key for persisting settings.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "nozzle_viewer_settings";

    pub fn min_interval_secs() -> f64 {
        0.5
    }

    pub fn max_interval_secs() -> f64 {
        10.0
    }

    /// Timeline built from `steps`, falling back to the default set when
    /// the stored list is empty or invalid.
    pub fn timeline(&self) -> Timeline {
        Timeline::from_values(&self.steps).unwrap_or_else(|| {
            log::warn!("No valid timesteps in settings; using defaults");
            Timeline::default()
        })
    }

    pub fn asset_paths(&self) -> AssetPaths {
        AssetPaths {
            data_root: self.data_root.clone(),
            model_root: self.model_root.clone(),
            model_name: self.model_name.clone(),
        }
    }

    pub fn advance_interval(&self) -> Duration {
        let secs = self
            .advance_interval_secs
            .clamp(Self::min_interval_secs(), Self::max_interval_secs());
        Duration::from_secs_f64(secs)
    }

    pub fn burst_interval(&self) -> Duration {
        Duration::from_millis(self.burst_interval_ms)
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        Self::from_json(&json)
    }

    /// Defaults; there is no localStorage outside the browser.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Save settings to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return,
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize viewer settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save viewer settings: {:?}", e);
        } else {
            log::info!("Saved viewer settings to localStorage");
        }
    }

    /// No-op stub for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}

    #[cfg_attr(not(any(target_arch = "wasm32", test)), allow(dead_code))]
    fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded viewer settings from localStorage");
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse viewer settings: {}", e);
                Self::default()
            }
        }
    }
}
