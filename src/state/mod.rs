//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! State is organized into logical groupings that correspond to different
//! areas of functionality.

mod focus;
mod playback;
mod settings;
mod timer;
pub mod url_state;

pub use focus::FocusTracker;
pub use playback::{PlaybackAffordance, PlaybackController, PlaybackPhase};
pub use settings::ViewerSettings;

use crate::graph::GraphState;
use crate::particles::{DatasetLoadResult, RenderBurst, Timestep};
use crate::scene::{PointCloud, Viewport};
use std::time::Duration;

/// Root application state containing all sub-states.
pub struct AppState {
    /// Play/pause phase, slider value and advance timers
    pub playback: PlaybackController,

    /// Window focus auto-pause
    pub focus: FocusTracker,

    /// Camera, lights, model and particles
    pub viewport: Viewport,

    /// Taxonomy graph, links and pins
    pub graph: GraphState,

    pub settings: ViewerSettings,

    /// Repaint passes after a dataset lands
    pub render_burst: RenderBurst,

    /// Application status message displayed in top bar
    pub status_message: String,

    /// Timestep of the particles on screen
    pub displayed_step: Option<Timestep>,

    /// Dataset request currently in flight
    pub loading_step: Option<Timestep>,

    /// Fetch and parse time of the last dataset
    pub last_fetch_latency_ms: Option<f64>,

    /// Whether the startup dataset has been shown
    pub revealed: bool,

    /// Time since app start at the beginning of the current frame
    pub frame_time: Duration,
}

impl AppState {
    pub fn new(settings: ViewerSettings) -> Self {
        let playback = PlaybackController::new(settings.timeline(), settings.advance_interval());
        let render_burst = RenderBurst::new(settings.burst_passes, settings.burst_interval());

        Self {
            playback,
            focus: FocusTracker::new(),
            viewport: Viewport::new(),
            graph: GraphState::default(),
            settings,
            render_burst,
            status_message: "Loading...".to_string(),
            displayed_step: None,
            loading_step: None,
            last_fetch_latency_ms: None,
            revealed: false,
            frame_time: Duration::ZERO,
        }
    }

    /// Play/pause from the button or keyboard.
    ///
    /// A deliberate toggle cancels any pending resume-on-focus.
    pub fn user_toggle_playback(&mut self) {
        self.focus.note_user_toggle();
        self.playback.toggle_play_pause(self.frame_time);
    }

    /// Slider moved by the user.
    pub fn user_scrub(&mut self, value: f64) {
        self.playback.on_slider_change(value, self.frame_time);
    }

    /// Applies a finished dataset load.
    ///
    /// A new dataset replaces the point cloud and starts the render burst.
    /// A failure keeps the previous cloud on screen and reports the step.
    pub fn apply_dataset_result(&mut self, result: DatasetLoadResult, now: Duration) {
        match result {
            DatasetLoadResult::Success {
                dataset,
                fetch_latency_ms,
            } => {
                let step = dataset.step;
                if dataset.is_empty() {
                    log::warn!("Dataset {} has no particles", step);
                }
                self.status_message =
                    format!("Showing {} particles at t = {}", dataset.len(), step);
                self.displayed_step = Some(step);
                self.last_fetch_latency_ms = Some(fetch_latency_ms);
                self.viewport
                    .set_points(PointCloud::from_dataset(dataset, self.settings.point_size));
                self.render_burst.start(now, !self.revealed);
            }
            DatasetLoadResult::Error { step, message } => {
                self.status_message = format!("Failed to load particles {}: {}", step, message);
                // Lift the overlay so the failure is visible
                if !self.revealed {
                    self.render_burst.start(now, true);
                }
            }
        }
    }

    /// Pushes edited settings into the live components and persists them.
    pub fn apply_settings(&mut self) {
        self.playback.set_interval(self.settings.advance_interval());
        self.viewport.set_point_size(self.settings.point_size);
        self.render_burst
            .set_timing(self.settings.burst_passes, self.settings.burst_interval());
        self.settings.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ParticleDataset;
    use glam::Vec3;

    #[test]
    fn test_user_toggle_clears_auto_resume() {
        let mut state = AppState::new(ViewerSettings::default());
        state.playback.play(Duration::ZERO);

        state.focus.observe(false, &mut state.playback, Duration::ZERO);
        assert!(state.focus.was_auto_paused_by_blur());

        state.frame_time = Duration::from_secs(1);
        state.user_toggle_playback();
        assert!(state.playback.is_playing());
        assert!(!state.focus.was_auto_paused_by_blur());

        state.user_toggle_playback();
        state.focus.observe(true, &mut state.playback, Duration::from_secs(2));
        assert!(!state.playback.is_playing());
    }

    #[test]
    fn test_apply_settings_updates_interval() {
        let mut state = AppState::new(ViewerSettings::default());
        state.settings.advance_interval_secs = 5.0;
        state.apply_settings();
        assert_eq!(state.playback.interval(), Duration::from_secs(5));
    }

    fn dataset(value: f64, points: usize) -> ParticleDataset {
        ParticleDataset {
            step: Timestep::from_value(value).unwrap(),
            points: vec![Vec3::ONE; points],
        }
    }

    #[test]
    fn test_dataset_success_replaces_cloud_and_reveals() {
        let mut state = AppState::new(ViewerSettings::default());
        let now = Duration::from_secs(1);

        state.apply_dataset_result(
            DatasetLoadResult::Success {
                dataset: dataset(0.05, 3),
                fetch_latency_ms: 12.0,
            },
            now,
        );
        state.apply_dataset_result(
            DatasetLoadResult::Success {
                dataset: dataset(0.06, 2),
                fetch_latency_ms: 8.0,
            },
            now,
        );

        let cloud = state.viewport.points().unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.step.label(), "0.06");
        assert_eq!(state.displayed_step.map(|s| s.label()), Some("0.06".into()));
        assert_eq!(state.last_fetch_latency_ms, Some(8.0));
        assert_eq!(state.status_message, "Showing 2 particles at t = 0.06");

        let due = state.render_burst.next_deadline().unwrap();
        assert!(state.render_burst.poll(due).unwrap().reveal);
    }

    #[test]
    fn test_dataset_error_keeps_previous_cloud() {
        let mut state = AppState::new(ViewerSettings::default());
        let now = Duration::from_secs(1);
        state.apply_dataset_result(
            DatasetLoadResult::Success {
                dataset: dataset(0.05, 3),
                fetch_latency_ms: 5.0,
            },
            now,
        );
        state.revealed = true;
        while let Some(due) = state.render_burst.next_deadline() {
            state.render_burst.poll(due);
        }

        state.apply_dataset_result(
            DatasetLoadResult::Error {
                step: Timestep::from_value(0.06).unwrap(),
                message: "HTTP status 404".to_string(),
            },
            now,
        );

        assert!(state.status_message.starts_with("Failed to load particles 0.06"));
        assert_eq!(state.viewport.points().map(|p| p.len()), Some(3));
        assert_eq!(state.displayed_step.map(|s| s.label()), Some("0.05".into()));
        // Already revealed: no new burst
        assert_eq!(state.render_burst.next_deadline(), None);
    }

    #[test]
    fn test_startup_error_lifts_overlay() {
        let mut state = AppState::new(ViewerSettings::default());

        state.apply_dataset_result(
            DatasetLoadResult::Error {
                step: Timestep::from_value(0.05).unwrap(),
                message: "boom".to_string(),
            },
            Duration::ZERO,
        );

        assert!(state.viewport.points().is_none());
        let due = state.render_burst.next_deadline().unwrap();
        assert!(state.render_burst.poll(due).unwrap().reveal);
    }

    #[test]
    fn test_user_scrub_requests_load() {
        let mut state = AppState::new(ViewerSettings::default());
        state.user_scrub(0.12);
        assert_eq!(
            state.playback.take_load_request().map(|s| s.label()),
            Some("0.12".into())
        );
    }
}
