//! Timestep playback state machine.
//!
//! Playback walks the ordered timeline on a fixed cadence. Each displayed
//! step schedules exactly one advance timer; pausing cancels the queue and
//! every fired timer re-checks the phase before acting, so nothing advances
//! after `pause()` returns.

use super::timer::{TimerHandle, TimerQueue};
use crate::particles::{Timeline, Timestep};
use std::cmp::Ordering;
use std::time::Duration;

/// Delay between automatic timestep advances.
pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_millis(2500);

/// Shortest accepted advance interval.
pub const MIN_ADVANCE_INTERVAL: Duration = Duration::from_millis(100);

/// Playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Stopped,
    /// Loop position of the advancement loop. Positions past the end of
    /// the timeline mean the loop halted without re-arming.
    Playing { index: usize },
}

/// Which glyph the play/pause control shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAffordance {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy)]
struct AdvanceTimer {
    /// Step that was displayed when this timer was scheduled
    expected: Timestep,
}

/// Owns the slider value, the play/pause phase and advance scheduling.
pub struct PlaybackController {
    timeline: Timeline,
    phase: PlaybackPhase,
    slider_value: f64,
    interval: Duration,
    timers: TimerQueue<AdvanceTimer>,
    loop_timer: Option<TimerHandle>,
    load_request: Option<Timestep>,
}

impl PlaybackController {
    pub fn new(timeline: Timeline, interval: Duration) -> Self {
        let slider_value = timeline.first().value();
        Self {
            timeline,
            phase: PlaybackPhase::Stopped,
            slider_value,
            interval: interval.max(MIN_ADVANCE_INTERVAL),
            timers: TimerQueue::new(),
            loop_timer: None,
            load_request: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Playing { .. })
    }

    pub fn affordance(&self) -> PlaybackAffordance {
        if self.is_playing() {
            PlaybackAffordance::Pause
        } else {
            PlaybackAffordance::Play
        }
    }

    /// Raw slider position. May sit between valid timesteps after a drag.
    pub fn slider_value(&self) -> f64 {
        self.slider_value
    }

    /// Timestep the slider currently resolves to.
    pub fn current_step(&self) -> Option<Timestep> {
        self.timeline.resolve(self.slider_value)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the advance cadence. Applies from the next scheduled advance.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_ADVANCE_INTERVAL);
    }

    #[cfg(test)]
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// When the next advance is due, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Moves the slider without a change notification and queues a load
    /// for the resolved step. Used to position playback at startup.
    pub fn seek(&mut self, value: f64) {
        self.slider_value = self.clamp(value);
        if let Some(step) = self.current_step() {
            self.request_load(step);
        }
    }

    /// Takes the pending dataset load, if any.
    ///
    /// Requests made between two calls collapse into the latest one.
    pub fn take_load_request(&mut self) -> Option<Timestep> {
        self.load_request.take()
    }

    pub fn play(&mut self, now: Duration) {
        if self.is_playing() {
            return;
        }

        let index = self
            .current_step()
            .and_then(|step| self.timeline.index_of(step))
            .unwrap_or(self.timeline.len() + 1);
        log::debug!("Playback started at loop position {}", index);

        self.phase = PlaybackPhase::Playing { index };
        self.run_loop(index, now);
    }

    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }

        self.phase = PlaybackPhase::Stopped;
        self.timers.cancel_all();
        self.loop_timer = None;
        log::debug!("Playback paused at {:.2}", self.slider_value);
    }

    pub fn toggle_play_pause(&mut self, now: Duration) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Handles a user-initiated slider change.
    ///
    /// The resolved step is loaded regardless of play state. While playing
    /// the loop restarts at the new step so the cadence begins from zero.
    pub fn on_slider_change(&mut self, value: f64, now: Duration) {
        self.slider_value = self.clamp(value);

        match self.current_step() {
            Some(step) => self.request_load(step),
            None => log::debug!("Slider value {:.2} resolves to no timestep", value),
        }

        if self.is_playing() {
            self.pause();
            self.play(now);
        }
    }

    /// Fires every advance timer due at `now`.
    pub fn tick(&mut self, now: Duration) {
        if self.timers.is_empty() {
            return;
        }
        while let Some((handle, timer)) = self.timers.pop_due(now) {
            self.on_advance_due(handle, timer, now);
        }
    }

    fn on_advance_due(&mut self, handle: TimerHandle, timer: AdvanceTimer, now: Duration) {
        if self.loop_timer == Some(handle) {
            self.loop_timer = None;
        }

        if !self.is_playing() {
            log::debug!("Ignoring advance timer fired after pause");
            return;
        }

        let Some(actual) = self.current_step() else {
            log::warn!("Slider no longer resolves to a timestep; playback halted");
            self.phase = PlaybackPhase::Playing {
                index: self.timeline.len() + 1,
            };
            return;
        };
        let Some(actual_index) = self.timeline.index_of(actual) else {
            return;
        };

        if actual != timer.expected {
            log::debug!(
                "Slider moved from {} to {} during the interval; resuming there",
                timer.expected,
                actual
            );
            self.run_loop(actual_index, now);
        } else {
            self.run_loop(actual_index + 1, now);
        }
    }

    /// Displays the step at loop position `index` and schedules the next advance.
    fn run_loop(&mut self, index: usize, now: Duration) {
        let len = self.timeline.len();
        let display_index = match index.cmp(&len) {
            Ordering::Less => index,
            Ordering::Equal => 0,
            Ordering::Greater => {
                log::warn!("Playback loop halted at position {} of {}", index, len);
                self.phase = PlaybackPhase::Playing { index };
                return;
            }
        };

        let Some(step) = self.timeline.get(display_index) else {
            return;
        };

        self.phase = PlaybackPhase::Playing {
            index: display_index,
        };
        self.display(step);

        if let Some(previous) = self.loop_timer.take() {
            self.timers.cancel(previous);
        }
        self.loop_timer = Some(
            self.timers
                .schedule(now + self.interval, AdvanceTimer { expected: step }),
        );
    }

    fn display(&mut self, step: Timestep) {
        self.slider_value = step.value();
        self.request_load(step);
    }

    fn request_load(&mut self, step: Timestep) {
        self.load_request = Some(step);
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.slider_value;
        }
        value.clamp(self.timeline.min_value(), self.timeline.max_value())
    }
}
