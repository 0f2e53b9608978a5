//! Window focus tracking and auto-pause.

use super::playback::PlaybackController;
use std::time::Duration;

/// Pauses playback when the window loses focus and resumes it on refocus,
/// but only when the pause was caused by the blur.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    focused: bool,
    was_auto_paused_by_blur: bool,
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self {
            focused: true,
            was_auto_paused_by_blur: false,
        }
    }
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_auto_paused_by_blur(&self) -> bool {
        self.was_auto_paused_by_blur
    }

    /// Feeds the current focus flag; acts on edges only.
    pub fn observe(&mut self, focused: bool, playback: &mut PlaybackController, now: Duration) {
        if focused == self.focused {
            return;
        }
        self.focused = focused;

        if focused {
            self.handle_focus(playback, now);
        } else {
            self.handle_blur(playback);
        }
    }

    pub fn handle_blur(&mut self, playback: &mut PlaybackController) {
        if playback.is_playing() {
            log::debug!("Window lost focus; pausing playback");
            playback.pause();
            self.was_auto_paused_by_blur = true;
        }
    }

    pub fn handle_focus(&mut self, playback: &mut PlaybackController, now: Duration) {
        if self.was_auto_paused_by_blur {
            log::debug!("Window regained focus; resuming playback");
            self.was_auto_paused_by_blur = false;
            playback.play(now);
        }
    }

    /// A user play/pause overrides any pending auto-resume.
    pub fn note_user_toggle(&mut self) {
        self.was_auto_paused_by_blur = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Timeline;
    use crate::state::playback::DEFAULT_ADVANCE_INTERVAL;

    fn playback() -> PlaybackController {
        PlaybackController::new(Timeline::default(), DEFAULT_ADVANCE_INTERVAL)
    }

    #[test]
    fn test_blur_pauses_and_focus_resumes() {
        let mut playback = playback();
        let mut focus = FocusTracker::new();
        playback.play(Duration::ZERO);

        focus.observe(false, &mut playback, Duration::from_secs(1));
        assert!(!playback.is_playing());
        assert!(focus.was_auto_paused_by_blur());
        assert_eq!(playback.pending_timer_count(), 0);

        focus.observe(true, &mut playback, Duration::from_secs(2));
        assert!(playback.is_playing());
        assert!(!focus.was_auto_paused_by_blur());
        assert_eq!(playback.pending_timer_count(), 1);
    }

    #[test]
    fn test_user_pause_is_not_overridden_by_focus() {
        let mut playback = playback();
        let mut focus = FocusTracker::new();
        playback.play(Duration::ZERO);

        focus.note_user_toggle();
        playback.toggle_play_pause(Duration::from_secs(1));

        focus.observe(false, &mut playback, Duration::from_secs(2));
        focus.observe(true, &mut playback, Duration::from_secs(3));

        assert!(!playback.is_playing());
    }

    #[test]
    fn test_user_toggle_while_blurred_clears_resume() {
        let mut playback = playback();
        let mut focus = FocusTracker::new();
        playback.play(Duration::ZERO);

        focus.handle_blur(&mut playback);
        focus.note_user_toggle();
        focus.handle_focus(&mut playback, Duration::from_secs(1));

        assert!(!playback.is_playing());
    }

    #[test]
    fn test_repeated_flags_are_not_edges() {
        let mut playback = playback();
        let mut focus = FocusTracker::new();
        playback.play(Duration::ZERO);

        focus.observe(true, &mut playback, Duration::ZERO);
        assert!(playback.is_playing());

        focus.observe(false, &mut playback, Duration::ZERO);
        focus.observe(false, &mut playback, Duration::ZERO);
        assert!(focus.was_auto_paused_by_blur());
        assert!(!focus.focused);
    }
}
