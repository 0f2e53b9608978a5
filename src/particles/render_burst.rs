//! Repeated repaints after a dataset lands.
//!
//! The canvas may not have its final size on the first frames after
//! startup, so a completed load schedules a short fixed series of repaint
//! passes instead of a single one. The first pass of the startup load also
//! reveals the UI.

use std::time::Duration;

pub const DEFAULT_BURST_PASSES: u32 = 3;
pub const DEFAULT_BURST_INTERVAL: Duration = Duration::from_millis(500);

/// One due repaint pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstPass {
    /// Zero-based pass number
    pub pass: u32,
    /// Whether this pass should reveal the UI
    pub reveal: bool,
}

/// Fixed series of delayed repaint passes.
#[derive(Debug, Clone)]
pub struct RenderBurst {
    passes: u32,
    interval: Duration,
    next_pass: u32,
    next_at: Option<Duration>,
    reveal: bool,
}

impl Default for RenderBurst {
    fn default() -> Self {
        Self::new(DEFAULT_BURST_PASSES, DEFAULT_BURST_INTERVAL)
    }
}

impl RenderBurst {
    pub fn new(passes: u32, interval: Duration) -> Self {
        Self {
            passes,
            interval,
            next_pass: 0,
            next_at: None,
            reveal: false,
        }
    }

    pub fn set_timing(&mut self, passes: u32, interval: Duration) {
        self.passes = passes;
        self.interval = interval;
    }

    /// Restarts the burst. The first pass is due one interval from `now`.
    ///
    /// A pending reveal carries over a restart so a quick second load
    /// cannot swallow the startup reveal.
    pub fn start(&mut self, now: Duration, reveal: bool) {
        self.next_pass = 0;
        self.reveal |= reveal;
        self.next_at = if self.passes > 0 {
            Some(now + self.interval)
        } else {
            None
        };
    }

    /// Time of the next pass, for scheduling a repaint.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.next_at
    }

    /// Returns the pass due at `now`, if any, and schedules the following one.
    pub fn poll(&mut self, now: Duration) -> Option<BurstPass> {
        let due = self.next_at?;
        if now < due {
            return None;
        }

        let pass = BurstPass {
            pass: self.next_pass,
            reveal: self.reveal,
        };
        self.reveal = false;
        self.next_pass += 1;
        self.next_at = if self.next_pass < self.passes {
            Some(now + self.interval)
        } else {
            None
        };

        Some(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_three_passes_at_fixed_interval() {
        let mut burst = RenderBurst::default();
        burst.start(ms(0), false);

        assert_eq!(burst.poll(ms(499)), None);
        assert_eq!(burst.poll(ms(500)).map(|p| p.pass), Some(0));
        assert_eq!(burst.next_deadline(), Some(ms(1000)));
        assert_eq!(burst.poll(ms(1000)).map(|p| p.pass), Some(1));
        assert_eq!(burst.poll(ms(1500)).map(|p| p.pass), Some(2));
        assert_eq!(burst.next_deadline(), None);
        assert_eq!(burst.poll(ms(5000)), None);
    }

    #[test]
    fn test_reveal_only_on_first_pass() {
        let mut burst = RenderBurst::default();
        burst.start(ms(0), true);

        assert!(burst.poll(ms(500)).unwrap().reveal);
        assert!(!burst.poll(ms(1000)).unwrap().reveal);
    }

    #[test]
    fn test_restart_keeps_pending_reveal() {
        let mut burst = RenderBurst::default();
        burst.start(ms(0), true);
        burst.start(ms(200), false);

        let pass = burst.poll(ms(700)).unwrap();
        assert_eq!(pass.pass, 0);
        assert!(pass.reveal);
    }

    #[test]
    fn test_zero_passes_is_inert() {
        let mut burst = RenderBurst::new(0, ms(500));
        burst.start(ms(0), true);
        assert_eq!(burst.next_deadline(), None);
        assert_eq!(burst.poll(ms(1000)), None);
    }
}
