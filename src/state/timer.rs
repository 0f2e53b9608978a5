//! Cancellable scheduled tasks polled from the update loop.
//!
//! Time is a `Duration` since app start so the queue can be driven by
//! synthetic clocks in tests.

use std::time::Duration;

/// Handle identifying one scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    due: Duration,
    payload: T,
}

/// Queue of delayed payloads.
///
/// Entries fire in due order; entries with equal due times fire in
/// scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, payload: T) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            due,
            payload,
        });
        handle
    }

    /// Removes one entry. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due time among pending entries.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Removes and returns the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.handle.0))
            .map(|(idx, _)| idx)?;

        let entry = self.entries.remove(idx);
        Some((entry.handle, entry.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(v: f64) -> Duration {
        Duration::from_secs_f64(v)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(secs(2.0), "b");
        queue.schedule(secs(1.0), "a");
        queue.schedule(secs(2.0), "c");

        assert_eq!(queue.next_due(), Some(secs(1.0)));
        assert!(queue.pop_due(secs(0.5)).is_none());
        assert_eq!(queue.pop_due(secs(3.0)).map(|(_, p)| p), Some("a"));
        assert_eq!(queue.pop_due(secs(3.0)).map(|(_, p)| p), Some("b"));
        assert_eq!(queue.pop_due(secs(3.0)).map(|(_, p)| p), Some("c"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_single_and_all() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(secs(1.0), 1);
        let b = queue.schedule(secs(1.0), 2);

        assert!(queue.cancel(a));
        assert!(!queue.cancel(a));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(secs(1.0)).map(|(h, _)| h), Some(b));
        queue.schedule(secs(2.0), 3);

        queue.cancel_all();
        assert!(queue.is_empty());
        assert!(queue.pop_due(secs(10.0)).is_none());
        assert_eq!(queue.next_due(), None);
    }
}
