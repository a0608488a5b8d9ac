//! Cancellable periodic timers driven by the frame loop
//!
//! egui has no timer callbacks: the host polls a [`Ticker`] once per frame
//! and asks for the next repaint at [`Ticker::next_deadline`]. A stopped
//! ticker never fires, so stopping it when its owner goes away is all the
//! cleanup there is.

use std::time::{Duration, Instant};

/// At most this many ticks are reported per poll, so a long stall (window
/// dragged, machine asleep) does not replay a burst of game steps.
pub const MAX_CATCH_UP_TICKS: u32 = 3;

#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// A stopped ticker with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Start (or restart) ticking; the first tick is one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Change the period. A running ticker keeps its pending deadline.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Number of ticks that elapsed since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut ticks = 0;
        while next <= now {
            ticks += 1;
            next += self.interval;
            if ticks == MAX_CATCH_UP_TICKS {
                // Drop the backlog and resume from now.
                next = now + self.interval;
                break;
            }
        }
        self.next = Some(next);
        ticks
    }

    /// Time until the next tick, for scheduling a repaint.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_stopped_ticker_never_fires() {
        let mut t = Ticker::new(MS * 100);
        let now = Instant::now();
        assert_eq!(t.poll(now + MS * 10_000), 0);
        assert!(t.next_deadline(now).is_none());
    }

    #[test]
    fn test_ticks_once_per_interval() {
        let start = Instant::now();
        let mut t = Ticker::new(MS * 150);
        t.start(start);
        assert_eq!(t.poll(start + MS * 149), 0);
        assert_eq!(t.poll(start + MS * 150), 1);
        assert_eq!(t.poll(start + MS * 200), 0);
        assert_eq!(t.poll(start + MS * 300), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let start = Instant::now();
        let mut t = Ticker::new(MS * 10);
        t.start(start);
        assert_eq!(t.poll(start + MS * 1000), MAX_CATCH_UP_TICKS);
        assert_eq!(t.next_deadline(start + MS * 1000), Some(MS * 10));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let start = Instant::now();
        let mut t = Ticker::new(MS * 50);
        t.start(start);
        t.stop();
        assert!(!t.is_running());
        assert_eq!(t.poll(start + MS * 500), 0);
    }

    #[test]
    fn test_set_interval_applies_after_pending_tick() {
        let start = Instant::now();
        let mut t = Ticker::new(MS * 100);
        t.start(start);
        t.set_interval(MS * 20);
        assert_eq!(t.poll(start + MS * 100), 1);
        assert_eq!(t.poll(start + MS * 120), 1);
    }
}
