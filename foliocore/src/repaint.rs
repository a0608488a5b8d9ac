//! Repaint governor
//!
//! egui redraws on input by default and otherwise sleeps. Anything that
//! changes on its own (a game tick, the taskbar clock, an AI reply waiting
//! on its delay) has to ask for the next frame. `RepaintController`
//! collects those requests during a frame and issues a single repaint
//! request at the end of it:
//!
//! 1. `mark_needs_repaint`: something changed, paint again right away.
//! 2. `repaint_after`: paint again once this much time has passed. Several
//!    calls in one frame keep the earliest.
//! 3. `set_continuous`: keep painting at a fixed interval until turned off.
//!
//! With none of these the frame ends without scheduling anything.

use std::time::Duration;

const DEFAULT_CONTINUOUS_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug)]
pub struct RepaintController {
    continuous: bool,
    interval: Duration,
    needs_repaint: bool,
    /// Earliest requested delay for this frame.
    after: Option<Duration>,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            interval: DEFAULT_CONTINUOUS_INTERVAL,
            needs_repaint: false,
            after: None,
        }
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Ask for a frame no later than `delay` from now.
    pub fn repaint_after(&mut self, delay: Duration) {
        self.after = Some(match self.after {
            Some(current) => current.min(delay),
            None => delay,
        });
    }

    /// Call at the start of `update()`. Clears last frame's requests;
    /// continuous mode stays as it was.
    pub fn begin_frame(&mut self) {
        self.needs_repaint = false;
        self.after = None;
    }

    /// Call at the end of `update()`. Returns the delay that was requested,
    /// if any.
    pub fn end_frame(&mut self, ctx: &egui::Context) -> Option<Duration> {
        let delay = self.pending_delay();
        match delay {
            Some(Duration::ZERO) => ctx.request_repaint(),
            Some(d) => ctx.request_repaint_after(d),
            None => {}
        }
        delay
    }

    /// The delay `end_frame` would request right now.
    pub fn pending_delay(&self) -> Option<Duration> {
        if self.needs_repaint {
            return Some(Duration::ZERO);
        }
        let continuous = self.continuous.then_some(self.interval);
        match (self.after, continuous) {
            (Some(a), Some(c)) => Some(a.min(c)),
            (a, c) => a.or(c),
        }
    }
}
