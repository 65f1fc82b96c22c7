//! Millisecond clocks used by the timer runtime.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use web_time::Instant;

/// Milliseconds on a runtime clock.
pub type Millis = u64;

/// Monotonic millisecond source.
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Clock backed by [`web_time::Instant`], counting from its creation.
#[derive(Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClock")
            .field("now_millis", &self.now_millis())
            .finish()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for tests and replay.
///
/// Clones share the same time cell, so a test can keep one copy while the
/// runtime owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Moves the clock to `now`. Time never runs backwards.
    pub fn set(&self, now: Millis) {
        if now < self.now.get() {
            log::warn!(
                "ManualClock refused to move backwards from {} to {}",
                self.now.get(),
                now
            );
            return;
        }
        self.now.set(now);
    }

    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}
