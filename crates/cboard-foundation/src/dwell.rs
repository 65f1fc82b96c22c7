//! Dwell activation: sustained hover as a click substitute.
//!
//! A [`DwellActivator`] counts how long the pointer (or a gaze cursor) rests
//! over an element and fires the activation callback once the total reaches
//! the configured threshold. Progress survives brief exits: leaving and
//! re-entering within the clear window resumes the countdown, a longer
//! absence starts it over.
//!
//! ```text
//!            enter                      timer fires
//!   Idle ─────────────▶ Dwelling ─────────────────────▶ Activated
//!    ▲                     │                                │
//!    └──────── leave ──────┴──────────── leave ─────────────┘
//! ```
//!
//! All state lives in one [`DwellState`] record mutated only by the two
//! pointer handlers and the timer callback. The pending timer is held as a
//! [`TimerRegistration`], so replacing it, leaving, disposing or dropping the
//! activator all cancel it.

use crate::dwell_constants::{CLEAR_WINDOW_MS, DWELL_THRESHOLD_MS};
use cboard_core::{Millis, TimerHandle, TimerRegistration};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Zero-argument activation callback.
pub type DwellCallback = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DwellConfig {
    threshold_ms: Millis,
    clear_window_ms: Millis,
}

impl DwellConfig {
    pub fn new(threshold_ms: Millis, clear_window_ms: Millis) -> Result<Self, DwellConfigError> {
        if threshold_ms == 0 {
            return Err(DwellConfigError::ZeroThreshold);
        }
        Ok(Self {
            threshold_ms,
            clear_window_ms,
        })
    }

    pub fn threshold_ms(&self) -> Millis {
        self.threshold_ms
    }

    pub fn clear_window_ms(&self) -> Millis {
        self.clear_window_ms
    }

    pub fn with_threshold_ms(self, threshold_ms: Millis) -> Result<Self, DwellConfigError> {
        Self::new(threshold_ms, self.clear_window_ms)
    }

    /// A zero clear window means every exit discards progress.
    pub fn with_clear_window_ms(self, clear_window_ms: Millis) -> Self {
        Self {
            clear_window_ms,
            ..self
        }
    }
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            threshold_ms: DWELL_THRESHOLD_MS,
            clear_window_ms: CLEAR_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellConfigError {
    ZeroThreshold,
}

impl fmt::Display for DwellConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DwellConfigError::ZeroThreshold => {
                write!(f, "dwell threshold must be greater than zero")
            }
        }
    }
}

impl std::error::Error for DwellConfigError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DwellPhase {
    /// Pointer is elsewhere.
    Idle,
    /// Pointer is over the element and the countdown is running (or, without
    /// a callback, hover is only being tracked).
    Dwelling,
    /// The callback already fired for the current hover span.
    Activated,
}

/// Snapshot of an activator's bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DwellState {
    pub is_dwelling: bool,
    pub dwell_start: Option<Millis>,
    pub dwell_end: Option<Millis>,
    pub accumulated: Millis,
    pub has_pending_timer: bool,
    pub fired: bool,
}

#[derive(Default)]
struct DwellCore {
    is_dwelling: bool,
    dwell_start: Option<Millis>,
    dwell_end: Option<Millis>,
    accumulated: Millis,
    pending: Option<TimerRegistration>,
    fired: bool,
    disposed: bool,
    callback: Option<DwellCallback>,
}

impl DwellCore {
    fn cancel_pending(&mut self) {
        if let Some(registration) = self.pending.take() {
            registration.cancel();
        }
    }
}

pub struct DwellActivator {
    timers: TimerHandle,
    config: DwellConfig,
    core: Rc<RefCell<DwellCore>>,
}

impl DwellActivator {
    /// Tracks hover without activating anything until a callback is set.
    pub fn new(timers: TimerHandle, config: DwellConfig) -> Self {
        Self {
            timers,
            config,
            core: Rc::new(RefCell::new(DwellCore::default())),
        }
    }

    pub fn with_callback(
        timers: TimerHandle,
        config: DwellConfig,
        callback: impl Fn() + 'static,
    ) -> Self {
        let activator = Self::new(timers, config);
        activator.set_callback(Some(Rc::new(callback)));
        activator
    }

    pub fn config(&self) -> DwellConfig {
        self.config
    }

    /// Replaces the activation callback.
    ///
    /// Removing the callback cancels a running countdown; a new callback is
    /// picked up by a countdown that is already running.
    pub fn set_callback(&self, callback: Option<DwellCallback>) {
        let mut core = self.core.borrow_mut();
        if callback.is_none() {
            core.cancel_pending();
        }
        core.callback = callback;
    }

    pub fn has_callback(&self) -> bool {
        self.core.borrow().callback.is_some()
    }

    pub fn on_pointer_enter(&self) {
        let now = self.timers.now_millis();
        let mut core = self.core.borrow_mut();
        if core.disposed {
            log::trace!("pointer enter after dispose ignored");
            return;
        }
        if core.is_dwelling {
            log::trace!("duplicate pointer enter at {now} ignored");
            return;
        }

        let resumes = core
            .dwell_end
            .is_some_and(|end| now.saturating_sub(end) < self.config.clear_window_ms);
        if !resumes {
            core.accumulated = 0;
        }
        let carried = core.accumulated;

        core.cancel_pending();
        core.fired = false;
        if core.callback.is_some() {
            let remaining = self.config.threshold_ms.saturating_sub(carried);
            let weak = Rc::downgrade(&self.core);
            core.pending = Some(self.timers.schedule(remaining, move || fire(weak)));
            log::debug!("dwell started at {now}: carried {carried} ms, firing in {remaining} ms");
        }

        core.is_dwelling = true;
        core.dwell_start = Some(now);
    }

    pub fn on_pointer_leave(&self) {
        let now = self.timers.now_millis();
        let mut core = self.core.borrow_mut();
        if core.disposed {
            log::trace!("pointer leave after dispose ignored");
            return;
        }
        if !core.is_dwelling {
            log::trace!("pointer leave at {now} without a matching enter ignored");
            return;
        }

        core.is_dwelling = false;
        core.dwell_end = Some(now);
        let span = now.saturating_sub(core.dwell_start.unwrap_or(now));
        let total = core.accumulated.saturating_add(span);
        core.accumulated = if core.fired || total >= self.config.threshold_ms {
            0
        } else {
            total
        };
        core.fired = false;
        core.cancel_pending();
        log::debug!(
            "dwell left at {now} after {span} ms; progress {} ms",
            core.accumulated
        );
    }

    /// Cancels any pending activation and ignores every later event.
    pub fn dispose(&self) {
        let mut core = self.core.borrow_mut();
        if core.disposed {
            return;
        }
        core.disposed = true;
        core.is_dwelling = false;
        core.cancel_pending();
        log::debug!("dwell activator disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.core.borrow().disposed
    }

    pub fn is_dwelling(&self) -> bool {
        self.core.borrow().is_dwelling
    }

    pub fn has_pending_activation(&self) -> bool {
        self.core
            .borrow()
            .pending
            .as_ref()
            .is_some_and(TimerRegistration::is_active)
    }

    pub fn phase(&self) -> DwellPhase {
        let core = self.core.borrow();
        match (core.is_dwelling, core.fired) {
            (false, _) => DwellPhase::Idle,
            (true, false) => DwellPhase::Dwelling,
            (true, true) => DwellPhase::Activated,
        }
    }

    pub fn accumulated_millis(&self) -> Millis {
        self.core.borrow().accumulated
    }

    /// Dwell time still needed, based on progress stored at the last exit.
    pub fn remaining_millis(&self) -> Millis {
        self.config
            .threshold_ms
            .saturating_sub(self.accumulated_millis())
    }

    /// `(threshold - accumulated) / threshold`, clamped to `[0, 1]`.
    pub fn remaining_fraction(&self) -> f32 {
        fraction_of(self.remaining_millis(), self.config.threshold_ms)
    }

    /// Like [`remaining_fraction`](Self::remaining_fraction) but also counts
    /// the hover span in progress, for renderers that redraw every frame
    /// instead of running a timed animation.
    pub fn remaining_fraction_now(&self) -> f32 {
        let now = self.timers.now_millis();
        let core = self.core.borrow();
        let progress = match (core.is_dwelling, core.fired, core.dwell_start) {
            (true, false, Some(start)) => core
                .accumulated
                .saturating_add(now.saturating_sub(start)),
            _ => core.accumulated,
        };
        fraction_of(
            self.config.threshold_ms.saturating_sub(progress),
            self.config.threshold_ms,
        )
    }

    pub fn state(&self) -> DwellState {
        let core = self.core.borrow();
        DwellState {
            is_dwelling: core.is_dwelling,
            dwell_start: core.dwell_start,
            dwell_end: core.dwell_end,
            accumulated: core.accumulated,
            has_pending_timer: core
                .pending
                .as_ref()
                .is_some_and(TimerRegistration::is_active),
            fired: core.fired,
        }
    }
}

impl Drop for DwellActivator {
    fn drop(&mut self) {
        if let Ok(mut core) = self.core.try_borrow_mut() {
            core.cancel_pending();
        }
    }
}

impl fmt::Debug for DwellActivator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DwellActivator")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("state", &self.state())
            .finish()
    }
}

fn fraction_of(part: Millis, whole: Millis) -> f32 {
    if whole == 0 {
        return 0.0;
    }
    (part as f32 / whole as f32).clamp(0.0, 1.0)
}

fn fire(core: Weak<RefCell<DwellCore>>) {
    let Some(core) = core.upgrade() else {
        return;
    };
    let callback = {
        let mut core = core.borrow_mut();
        if core.disposed || !core.is_dwelling {
            return;
        }
        core.pending = None;
        core.fired = true;
        core.accumulated = 0;
        core.callback.clone()
    };
    log::debug!("dwell threshold reached; activating");
    if let Some(callback) = callback {
        callback();
    }
}

#[cfg(test)]
#[path = "tests/dwell_tests.rs"]
mod tests;
