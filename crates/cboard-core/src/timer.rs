//! Single-threaded one-shot timers.
//!
//! [`TimerRuntime`] owns the queue; widgets hold a weak [`TimerHandle`] and
//! keep each scheduled callback alive through a [`TimerRegistration`], which
//! cancels the timer when dropped.

use crate::clock::{Clock, Millis};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

pub type TimerId = u64;

struct TimerEntry {
    id: TimerId,
    deadline: Millis,
    callback: Box<dyn FnOnce()>,
}

struct TimerRuntimeInner {
    next_id: Cell<TimerId>,
    timers: RefCell<SmallVec<[TimerEntry; 8]>>,
}

impl TimerRuntimeInner {
    fn register(&self, deadline: Millis, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.timers.borrow_mut().push(TimerEntry {
            id,
            deadline,
            callback,
        });
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut timers = self.timers.borrow_mut();
        match timers.iter().position(|entry| entry.id == id) {
            Some(index) => {
                timers.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, id: TimerId) -> bool {
        self.timers.borrow().iter().any(|entry| entry.id == id)
    }

    /// Removes the earliest timer due at `now` that was scheduled before `limit`.
    fn take_due(&self, now: Millis, limit: TimerId) -> Option<TimerEntry> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now && entry.id < limit)
            .min_by_key(|(_, entry)| (entry.deadline, entry.id))
            .map(|(index, _)| index)?;
        Some(timers.remove(index))
    }
}

/// Owner of the timer queue. Dropping it discards every pending callback.
pub struct TimerRuntime {
    clock: Rc<dyn Clock>,
    inner: Rc<TimerRuntimeInner>,
}

impl TimerRuntime {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Rc::new(clock),
            inner: Rc::new(TimerRuntimeInner {
                next_id: Cell::new(1),
                timers: RefCell::new(SmallVec::new()),
            }),
        }
    }

    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            clock: Rc::clone(&self.clock),
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn now_millis(&self) -> Millis {
        self.clock.now_millis()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Earliest deadline in the queue. Hosts use it to decide how long to sleep.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.inner
            .timers
            .borrow()
            .iter()
            .map(|entry| entry.deadline)
            .min()
    }

    /// Fires every timer whose deadline has passed, earliest first.
    ///
    /// Timers scheduled by a callback during this pump wait for the next one,
    /// so a callback that reschedules itself with zero delay cannot spin.
    /// Returns the number of callbacks invoked.
    pub fn pump(&self) -> usize {
        let limit = self.inner.next_id.get();
        let mut fired = 0;
        loop {
            let now = self.clock.now_millis();
            let Some(entry) = self.inner.take_due(now, limit) else {
                break;
            };
            log::trace!(
                "firing timer {} (deadline {}, now {})",
                entry.id,
                entry.deadline,
                now
            );
            (entry.callback)();
            fired += 1;
        }
        fired
    }
}

impl fmt::Debug for TimerRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRuntime")
            .field("now_millis", &self.now_millis())
            .field("pending", &self.pending_count())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

/// Weak handle to a [`TimerRuntime`]. The clock stays readable after the
/// runtime is gone; scheduling against a dropped runtime is a no-op.
#[derive(Clone)]
pub struct TimerHandle {
    clock: Rc<dyn Clock>,
    inner: Weak<TimerRuntimeInner>,
}

impl TimerHandle {
    pub fn now_millis(&self) -> Millis {
        self.clock.now_millis()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Schedules `callback` to run `delay` milliseconds from now.
    pub fn schedule(&self, delay: Millis, callback: impl FnOnce() + 'static) -> TimerRegistration {
        let deadline = self.now_millis().saturating_add(delay);
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.register(deadline, Box::new(callback));
                log::debug!("scheduled timer {id} for {deadline} (in {delay} ms)");
                TimerRegistration::new(self.clone(), id)
            }
            None => {
                log::debug!("timer runtime gone; dropping callback due at {deadline}");
                TimerRegistration::inactive(self.clone())
            }
        }
    }

    /// Removes a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.cancel(id))
            .unwrap_or(false)
    }

    fn contains(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.contains(id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("now_millis", &self.now_millis())
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Scoped ownership of one pending timer; dropping it cancels the timer.
pub struct TimerRegistration {
    handle: TimerHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    fn new(handle: TimerHandle, id: TimerId) -> Self {
        Self {
            handle,
            id: Some(id),
        }
    }

    fn inactive(handle: TimerHandle) -> Self {
        Self { handle, id: None }
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// True while the timer is still queued.
    pub fn is_active(&self) -> bool {
        self.id.is_some_and(|id| self.handle.contains(id))
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            if self.handle.cancel(id) {
                log::debug!("cancelled timer {id}");
            }
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            if self.handle.cancel(id) {
                log::debug!("cancelled timer {id} on drop");
            }
        }
    }
}

impl fmt::Debug for TimerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRegistration")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
