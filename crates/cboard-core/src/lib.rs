//! Core time services for cboard.
//!
//! Everything here is single-threaded: timers are stored in an `Rc` owned
//! runtime and fired from the host event loop via [`TimerRuntime::pump`].

mod clock;
mod timer;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use timer::{TimerHandle, TimerId, TimerRegistration, TimerRuntime};

pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, Millis, SystemClock};
    pub use crate::timer::{TimerHandle, TimerRegistration, TimerRuntime};
}
