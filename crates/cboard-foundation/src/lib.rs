//! Interaction building blocks shared by cboard widgets.

pub mod dwell;
pub mod dwell_constants;
pub mod input;

pub use dwell::{
    DwellActivator, DwellCallback, DwellConfig, DwellConfigError, DwellPhase, DwellState,
};
pub use input::{HoverTracker, HoverTransition, PointerEvent, PointerEventKind};

pub mod prelude {
    pub use crate::dwell::{DwellActivator, DwellConfig, DwellPhase};
    pub use crate::input::prelude::*;
}
