pub mod hover;
pub mod types;

pub use hover::{HoverTracker, HoverTransition};
pub use types::{PointerEvent, PointerEventKind};

pub mod prelude {
    pub use super::hover::{HoverTracker, HoverTransition};
    pub use super::types::{PointerEvent, PointerEventKind};
}
