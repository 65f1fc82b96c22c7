//! Hover enter/exit detection from raw pointer motion.
//!
//! Platforms deliver pointer positions, not per-element enter/leave
//! notifications. A [`HoverTracker`] per element turns successive positions
//! into boundary crossings, so the dwell behavior sees exactly one enter and
//! one leave per hover span.

use cboard_ui_graphics::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Entered,
    Exited,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    hovered: bool,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Feeds a pointer position; returns a transition only when the pointer
    /// crosses the element's boundary.
    pub fn update(&mut self, bounds: Rect, position: Point) -> Option<HoverTransition> {
        self.set_hovered(bounds.contains(position))
    }

    /// Sets the hover state decided by an outside hit test, e.g. a board
    /// that hovers only its topmost tile under the pointer.
    pub fn set_hovered(&mut self, inside: bool) -> Option<HoverTransition> {
        match (self.hovered, inside) {
            (false, true) => {
                self.hovered = true;
                Some(HoverTransition::Entered)
            }
            (true, false) => {
                self.hovered = false;
                Some(HoverTransition::Exited)
            }
            _ => None,
        }
    }

    /// Pointer left the surface or the gesture was cancelled.
    pub fn pointer_left(&mut self) -> Option<HoverTransition> {
        if self.hovered {
            self.hovered = false;
            Some(HoverTransition::Exited)
        } else {
            None
        }
    }
}
