use cboard_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Pointer (mouse or gaze cursor) appeared over the board surface.
    Enter,
    Move,
    /// Pointer left the board surface entirely.
    Exit,
    Down,
    Up,
    Cancel,
}

/// Pointer sample in board coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn moved(position: Point) -> Self {
        Self::new(PointerEventKind::Move, position)
    }

    pub fn exit(position: Point) -> Self {
        Self::new(PointerEventKind::Exit, position)
    }

    /// True for events after which the pointer position no longer means anything.
    pub fn ends_hover(&self) -> bool {
        matches!(self.kind, PointerEventKind::Exit | PointerEventKind::Cancel)
    }
}
