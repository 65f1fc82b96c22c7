//! Deterministic board harness.
//!
//! [`BoardTestRule`] owns a board, a [`ManualClock`] and the timer runtime
//! behind them. Time only moves when the test says so, and advancing the
//! clock fires every timer at its own deadline, in order, so callbacks see
//! the same `now` they would in a real event loop.

use cboard_core::{ManualClock, Millis, TimerHandle, TimerRuntime};
use cboard_foundation::PointerEvent;
use cboard_ui::{Board, HoverDispatch, PointerEventKind, Tile, TileId};
use cboard_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub struct BoardTestRule {
    clock: ManualClock,
    runtime: TimerRuntime,
    board: Board,
    pointer: Option<Point>,
}

impl BoardTestRule {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let runtime = TimerRuntime::new(clock.clone());
        let board = Board::new(runtime.handle());
        Self {
            clock,
            runtime,
            board,
            pointer: None,
        }
    }

    pub fn timers(&self) -> TimerHandle {
        self.runtime.handle()
    }

    pub fn now(&self) -> Millis {
        self.runtime.now_millis()
    }

    pub fn runtime(&self) -> &TimerRuntime {
        &self.runtime
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn mount(&mut self, tile: Tile) {
        self.board.mount(tile);
    }

    pub fn unmount(&mut self, id: TileId) -> bool {
        self.board.unmount(id)
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        self.board
            .tile(id)
            .unwrap_or_else(|| panic!("tile {id} is not mounted"))
    }

    /// Advances the clock to `at`, firing due timers at their deadlines.
    /// Returns how many timers fired.
    pub fn advance_to(&mut self, at: Millis) -> usize {
        assert!(
            at >= self.now(),
            "cannot move time backwards from {} to {at}",
            self.now()
        );
        let mut fired = 0;
        while let Some(deadline) = self.runtime.next_deadline() {
            if deadline > at {
                break;
            }
            self.clock.set(deadline.max(self.now()));
            fired += self.runtime.pump();
        }
        self.clock.set(at);
        fired += self.runtime.pump();
        fired
    }

    pub fn advance_by(&mut self, delta: Millis) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn move_to(&mut self, point: Point) -> HoverDispatch {
        self.pointer = Some(point);
        self.board.dispatch(PointerEvent::moved(point))
    }

    /// Moves the pointer to the centre of a mounted tile.
    pub fn hover_tile(&mut self, id: TileId) -> HoverDispatch {
        let center = self.tile(id).bounds().center();
        self.move_to(center)
    }

    /// Moves the pointer off the board surface.
    pub fn leave_board(&mut self) -> HoverDispatch {
        let position = self.pointer.take().unwrap_or(Point::ZERO);
        self.board.dispatch(PointerEvent::exit(position))
    }

    pub fn click_at(&mut self, point: Point) {
        self.pointer = Some(point);
        self.board
            .dispatch(PointerEvent::new(PointerEventKind::Down, point));
        self.board
            .dispatch(PointerEvent::new(PointerEventKind::Up, point));
    }
}

impl Default for BoardTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts invocations of the handlers it hands out.
#[derive(Clone, Debug, Default)]
pub struct ClickCounter {
    count: Rc<Cell<u32>>,
}

impl ClickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> impl Fn() + 'static {
        let count = Rc::clone(&self.count);
        move || count.set(count.get() + 1)
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }
}
