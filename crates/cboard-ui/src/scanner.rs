//! Switch-access scanning.
//!
//! A scanner highlights tiles one after another; the user selects the
//! highlighted tile with a single switch. Tiles only see the [`Scanner`]
//! trait, so any scanning implementation can be plugged in.

use crate::board::Board;
use crate::tile::TileId;
use std::cell::Cell;

/// Capability handed to a tile when the scanner selects it.
pub trait Scanner {
    /// Return the highlight to the first element.
    fn reset(&self);
}

/// Highlights board tiles in mount order, wrapping at the end.
#[derive(Debug, Default)]
pub struct SequentialScanner {
    position: Cell<usize>,
}

impl SequentialScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position.get()
    }

    pub fn highlighted(&self, board: &Board) -> Option<TileId> {
        board.tiles().get(self.position.get()).map(|tile| tile.id())
    }

    /// Moves the highlight to the next tile and returns it.
    pub fn advance(&self, board: &Board) -> Option<TileId> {
        let len = board.len();
        if len == 0 {
            self.position.set(0);
            return None;
        }
        self.position.set((self.position.get() + 1) % len);
        self.highlighted(board)
    }

    /// Selects the highlighted tile. Returns the id of the selected tile.
    pub fn select(&self, board: &Board) -> Option<TileId> {
        let tile = board.tiles().get(self.position.get())?;
        let id = tile.id();
        log::debug!("scanner selected tile {id} at position {}", self.position.get());
        tile.on_scan_select(self);
        Some(id)
    }
}

impl Scanner for SequentialScanner {
    fn reset(&self) {
        self.position.set(0);
    }
}
