//! Board: the set of tiles currently on screen.
//!
//! The board turns raw pointer events into per-tile hover transitions and
//! clicks. Unmounting a tile disposes it, which cancels a dwell that was
//! about to fire.

use crate::tile::{Tile, TileId};
use cboard_core::TimerHandle;
use cboard_foundation::{HoverTransition, PointerEvent, PointerEventKind};
use cboard_ui_graphics::Point;
use smallvec::SmallVec;

/// Hover transitions produced by one pointer event, exits first.
pub type HoverDispatch = SmallVec<[(TileId, HoverTransition); 2]>;

pub struct Board {
    timers: TimerHandle,
    tiles: Vec<Tile>,
    pressed: Option<TileId>,
}

impl Board {
    pub fn new(timers: TimerHandle) -> Self {
        Self {
            timers,
            tiles: Vec::new(),
            pressed: None,
        }
    }

    /// Handle for constructing tiles that share this board's timers.
    pub fn timers(&self) -> &TimerHandle {
        &self.timers
    }

    /// Adds a tile, replacing (and disposing) any tile with the same id.
    pub fn mount(&mut self, tile: Tile) {
        let id = tile.id();
        match self.tiles.iter().position(|existing| existing.id() == id) {
            Some(index) => {
                log::debug!("remounting tile {id}");
                let mut previous = std::mem::replace(&mut self.tiles[index], tile);
                previous.dispose();
            }
            None => self.tiles.push(tile),
        }
    }

    /// Removes and disposes a tile. Returns `false` if no tile had that id.
    pub fn unmount(&mut self, id: TileId) -> bool {
        let Some(index) = self.tiles.iter().position(|tile| tile.id() == id) else {
            return false;
        };
        let mut tile = self.tiles.remove(index);
        tile.dispose();
        if self.pressed == Some(id) {
            self.pressed = None;
        }
        log::debug!("unmounted tile {id}");
        true
    }

    /// Disposes every tile, e.g. when navigating to another board.
    pub fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.dispose();
        }
        self.tiles.clear();
        self.pressed = None;
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Topmost tile under `point`; later mounts draw above earlier ones.
    pub fn tile_at(&self, point: Point) -> Option<&Tile> {
        self.tiles
            .iter()
            .rev()
            .find(|tile| tile.bounds().contains(point))
    }

    /// Routes a pointer event to the tiles.
    ///
    /// Only the topmost tile under the pointer is hovered, so a pointer on a
    /// shared edge or over overlapping tiles dwells on one tile. Exits are
    /// delivered before the enter, so moving straight from one tile onto its
    /// neighbour leaves the first before entering the second.
    pub fn dispatch(&mut self, event: PointerEvent) -> HoverDispatch {
        let mut transitions = HoverDispatch::new();

        if event.ends_hover() {
            for tile in &mut self.tiles {
                if let Some(transition) = tile.pointer_left_surface() {
                    transitions.push((tile.id(), transition));
                }
            }
            self.pressed = None;
            return transitions;
        }

        let position = event.position;
        let target = self.tile_at(position).map(Tile::id);
        for tile in &mut self.tiles {
            if tile.is_hovered() && Some(tile.id()) != target {
                if let Some(transition) = tile.set_hovered(false) {
                    transitions.push((tile.id(), transition));
                }
            }
        }
        let target_tile =
            target.and_then(|id| self.tiles.iter_mut().find(|tile| tile.id() == id));
        if let Some(tile) = target_tile {
            if let Some(transition) = tile.set_hovered(true) {
                transitions.push((tile.id(), transition));
            }
        }

        match event.kind {
            PointerEventKind::Down => {
                self.pressed = self.tile_at(position).map(Tile::id);
            }
            PointerEventKind::Up => {
                let released = self.tile_at(position).map(Tile::id);
                if let (Some(pressed), Some(released)) = (self.pressed.take(), released) {
                    if pressed == released {
                        if let Some(tile) = self.tile(pressed) {
                            tile.click();
                        }
                    }
                }
            }
            _ => {}
        }

        transitions
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        self.clear();
    }
}
