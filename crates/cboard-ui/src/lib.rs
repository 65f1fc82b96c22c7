//! Board widgets for cboard.
//!
//! A [`Board`] owns a set of [`Tile`]s, routes pointer motion to them and
//! lets a [`SequentialScanner`] step through them for switch access.

mod board;
mod scanner;
mod tile;

pub use board::{Board, HoverDispatch};
pub use scanner::{Scanner, SequentialScanner};
pub use tile::{DwellIndicator, Tile, TileId, TileStyle, TileVariant};

pub use cboard_foundation::{
    DwellConfig, DwellPhase, HoverTransition, PointerEvent, PointerEventKind,
};
pub use cboard_ui_graphics::{Color, Point, Rect, Size};

pub mod prelude {
    pub use crate::board::Board;
    pub use crate::scanner::{Scanner, SequentialScanner};
    pub use crate::tile::{Tile, TileStyle, TileVariant};
    pub use cboard_foundation::prelude::*;
    pub use cboard_ui_graphics::prelude::*;
}
