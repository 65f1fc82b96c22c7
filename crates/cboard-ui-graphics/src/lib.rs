//! Pure math/data for cboard tiles
//!
//! Geometry primitives used for hit testing and the color type used for
//! tile borders and backgrounds.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::{Color, ColorParseError};
    pub use crate::geometry::{Point, Rect, Size};
}
