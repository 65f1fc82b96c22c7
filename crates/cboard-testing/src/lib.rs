//! Testing utilities and harness for cboard

pub mod assertions;
pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::testing::*;
}
