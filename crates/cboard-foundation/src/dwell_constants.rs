//! Shared dwell timing constants.
//!
//! Every tile on a board uses the same values unless a [`DwellConfig`]
//! overrides them.
//!
//! [`DwellConfig`]: crate::dwell::DwellConfig

/// Sustained hover time, in milliseconds, that activates a tile.
pub const DWELL_THRESHOLD_MS: u64 = 1000;

/// Longest pointer absence, in milliseconds, that keeps partial dwell progress.
///
/// Re-entering within this window resumes the countdown; a longer absence
/// starts it over.
pub const CLEAR_WINDOW_MS: u64 = 300;

/// Height of a full dwell indicator, as a percentage of the tile height.
pub const DWELL_INDICATOR_MAX_HEIGHT_PERCENT: f32 = 80.0;
