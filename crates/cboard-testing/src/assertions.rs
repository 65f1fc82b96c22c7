//! Assertion helpers for dwell and tile tests.

use cboard_foundation::DwellPhase;
use cboard_ui::Tile;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_dwell_phase(tile: &Tile, expected: DwellPhase, msg: &str) {
    let actual = tile.dwell().phase();
    assert_eq!(
        actual,
        expected,
        "{}: tile {} ({}) expected {:?}, got {:?}",
        msg,
        tile.id(),
        tile.label(),
        expected,
        actual
    );
}

/// Assert the progress stored on a tile, in milliseconds.
pub fn assert_accumulated(tile: &Tile, expected: u64, msg: &str) {
    let actual = tile.dwell().accumulated_millis();
    assert_eq!(
        actual,
        expected,
        "{}: tile {} expected {} ms of dwell progress, got {}",
        msg,
        tile.id(),
        expected,
        actual
    );
}
