//! Scoring module - classic line clear points
//!
//! One lock event clears 0..=4 rows; points come from [`LINE_SCORES`].
//! Counts outside the table score nothing.

use blockfall_types::LINE_SCORES;

/// Points for clearing `rows` rows in a single lock
pub fn line_clear_points(rows: usize) -> u32 {
    LINE_SCORES.get(rows).copied().unwrap_or(0)
}
