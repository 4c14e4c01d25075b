//! Tiling constants shared by the logic crate, the engine, and the harness.

/// Largest tile edge, in cells, along either the column or the row axis.
pub const MAX_TILE_SIZE: u32 = 10;

/// Upper bound accepted by config validation for `max_size`.
///
/// The solver's dense grid and the scan cap both grow with the square of
/// this value.
pub const MAX_TILE_SIZE_LIMIT: u32 = 64;

/// Validation categories reported by [`crate::validate`].
pub mod categories {
    pub const GROUP_SIZE: &str = "group_size";
    pub const RECTANGLE: &str = "rectangle";
    pub const MASTER: &str = "master_placement";
    pub const COVERAGE: &str = "coverage";
}
