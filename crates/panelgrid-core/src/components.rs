//! ECS components attached to display-cell entities.
//!
//! Every cell entity carries a [`DisplayCell`]. Once a tiling pass has
//! touched it, it also carries a [`TileGroup`] (re-exported from the logic
//! crate and stored as a component as-is).

use panelgrid_logic::lattice::LatticePos;
use panelgrid_logic::orientation::Orientation;
use serde::{Deserialize, Serialize};

pub use panelgrid_logic::group::TileGroup;

/// A tileable display cell at a fixed lattice position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCell {
    pub pos: LatticePos,
    pub orientation: Orientation,
}
