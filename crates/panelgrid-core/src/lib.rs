//! panelgrid core - display cells on an ECS world, tiled as they change.
//!
//! # Architecture
//!
//! Cells live in a `hecs` world behind [`store::CellWorld`], which implements
//! the logic crate's `CellStore` seam:
//! - **Entities**: one per display cell
//! - **Components**: [`components::DisplayCell`] and, once tiled, a `TileGroup`
//! - **Engine**: [`engine::TilingEngine`] turns placements and removals into
//!   `form_group` / `dissolve_and_reform` passes
//!
//! # Example
//!
//! ```rust
//! use panelgrid_core::prelude::*;
//!
//! let mut engine = TilingEngine::new();
//! engine.place(LatticePos::new(0, 0, 0), Orientation::South).unwrap();
//! engine.place(LatticePos::new(1, 0, 0), Orientation::South).unwrap();
//!
//! let group = engine.group_at(LatticePos::new(1, 0, 0)).unwrap();
//! assert_eq!((group.width, group.height), (2, 1));
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{CellEvent, TilingEngine};
    pub use crate::error::{EngineError, StoreError};
    pub use crate::store::CellWorld;
    pub use panelgrid_logic::config::TilingConfig;
    pub use panelgrid_logic::lattice::LatticePos;
    pub use panelgrid_logic::orientation::Orientation;
}
