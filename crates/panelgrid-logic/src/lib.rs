//! Pure tile-formation logic for panelgrid.
//!
//! Display cells sit on an integer lattice, each facing one of four
//! horizontal directions. Adjacent cells that face the same way are grouped
//! into the largest rectangle that fits (up to 10×10 by default), and
//! regrouped whenever a cell is placed or removed.
//!
//! Nothing here owns the cells. A host hands in a [`store::CellStore`] and
//! the tiling passes read orientations from it and write group metadata back.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assignment`] | `form_group` / `dissolve_and_reform` entry points |
//! | [`config`] | Tile size limit and config validation |
//! | [`constants`] | Default size limit, validation categories |
//! | [`group`] | Per-cell tile metadata and in-tile offsets |
//! | [`lattice`] | Lattice positions and unit directions |
//! | [`orientation`] | Facing → column/row axis mapping |
//! | [`partition`] | Connected-component split of a position set |
//! | [`scanner`] | Capped BFS over same-facing neighbours |
//! | [`solver`] | Largest rectangle on a dense occupancy grid |
//! | [`store`] | Backing-store trait and an in-memory store |
//! | [`validate`] | Tiling invariant checks over a snapshot |

pub mod assignment;
pub mod config;
pub mod constants;
pub mod group;
pub mod lattice;
pub mod orientation;
pub mod partition;
pub mod scanner;
pub mod solver;
pub mod store;
pub mod validate;
