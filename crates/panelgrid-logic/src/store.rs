//! The backing-store seam between tiling logic and whatever holds the cells.
//!
//! The tiling passes only ever ask two things of a store: "is there a cell
//! here, and which way does it face?" and "stamp this group onto that cell".
//! [`MemoryStore`] is a plain `HashMap` implementation for tests and tools.

use crate::group::TileGroup;
use crate::lattice::LatticePos;
use crate::orientation::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;

/// Cell lookup and group write-back, supplied by the host.
///
/// Calls are serialized by the host: nothing in this crate invokes a store
/// re-entrantly or from more than one thread.
pub trait CellStore {
    /// Failure raised by the store itself. Tiling passes never produce one;
    /// they only forward it.
    type Error;

    /// Orientation of the cell at `pos`, or `None` if there is no tileable cell.
    fn cell_at(&self, pos: LatticePos) -> Result<Option<Orientation>, Self::Error>;

    /// Overwrite the group assignment of the cell at `pos`.
    fn write_group(&mut self, pos: LatticePos, group: TileGroup) -> Result<(), Self::Error>;
}

/// Snapshot of one cell, as consumed by [`crate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub pos: LatticePos,
    pub orientation: Orientation,
    pub group: Option<TileGroup>,
}

/// One stored cell in a [`MemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCell {
    pub orientation: Orientation,
    pub group: Option<TileGroup>,
}

/// In-memory store keyed by position.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cells: HashMap<LatticePos, MemoryCell>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store where every position in `positions` holds a cell facing `orientation`.
    pub fn filled(
        positions: impl IntoIterator<Item = LatticePos>,
        orientation: Orientation,
    ) -> Self {
        let mut store = Self::new();
        for pos in positions {
            store.insert(pos, orientation);
        }
        store
    }

    /// Add (or replace) an unassigned cell.
    pub fn insert(&mut self, pos: LatticePos, orientation: Orientation) {
        self.cells.insert(
            pos,
            MemoryCell {
                orientation,
                group: None,
            },
        );
    }

    pub fn remove(&mut self, pos: LatticePos) -> Option<MemoryCell> {
        self.cells.remove(&pos)
    }

    pub fn get(&self, pos: LatticePos) -> Option<&MemoryCell> {
        self.cells.get(&pos)
    }

    pub fn group_at(&self, pos: LatticePos) -> Option<TileGroup> {
        self.cells.get(&pos).and_then(|c| c.group)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of group writes accepted since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// All cells, sorted by position.
    pub fn records(&self) -> Vec<CellRecord> {
        let mut records: Vec<CellRecord> = self
            .cells
            .iter()
            .map(|(&pos, cell)| CellRecord {
                pos,
                orientation: cell.orientation,
                group: cell.group,
            })
            .collect();
        records.sort_by_key(|r| r.pos);
        records
    }
}

impl CellStore for MemoryStore {
    type Error = Infallible;

    fn cell_at(&self, pos: LatticePos) -> Result<Option<Orientation>, Infallible> {
        Ok(self.cells.get(&pos).map(|c| c.orientation))
    }

    /// Writes to empty positions are dropped.
    fn write_group(&mut self, pos: LatticePos, group: TileGroup) -> Result<(), Infallible> {
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.group = Some(group);
            self.writes += 1;
        }
        Ok(())
    }
}
