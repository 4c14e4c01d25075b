//! The two tiling entry points: re-tile after a placement, and re-tile
//! after a removal.
//!
//! Both are synchronous and run to completion. The host must serialize
//! calls; a multi-threaded host needs its own lock around them.

use crate::config::TilingConfig;
use crate::group::TileGroup;
use crate::lattice::LatticePos;
use crate::orientation::Orientation;
use crate::partition::partition;
use crate::scanner::scan_region;
use crate::solver::{solve, TilePlacement};
use crate::store::CellStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a tiling pass wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetileReport {
    /// Cells returned by the connectivity scan (including a removed cell).
    pub scanned: usize,
    /// The scan stopped at the cap; part of the region was left untouched.
    pub truncated: bool,
    /// One winning rectangle per component.
    pub tiles: Vec<TilePlacement>,
    /// Scanned cells demoted to 1×1 groups.
    pub singletons: Vec<LatticePos>,
}

impl RetileReport {
    /// Total cells that received a group write.
    pub fn written(&self) -> usize {
        self.tiles.iter().map(|t| t.members.len()).sum::<usize>() + self.singletons.len()
    }
}

/// Re-tile the region around a freshly placed cell.
///
/// The cell at `placed` must already be visible to the store. If it is
/// missing or faces another way, nothing is written.
pub fn form_group<S: CellStore + ?Sized>(
    store: &mut S,
    placed: LatticePos,
    orientation: Orientation,
    config: &TilingConfig,
) -> Result<RetileReport, S::Error> {
    let region = scan_region(&*store, placed, orientation, config.scan_cap())?;
    let cells = region.cells;
    let mut report = RetileReport {
        scanned: cells.len(),
        truncated: region.truncated,
        ..RetileReport::default()
    };
    if cells.is_empty() {
        return Ok(report);
    }
    tile_component(store, &cells, orientation, config.max_size, &mut report)?;
    Ok(report)
}

/// Re-tile what remains of a region once the cell at `removed` goes away.
///
/// Call while the cell is still visible to the store; it is excluded here
/// and never written. Survivors are split into connected components, and
/// each component is tiled on its own.
pub fn dissolve_and_reform<S: CellStore + ?Sized>(
    store: &mut S,
    removed: LatticePos,
    orientation: Orientation,
    config: &TilingConfig,
) -> Result<RetileReport, S::Error> {
    let region = scan_region(&*store, removed, orientation, config.scan_cap())?;
    let mut cells = region.cells;
    let mut report = RetileReport {
        scanned: cells.len(),
        truncated: region.truncated,
        ..RetileReport::default()
    };
    cells.retain(|&pos| pos != removed);
    if cells.is_empty() {
        return Ok(report);
    }
    for component in partition(&cells, orientation) {
        tile_component(store, &component, orientation, config.max_size, &mut report)?;
    }
    Ok(report)
}

/// Solve one connected component and stamp the result onto the store.
fn tile_component<S: CellStore + ?Sized>(
    store: &mut S,
    cells: &[LatticePos],
    orientation: Orientation,
    max_size: u32,
    report: &mut RetileReport,
) -> Result<(), S::Error> {
    let placement = solve(cells, orientation, max_size);
    let covered: HashSet<LatticePos> = placement
        .iter()
        .flat_map(|t| t.members.iter().copied())
        .collect();

    if let Some(ref tile) = placement {
        for &member in &tile.members {
            store.write_group(member, tile.group)?;
        }
    }
    for &cell in cells {
        if !covered.contains(&cell) {
            store.write_group(cell, TileGroup::singleton(cell))?;
            report.singletons.push(cell);
        }
    }
    report.tiles.extend(placement);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn p(x: i32, y: i32) -> LatticePos {
        LatticePos::new(x, y, 0)
    }

    fn form(store: &mut MemoryStore, pos: LatticePos) -> RetileReport {
        form_group(store, pos, Orientation::South, &TilingConfig::default())
            .unwrap_or_else(|never| match never {})
    }

    fn dissolve(store: &mut MemoryStore, pos: LatticePos) -> RetileReport {
        dissolve_and_reform(store, pos, Orientation::South, &TilingConfig::default())
            .unwrap_or_else(|never| match never {})
    }

    #[test]
    fn missing_cell_is_noop() {
        let mut store = MemoryStore::filled([p(1, 1)], Orientation::South);
        let report = form(&mut store, p(0, 0));
        assert_eq!(report, RetileReport::default());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn every_scanned_cell_is_written() {
        let cells = [p(0, 0), p(1, 0), p(0, 1), p(1, 1), p(2, 0)];
        let mut store = MemoryStore::filled(cells, Orientation::South);
        let report = form(&mut store, p(2, 0));
        assert_eq!(report.scanned, 5);
        assert_eq!(report.written(), 5);
        assert_eq!(report.singletons, vec![p(2, 0)]);
        for c in cells {
            assert!(store.group_at(c).is_some(), "{c} left unassigned");
        }
    }

    #[test]
    fn removed_cell_is_never_written() {
        let cells = [p(0, 0), p(1, 0), p(2, 0)];
        let mut store = MemoryStore::filled(cells, Orientation::South);
        form(&mut store, p(0, 0));
        let before = store.group_at(p(1, 0));
        let report = dissolve(&mut store, p(1, 0));
        assert_eq!(report.scanned, 3);
        assert_eq!(store.group_at(p(1, 0)), before);
        assert_eq!(report.tiles.len(), 2);
    }

    #[test]
    fn removing_isolated_cell_writes_nothing() {
        let mut store = MemoryStore::filled([p(0, 0)], Orientation::South);
        form(&mut store, p(0, 0));
        let writes = store.write_count();
        let report = dissolve(&mut store, p(0, 0));
        assert_eq!(report.scanned, 1);
        assert_eq!(report.written(), 0);
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn truncated_flag_set_at_cap() {
        let cells: Vec<LatticePos> = (0..4).flat_map(|x| (0..4).map(move |y| p(x, y))).collect();
        let mut store = MemoryStore::filled(cells, Orientation::South);
        let config = TilingConfig::with_max_size(3);
        let report = form_group(&mut store, p(0, 0), Orientation::South, &config)
            .unwrap_or_else(|never| match never {});
        assert!(report.truncated);
        assert_eq!(report.scanned, 9);
        assert_eq!(report.written(), 9);
    }

    #[test]
    fn full_wall_at_cap_is_not_truncated() {
        let cells: Vec<LatticePos> = (0..10).flat_map(|x| (0..10).map(move |y| p(x, y))).collect();
        let mut store = MemoryStore::filled(cells, Orientation::South);
        let report = form(&mut store, p(0, 0));
        assert_eq!(report.scanned, 100);
        assert!(!report.truncated);
        assert_eq!(report.tiles.len(), 1);
        assert_eq!(report.tiles[0].group, TileGroup::new(p(0, 9), 10, 10));
        assert!(report.singletons.is_empty());
    }
}
