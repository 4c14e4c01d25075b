//! Connectivity scan: BFS over same-orientation in-plane neighbours.

use crate::lattice::LatticePos;
use crate::orientation::{in_plane_neighbors, Orientation};
use crate::store::CellStore;
use std::collections::{HashSet, VecDeque};

/// Cells collected by [`scan_region`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Discovery order, seed first.
    pub cells: Vec<LatticePos>,
    /// A matching cell was refused because the cap was reached.
    pub truncated: bool,
}

/// Collect the cells connected to `seed` that share `orientation`.
///
/// Returns positions in discovery order, seed first. Empty when `seed` is
/// not a cell facing `orientation`. Stops admitting cells once `cap` have
/// been collected, so a region larger than the cap is only partly returned.
pub fn scan<S: CellStore + ?Sized>(
    store: &S,
    seed: LatticePos,
    orientation: Orientation,
    cap: usize,
) -> Result<Vec<LatticePos>, S::Error> {
    Ok(scan_region(store, seed, orientation, cap)?.cells)
}

/// [`scan`], also reporting whether the cap cut the region short.
///
/// A region of exactly `cap` cells is not truncated.
pub fn scan_region<S: CellStore + ?Sized>(
    store: &S,
    seed: LatticePos,
    orientation: Orientation,
    cap: usize,
) -> Result<ScanResult, S::Error> {
    if cap == 0 || store.cell_at(seed)? != Some(orientation) {
        return Ok(ScanResult::default());
    }

    let mut probed = HashSet::new();
    let mut found = vec![seed];
    let mut frontier = VecDeque::new();
    let mut truncated = false;
    probed.insert(seed);
    frontier.push_back(seed);

    'bfs: while let Some(current) = frontier.pop_front() {
        for next in in_plane_neighbors(current, orientation) {
            if !probed.insert(next) {
                continue;
            }
            if store.cell_at(next)? == Some(orientation) {
                if found.len() >= cap {
                    truncated = true;
                    break 'bfs;
                }
                found.push(next);
                frontier.push_back(next);
            }
        }
    }

    Ok(ScanResult {
        cells: found,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn p(x: i32, y: i32) -> LatticePos {
        LatticePos::new(x, y, 0)
    }

    fn run(store: &MemoryStore, seed: LatticePos, o: Orientation, cap: usize) -> Vec<LatticePos> {
        scan(store, seed, o, cap).unwrap_or_else(|never| match never {})
    }

    #[test]
    fn missing_seed_is_empty() {
        let store = MemoryStore::new();
        assert!(run(&store, p(0, 0), Orientation::South, 100).is_empty());
    }

    #[test]
    fn wrong_orientation_seed_is_empty() {
        let store = MemoryStore::filled([p(0, 0)], Orientation::North);
        assert!(run(&store, p(0, 0), Orientation::South, 100).is_empty());
    }

    #[test]
    fn finds_connected_block() {
        let store = MemoryStore::filled(
            [p(0, 0), p(1, 0), p(0, 1), p(1, 1), p(5, 5)],
            Orientation::South,
        );
        let found = run(&store, p(0, 0), Orientation::South, 100);
        assert_eq!(found.len(), 4);
        assert_eq!(found[0], p(0, 0));
        assert!(!found.contains(&p(5, 5)));
    }

    #[test]
    fn other_orientations_break_connectivity() {
        let mut store = MemoryStore::filled([p(0, 0), p(2, 0)], Orientation::South);
        store.insert(p(1, 0), Orientation::North);
        let found = run(&store, p(0, 0), Orientation::South, 100);
        assert_eq!(found, vec![p(0, 0)]);
    }

    #[test]
    fn diagonal_is_not_adjacent() {
        let store = MemoryStore::filled([p(0, 0), p(1, 1)], Orientation::South);
        assert_eq!(run(&store, p(0, 0), Orientation::South, 100).len(), 1);
    }

    #[test]
    fn depth_neighbours_are_not_adjacent() {
        // South-facing cells stacked along Z are in different planes.
        let store = MemoryStore::filled(
            [LatticePos::new(0, 0, 0), LatticePos::new(0, 0, 1)],
            Orientation::South,
        );
        assert_eq!(
            run(&store, LatticePos::ORIGIN, Orientation::South, 100).len(),
            1
        );
    }

    #[test]
    fn cap_limits_result() {
        let cells: Vec<LatticePos> = (0..20).flat_map(|x| (0..20).map(move |y| p(x, y))).collect();
        let store = MemoryStore::filled(cells, Orientation::East);
        // An East facing tiles the YZ plane, so an XY sheet only links vertically.
        assert_eq!(run(&store, p(0, 0), Orientation::East, 100).len(), 20);

        let cells: Vec<LatticePos> = (0..20)
            .flat_map(|z| (0..20).map(move |y| LatticePos::new(0, y, z)))
            .collect();
        let store = MemoryStore::filled(cells, Orientation::East);
        let found = run(&store, LatticePos::ORIGIN, Orientation::East, 100);
        assert_eq!(found.len(), 100);
        let unique: HashSet<_> = found.iter().collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn region_of_exactly_cap_is_not_truncated() {
        let cells: Vec<LatticePos> = (0..10).flat_map(|x| (0..10).map(move |y| p(x, y))).collect();
        let mut store = MemoryStore::filled(cells, Orientation::South);
        let full = scan_region(&store, p(0, 0), Orientation::South, 100)
            .unwrap_or_else(|never| match never {});
        assert_eq!(full.cells.len(), 100);
        assert!(!full.truncated);

        store.insert(p(10, 0), Orientation::South);
        let over = scan_region(&store, p(0, 0), Orientation::South, 100)
            .unwrap_or_else(|never| match never {});
        assert_eq!(over.cells.len(), 100);
        assert!(over.truncated);
    }

    #[test]
    fn scan_is_deterministic() {
        let cells: Vec<LatticePos> = (0..6).flat_map(|x| (0..4).map(move |y| p(x, y))).collect();
        let store = MemoryStore::filled(cells, Orientation::North);
        let a = run(&store, p(2, 2), Orientation::North, 100);
        let b = run(&store, p(2, 2), Orientation::North, 100);
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }
}
