//! Split a position set into connected components.
//!
//! Used after a removal, where one connected region may fall apart into
//! several. Adjacency is the same 4-neighbour rule as the scanner, but BFS
//! only walks positions in the input, never the live store.
//!
//! Ordering is fixed: each component is seeded by the earliest unclaimed
//! input position, components come out in seed order, and members come out
//! in BFS discovery order.

use crate::lattice::LatticePos;
use crate::orientation::{in_plane_neighbors, Orientation};
use std::collections::{HashSet, VecDeque};

/// Partition `positions` into 4-connected components in `orientation`'s plane.
pub fn partition(positions: &[LatticePos], orientation: Orientation) -> Vec<Vec<LatticePos>> {
    let pool: HashSet<LatticePos> = positions.iter().copied().collect();
    let mut claimed: HashSet<LatticePos> = HashSet::with_capacity(pool.len());
    let mut components = Vec::new();

    for &seed in positions {
        if !claimed.insert(seed) {
            continue;
        }
        let mut component = vec![seed];
        let mut queue = VecDeque::new();
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            for next in in_plane_neighbors(current, orientation) {
                if pool.contains(&next) && claimed.insert(next) {
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }
        components.push(component);
    }

    components
}
