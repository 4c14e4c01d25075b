//! Tile group metadata stamped onto every member cell.
//!
//! There is no standalone tile object: a tile exists only as the identical
//! `TileGroup` value carried by each of its cells.

use crate::lattice::LatticePos;
use crate::orientation::{axis_distance, column_axis, Orientation};
use serde::{Deserialize, Serialize};

/// Group assignment for one cell: which tile it belongs to and the tile's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGroup {
    /// Top-left cell as seen by the viewer.
    pub master: LatticePos,
    /// Columns, along the orientation's column axis.
    pub width: u32,
    /// Rows, counted downward from the master.
    pub height: u32,
}

impl TileGroup {
    pub fn new(master: LatticePos, width: u32, height: u32) -> Self {
        Self {
            master,
            width,
            height,
        }
    }

    /// A 1×1 group mastered by the cell itself.
    pub fn singleton(pos: LatticePos) -> Self {
        Self::new(pos, 1, 1)
    }

    pub fn is_singleton(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn is_master(&self, pos: LatticePos) -> bool {
        self.master == pos
    }

    /// (column, row) of `pos` inside this tile, `(0, 0)` at the master.
    ///
    /// `None` when `pos` lies outside the rectangle or off the tile's plane.
    pub fn local_offset(&self, pos: LatticePos, orientation: Orientation) -> Option<(u32, u32)> {
        let depth_axis = orientation.facing().axis();
        if pos.coord(depth_axis) != self.master.coord(depth_axis) {
            return None;
        }
        let col = axis_distance(self.master, pos, column_axis(orientation));
        let row = self.master.y - pos.y;
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as u32, row as u32);
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// Every position covered by this tile, row-major from the master.
    pub fn member_positions(&self, orientation: Orientation) -> Vec<LatticePos> {
        let col_axis = column_axis(orientation);
        let mut out = Vec::with_capacity(self.area() as usize);
        for r in 0..self.height as i32 {
            for c in 0..self.width as i32 {
                out.push(self.master.offset(col_axis, c).with_y(self.master.y - r));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_is_one_by_one() {
        let p = LatticePos::new(2, 3, 4);
        let g = TileGroup::singleton(p);
        assert!(g.is_singleton());
        assert!(g.is_master(p));
        assert_eq!(g.area(), 1);
        assert_eq!(g.local_offset(p, Orientation::East), Some((0, 0)));
    }

    #[test]
    fn local_offset_south_facing() {
        // South-facing: columns run East (+X), rows run down from master.
        let g = TileGroup::new(LatticePos::new(0, 5, 0), 3, 2);
        assert_eq!(
            g.local_offset(LatticePos::new(2, 4, 0), Orientation::South),
            Some((2, 1))
        );
        assert_eq!(g.local_offset(LatticePos::new(3, 5, 0), Orientation::South), None);
        assert_eq!(g.local_offset(LatticePos::new(-1, 5, 0), Orientation::South), None);
        assert_eq!(g.local_offset(LatticePos::new(0, 6, 0), Orientation::South), None);
        assert_eq!(g.local_offset(LatticePos::new(0, 3, 0), Orientation::South), None);
        // Off-plane.
        assert_eq!(g.local_offset(LatticePos::new(1, 5, 1), Orientation::South), None);
    }

    #[test]
    fn local_offset_north_facing_runs_west() {
        let g = TileGroup::new(LatticePos::new(0, 0, 0), 2, 1);
        assert_eq!(
            g.local_offset(LatticePos::new(-1, 0, 0), Orientation::North),
            Some((1, 0))
        );
        assert_eq!(g.local_offset(LatticePos::new(1, 0, 0), Orientation::North), None);
    }

    #[test]
    fn member_positions_cover_rectangle() {
        let g = TileGroup::new(LatticePos::new(0, 10, 7), 3, 2);
        let members = g.member_positions(Orientation::East);
        assert_eq!(members.len(), 6);
        assert_eq!(members[0], g.master);
        // East-facing: columns run North (−Z).
        assert_eq!(members[1], LatticePos::new(0, 10, 6));
        assert_eq!(members[5], LatticePos::new(0, 9, 5));
        for m in &members {
            assert!(g.local_offset(*m, Orientation::East).is_some());
        }
    }
}
