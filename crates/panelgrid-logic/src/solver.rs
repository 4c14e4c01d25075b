//! Largest axis-aligned rectangle inside a connected cell set.
//!
//! Cells are projected onto a dense occupancy grid in (column, row) space.
//! Grid row 0 is the highest world `y`, so rows count downward the way a
//! viewer reads the display. Every set cell is tried as a top-left corner
//! with every height up to the size cap; the running width shrinks to the
//! shortest run seen so far.
//!
//! Ties go to the first rectangle found in scan order (row-major, then
//! increasing height): a candidate only replaces the best when its area is
//! strictly greater.

use crate::group::TileGroup;
use crate::lattice::{Direction, LatticePos};
use crate::orientation::{axis_distance, column_axis, Orientation};
use serde::{Deserialize, Serialize};

/// A rectangle in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl GridRect {
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// The winning tile for a cell set: its group and the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub group: TileGroup,
    /// Row-major from the master.
    pub members: Vec<LatticePos>,
}

/// Dense boolean occupancy of a cell set in (row, column) grid space.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    reference: LatticePos,
    column_axis: Direction,
    min_col: i32,
    max_row: i32,
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Project `cells` onto a grid. `None` for an empty slice.
    ///
    /// Columns are measured from the first cell along `orientation`'s
    /// column axis; rows from the highest `y`.
    pub fn from_cells(cells: &[LatticePos], orientation: Orientation) -> Option<Self> {
        let &reference = cells.first()?;
        let col_axis = column_axis(orientation);

        let mut min_col = i32::MAX;
        let mut max_col = i32::MIN;
        let mut min_row = i32::MAX;
        let mut max_row = i32::MIN;
        for &cell in cells {
            let col = axis_distance(reference, cell, col_axis);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            min_row = min_row.min(cell.y);
            max_row = max_row.max(cell.y);
        }

        let rows = (max_row - min_row + 1) as usize;
        let cols = (max_col - min_col + 1) as usize;
        let mut grid = vec![false; rows * cols];
        for &cell in cells {
            let r = (max_row - cell.y) as usize;
            let c = (axis_distance(reference, cell, col_axis) - min_col) as usize;
            grid[r * cols + c] = true;
        }

        Some(Self {
            reference,
            column_axis: col_axis,
            min_col,
            max_row,
            rows,
            cols,
            cells: grid,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// False outside the grid.
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// World position of grid cell (row, col).
    pub fn position(&self, row: usize, col: usize) -> LatticePos {
        self.reference
            .offset(self.column_axis, col as i32 + self.min_col)
            .with_y(self.max_row - row as i32)
    }

    /// Consecutive set cells in `row` starting at `col`, at most `limit`.
    fn run_length(&self, row: usize, col: usize, limit: usize) -> usize {
        let mut run = 0;
        while run < limit && self.is_set(row, col + run) {
            run += 1;
        }
        run
    }

    /// Largest rectangle of set cells with both edges at most `max_size`.
    pub fn largest_rectangle(&self, max_size: u32) -> Option<GridRect> {
        let max_size = max_size as usize;
        let mut best: Option<GridRect> = None;
        let mut best_area = 0;

        for r in 0..self.rows {
            for c in 0..self.cols {
                if !self.is_set(r, c) {
                    continue;
                }
                let mut width = max_size;
                for height in 1..=max_size.min(self.rows - r) {
                    width = self.run_length(r + height - 1, c, width);
                    if width == 0 {
                        break;
                    }
                    let area = width * height;
                    if area > best_area {
                        best_area = area;
                        best = Some(GridRect {
                            row: r,
                            col: c,
                            width,
                            height,
                        });
                    }
                }
            }
        }

        best
    }
}

/// Pick the best tile for a connected cell set.
///
/// `None` means no rectangle of positive area exists (only for an empty
/// set or a zero `max_size`); the caller then treats every cell as a
/// singleton. Cells outside the returned rectangle are not part of the
/// placement.
pub fn solve(
    cells: &[LatticePos],
    orientation: Orientation,
    max_size: u32,
) -> Option<TilePlacement> {
    let grid = OccupancyGrid::from_cells(cells, orientation)?;
    let rect = grid.largest_rectangle(max_size)?;
    let group = TileGroup::new(
        grid.position(rect.row, rect.col),
        rect.width as u32,
        rect.height as u32,
    );
    Some(TilePlacement {
        group,
        members: group.member_positions(orientation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// South-facing: column axis is +X, so (col, row) maps straight to (x, y).
    fn p(col: i32, row: i32) -> LatticePos {
        LatticePos::new(col, row, 0)
    }

    #[test]
    fn empty_set_has_no_placement() {
        assert_eq!(solve(&[], Orientation::South, 10), None);
    }

    #[test]
    fn zero_cap_has_no_placement() {
        assert_eq!(solve(&[p(0, 0)], Orientation::South, 0), None);
    }

    #[test]
    fn single_cell() {
        let t = solve(&[p(3, 4)], Orientation::South, 10).unwrap();
        assert_eq!(t.group, TileGroup::singleton(p(3, 4)));
        assert_eq!(t.members, vec![p(3, 4)]);
    }

    #[test]
    fn grid_row_zero_is_top() {
        let grid = OccupancyGrid::from_cells(&[p(0, 0), p(1, 2)], Orientation::South).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 2);
        assert!(grid.is_set(0, 1));
        assert!(grid.is_set(2, 0));
        assert!(!grid.is_set(0, 0));
        assert!(!grid.is_set(5, 5));
        assert_eq!(grid.position(0, 1), p(1, 2));
        assert_eq!(grid.position(2, 0), p(0, 0));
    }

    #[test]
    fn reference_cell_does_not_change_result() {
        let a = [p(0, 0), p(1, 0), p(0, 1), p(1, 1), p(2, 0)];
        let mut b = a;
        b.reverse();
        assert_eq!(
            solve(&a, Orientation::South, 10),
            solve(&b, Orientation::South, 10)
        );
    }

    #[test]
    fn square_beats_strip() {
        let t = solve(
            &[p(0, 0), p(1, 0), p(0, 1), p(1, 1), p(2, 0)],
            Orientation::South,
            10,
        )
        .unwrap();
        assert_eq!(t.group, TileGroup::new(p(0, 1), 2, 2));
        assert_eq!(t.members, vec![p(0, 1), p(1, 1), p(0, 0), p(1, 0)]);
    }

    #[test]
    fn ties_go_to_first_in_scan_order() {
        // Two disjoint-in-row 1×2 candidates: the upper-left one wins.
        //   row y=1: X . X
        //   row y=0: X . X
        let t = solve(&[p(0, 0), p(0, 1), p(2, 0), p(2, 1)], Orientation::South, 10).unwrap();
        assert_eq!(t.group, TileGroup::new(p(0, 1), 1, 2));

        // Horizontal 2×1 found at height 1 beats the later vertical 1×2.
        //   y=1: X X
        //   y=0: . X
        let t = solve(&[p(0, 1), p(1, 1), p(1, 0)], Orientation::South, 10).unwrap();
        assert_eq!(t.group, TileGroup::new(p(0, 1), 2, 1));
    }

    #[test]
    fn width_shrinks_with_height() {
        //   y=2: X X X X
        //   y=1: X X
        //   y=0: X X
        #[rustfmt::skip]
        let cells = [
            p(0, 2), p(1, 2), p(2, 2), p(3, 2),
            p(0, 1), p(1, 1),
            p(0, 0), p(1, 0),
        ];
        let t = solve(&cells, Orientation::South, 10).unwrap();
        assert_eq!(t.group, TileGroup::new(p(0, 2), 2, 3));
    }

    #[test]
    fn cap_applies_to_both_edges() {
        let wide: Vec<LatticePos> = (0..15).map(|x| p(x, 0)).collect();
        let t = solve(&wide, Orientation::South, 10).unwrap();
        assert_eq!((t.group.width, t.group.height), (10, 1));
        assert_eq!(t.group.master, p(0, 0));

        let tall: Vec<LatticePos> = (0..15).map(|y| p(0, y)).collect();
        let t = solve(&tall, Orientation::South, 10).unwrap();
        assert_eq!((t.group.width, t.group.height), (1, 10));
        assert_eq!(t.group.master, p(0, 14));
    }

    #[test]
    fn north_facing_master_is_eastmost() {
        // North-facing: viewer's right is West, so the left-most column is
        // the highest X.
        let cells = [
            LatticePos::new(0, 0, 0),
            LatticePos::new(1, 0, 0),
            LatticePos::new(0, 1, 0),
            LatticePos::new(1, 1, 0),
        ];
        let t = solve(&cells, Orientation::North, 10).unwrap();
        assert_eq!(t.group, TileGroup::new(LatticePos::new(1, 1, 0), 2, 2));
    }

    #[test]
    fn members_are_inside_input() {
        let cells: Vec<LatticePos> = (0..7)
            .flat_map(|x| (0..5).map(move |y| p(x, y)))
            .filter(|q| !(q.x == 3 && q.y == 2))
            .collect();
        let t = solve(&cells, Orientation::South, 10).unwrap();
        for m in &t.members {
            assert!(cells.contains(m));
        }
        assert_eq!(t.members.len() as u32, t.group.area());
    }
}
