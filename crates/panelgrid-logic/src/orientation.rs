//! Orientation → (column axis, row axis) mapping.
//!
//! A display cell faces one of the four horizontal directions. Tiles are laid
//! out in the plane perpendicular to that facing: columns run toward the
//! viewer's right, rows run straight up.
//!
//! | Facing | Column axis (viewer's right) |
//! |--------|------------------------------|
//! | North  | West                         |
//! | South  | East                         |
//! | East   | North                        |
//! | West   | South                        |

use crate::lattice::{Direction, LatticePos};
use serde::{Deserialize, Serialize};

/// Horizontal facing of a display cell. Up and Down are not valid facings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Lattice direction the cell's face points toward.
    pub fn facing(self) -> Direction {
        match self {
            Orientation::North => Direction::North,
            Orientation::South => Direction::South,
            Orientation::East => Direction::East,
            Orientation::West => Direction::West,
        }
    }

    /// `None` for `Up` / `Down`.
    pub fn from_direction(dir: Direction) -> Option<Orientation> {
        match dir {
            Direction::North => Some(Orientation::North),
            Direction::South => Some(Orientation::South),
            Direction::East => Some(Orientation::East),
            Direction::West => Some(Orientation::West),
            Direction::Up | Direction::Down => None,
        }
    }
}

/// The viewer's right when looking at a cell with this facing.
pub fn column_axis(orientation: Orientation) -> Direction {
    match orientation {
        Orientation::North => Direction::West,
        Orientation::South => Direction::East,
        Orientation::East => Direction::North,
        Orientation::West => Direction::South,
    }
}

/// Rows always run up the world's vertical axis.
pub fn row_axis(_orientation: Orientation) -> Direction {
    Direction::Up
}

/// Signed displacement from `from` to `to` measured along `axis`.
pub fn axis_distance(from: LatticePos, to: LatticePos, axis: Direction) -> i32 {
    let delta = to.coord(axis.axis()) - from.coord(axis.axis());
    if axis.is_positive() {
        delta
    } else {
        -delta
    }
}

/// The four in-plane neighbours of `pos`, in probe order:
/// +column, −column, +row, −row.
pub fn in_plane_neighbors(pos: LatticePos, orientation: Orientation) -> [LatticePos; 4] {
    let col = column_axis(orientation);
    let row = row_axis(orientation);
    [
        pos.relative(col),
        pos.relative(col.opposite()),
        pos.relative(row),
        pos.relative(row.opposite()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_axis_is_perpendicular_to_facing() {
        for o in Orientation::ALL {
            let col = column_axis(o);
            assert_ne!(col.axis(), o.facing().axis(), "{o:?}");
            assert_ne!(col, Direction::Up);
            assert_ne!(col, Direction::Down);
        }
    }

    #[test]
    fn column_axis_table() {
        assert_eq!(column_axis(Orientation::North), Direction::West);
        assert_eq!(column_axis(Orientation::South), Direction::East);
        assert_eq!(column_axis(Orientation::East), Direction::North);
        assert_eq!(column_axis(Orientation::West), Direction::South);
    }

    #[test]
    fn opposite_facings_have_opposite_columns() {
        assert_eq!(
            column_axis(Orientation::North),
            column_axis(Orientation::South).opposite()
        );
        assert_eq!(
            column_axis(Orientation::East),
            column_axis(Orientation::West).opposite()
        );
    }

    #[test]
    fn row_axis_is_up() {
        for o in Orientation::ALL {
            assert_eq!(row_axis(o), Direction::Up);
        }
    }

    #[test]
    fn axis_distance_sign() {
        let a = LatticePos::new(0, 0, 0);
        let b = LatticePos::new(3, -2, 5);
        assert_eq!(axis_distance(a, b, Direction::East), 3);
        assert_eq!(axis_distance(a, b, Direction::West), -3);
        assert_eq!(axis_distance(a, b, Direction::Up), -2);
        assert_eq!(axis_distance(a, b, Direction::Down), 2);
        assert_eq!(axis_distance(a, b, Direction::South), 5);
        assert_eq!(axis_distance(a, b, Direction::North), -5);
    }

    #[test]
    fn axis_distance_inverts_with_offset() {
        let origin = LatticePos::new(4, 4, 4);
        for dir in Direction::ALL {
            let moved = origin.offset(dir, 7);
            assert_eq!(axis_distance(origin, moved, dir), 7);
            assert_eq!(axis_distance(moved, origin, dir), -7);
        }
    }

    #[test]
    fn vertical_directions_are_not_orientations() {
        assert_eq!(Orientation::from_direction(Direction::Up), None);
        assert_eq!(Orientation::from_direction(Direction::Down), None);
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_direction(o.facing()), Some(o));
        }
    }

    #[test]
    fn neighbors_stay_in_plane() {
        let p = LatticePos::new(0, 0, 0);
        let n = in_plane_neighbors(p, Orientation::North);
        assert_eq!(n[0], LatticePos::new(-1, 0, 0));
        assert_eq!(n[1], LatticePos::new(1, 0, 0));
        assert_eq!(n[2], LatticePos::new(0, 1, 0));
        assert_eq!(n[3], LatticePos::new(0, -1, 0));
        assert!(n.iter().all(|q| q.z == 0));
    }
}
