use core::fmt;

use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the eight compass directions around a cell.
///
/// The discriminants define the canonical iteration order (`0..8`). Anything that scans
/// neighbors must use [`Direction::ALL`] so that tie-breaks stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    /// Grid offset `(dx, dy)`; north is `y - 1`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Integer grid coordinate. This is the handle used to refer to a cell; the grid owns the
/// cell's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in `direction`, or `None` on integer overflow.
    ///
    /// This does not consult any grid; use [`GridQuery::neighbor`] to respect map bounds.
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        Some(CellCoord {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ordered cells of a walk, first step first. The starting cell is never part of the path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CellPath {
    cells: Vec<CellCoord>,
}

impl CellPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn push(&mut self, cell: CellCoord) {
        self.cells.push(cell);
    }

    pub fn last(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    pub fn into_vec(self) -> Vec<CellCoord> {
        self.cells
    }
}

impl From<Vec<CellCoord>> for CellPath {
    fn from(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }
}

/// Read-only query surface a map must expose to the planner.
///
/// Implementations must keep [`GridQuery::neighbor`] symmetric: if `b` is the neighbor of `a`
/// in direction `d`, then `a` is the neighbor of `b` in `d.opposite()`.
pub trait GridQuery {
    /// Resolve the cell under a world-space position, if any.
    fn resolve_cell(&self, world: Vec2) -> Option<CellCoord>;

    /// The adjacent cell in `direction`, or `None` at the map edge.
    fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord>;

    /// Remaining free space of `cell`. Callers only pass cells obtained from this grid.
    fn capacity(&self, cell: CellCoord) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_order_matches_index() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(Direction::from_index(i), Some(*dir));
        }
        assert_eq!(Direction::from_index(8), None);
    }

    #[test]
    fn opposite_offsets_cancel() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn step_reports_overflow() {
        let edge = CellCoord::new(i32::MAX, 0);
        assert_eq!(edge.step(Direction::East), None);
        assert_eq!(
            edge.step(Direction::West),
            Some(CellCoord::new(i32::MAX - 1, 0))
        );
    }
}
