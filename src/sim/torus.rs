//! Coordinate arithmetic on a wrap-around N x N grid
//!
//! Coordinates are `(row, col)` pairs held in `[0, size)`. Displacements are
//! returned as `IVec2` with `x` = row delta and `y` = column delta.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Build a coordinate, wrapping both axes onto the grid
    pub fn wrapped(row: i32, col: i32, size: i32) -> Self {
        Self {
            row: wrap(row, size),
            col: wrap(col, size),
        }
    }

    /// Offset by `(d_row, d_col)` and wrap
    pub fn offset(self, d_row: i32, d_col: i32, size: i32) -> Self {
        Self::wrapped(self.row + d_row, self.col + d_col, size)
    }

    /// Unit step in `direction`, wrapped
    pub fn step(self, direction: Direction, size: i32) -> Self {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row, d_col, size)
    }

    /// True if the coordinate lies inside a `size` x `size` grid
    pub fn in_grid(self, size: i32) -> bool {
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Movement direction for a unit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// `(d_row, d_col)` for one step. Rows grow downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Inclusive rectangle of cells, `min` to `max` on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    pub fn new(min: Coord, max: Coord) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.min.row..=self.max.row).contains(&coord.row)
            && (self.min.col..=self.max.col).contains(&coord.col)
    }
}

/// Wrap `n` into `[0, size)`; correct for negative `n`
#[inline]
pub fn wrap(n: i32, size: i32) -> i32 {
    n.rem_euclid(size)
}

/// Wrap one axis of a displacement onto the shortest signed path.
/// Exactly half the grid keeps its original sign.
#[inline]
fn shortest_axis(d: i32, size: i32) -> i32 {
    if 2 * d.abs() > size { d - d.signum() * size } else { d }
}

/// Shortest signed displacement from `a` to `b` on the torus
pub fn minimal_displacement(size: i32, a: Coord, b: Coord) -> IVec2 {
    IVec2::new(
        shortest_axis(b.row - a.row, size),
        shortest_axis(b.col - a.col, size),
    )
}

/// Euclidean length of the minimal displacement
pub fn torus_distance(size: i32, a: Coord, b: Coord) -> f32 {
    minimal_displacement(size, a, b).as_vec2().length()
}
