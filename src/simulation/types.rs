//! Core types for the grid traffic simulation
//!
//! Value types shared by every other simulation module.

use std::fmt;

/// A grid intersection, identified by its (row, col) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub row: usize,
    pub col: usize,
}

impl Node {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A unique identifier for a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub u64);

/// Stable ordinal of a directed link
///
/// Assigned at topology construction; indexes the dense per-link
/// buffer array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// A car traveling the grid
///
/// Owned by exactly one link buffer at any instant; moving between
/// buffers is always an exclusive transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    /// Tick at which the car entered the grid
    pub entered_at: u64,
}

impl Car {
    pub fn new(id: CarId, entered_at: u64) -> Self {
        Self { id, entered_at }
    }
}

/// A cardinal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Directions in clockwise order, so turning is modular arithmetic
pub const CLOCKWISE: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    fn clockwise_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Rotate by `steps` positions on the clockwise ring (negative = left)
    pub fn rotated(self, steps: i8) -> Direction {
        let idx = self.clockwise_index() as i8 + steps;
        CLOCKWISE[idx.rem_euclid(CLOCKWISE.len() as i8) as usize]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        };
        f.write_str(label)
    }
}

/// A turn outcome at an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

impl Turn {
    /// The travel direction that results from taking this turn while
    /// approaching in `approach`.
    pub fn apply(self, approach: Direction) -> Direction {
        match self {
            Turn::Straight => approach,
            Turn::Left => approach.rotated(-1),
            Turn::Right => approach.rotated(1),
        }
    }
}
