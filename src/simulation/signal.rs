//! Signal phasing
//!
//! Every intersection shares one phase clock: the first `ns_green`
//! ticks of each cycle are north/south green, the rest east/west.
//! There is no per-intersection offset or coordination; that is a
//! known simplification of this model.

use super::types::Direction;

/// The approach axis currently showing green
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl Axis {
    /// Whether an approach in `dir` may proceed under this phase
    pub fn permits(self, dir: Direction) -> bool {
        match self {
            Axis::NorthSouth => matches!(dir, Direction::North | Direction::South),
            Axis::EastWest => matches!(dir, Direction::East | Direction::West),
        }
    }
}

/// Globally synchronized signal timing
#[derive(Debug, Clone, Copy)]
pub struct SignalPlan {
    ns_green: u64,
    ew_green: u64,
}

impl SignalPlan {
    /// `ns_green + ew_green` must be nonzero; enforced by config
    /// validation before a world is built.
    pub fn new(ns_green: u64, ew_green: u64) -> Self {
        Self { ns_green, ew_green }
    }

    /// The green axis at `tick`, identical for every intersection.
    pub fn green_axis(&self, tick: u64) -> Axis {
        if tick % (self.ns_green + self.ew_green) < self.ns_green {
            Axis::NorthSouth
        } else {
            Axis::EastWest
        }
    }
}
