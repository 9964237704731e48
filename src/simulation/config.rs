//! Run configuration and validation
//!
//! Every tunable of a simulation run lives here. Validation happens
//! once, before the first tick; capacity exhaustion during the run is
//! backpressure, not a configuration problem.

use anyhow::{bail, Result};
use rand::Rng;

use super::types::Turn;

/// Default grid dimension (N x N intersections)
pub const DEFAULT_GRID_SIZE: usize = 4;
/// Default run length in ticks
pub const DEFAULT_TOTAL_TICKS: u64 = 1_000;
/// Default per-boundary-link per-tick spawn probability
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.33;
/// Default cap on cars simultaneously traveling one link
pub const DEFAULT_LINK_TRANSIT_CAP: usize = 50;
/// Default cap on cars waiting at one stop light
pub const DEFAULT_QUEUE_CAP: usize = 10;
/// Default max cars served per green approach per tick
pub const DEFAULT_FLOW_PER_TICK: u32 = 1;
/// Default north/south green duration in ticks
pub const DEFAULT_NS_GREEN_TICKS: u64 = 20;
/// Default east/west green duration in ticks
pub const DEFAULT_EW_GREEN_TICKS: u64 = 20;
/// Default deterministic ticks to traverse one link
pub const DEFAULT_BASE_TRAVEL_TICKS: u32 = 6;

/// Turn-outcome distribution at intersections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnProbabilities {
    pub left: f64,
    pub straight: f64,
    pub right: f64,
}

impl TurnProbabilities {
    pub fn new(left: f64, straight: f64, right: f64) -> Self {
        Self {
            left,
            straight,
            right,
        }
    }

    /// Draw one turn outcome by cumulative-threshold sampling.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Turn {
        let u = rng.random::<f64>();
        if u < self.left {
            Turn::Left
        } else if u < self.left + self.straight {
            Turn::Straight
        } else {
            Turn::Right
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, p) in [
            ("left", self.left),
            ("straight", self.straight),
            ("right", self.right),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("turn probability '{label}' must be in [0, 1], got {p}");
            }
        }
        let total = self.left + self.straight + self.right;
        if (total - 1.0).abs() > 1e-9 {
            bail!("turn probabilities must sum to 1, got {total}");
        }
        Ok(())
    }
}

impl Default for TurnProbabilities {
    fn default() -> Self {
        Self::new(0.25, 0.50, 0.25)
    }
}

/// Complete configuration for one simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Dimension of the square intersection grid
    pub grid_size: usize,
    /// Run length in ticks
    pub total_ticks: u64,
    /// Per-boundary-link per-tick spawn probability, in [0, 1]
    pub arrival_rate: f64,
    /// Hard cap on cars simultaneously traveling a link
    pub link_transit_cap: usize,
    /// Hard cap on cars waiting at a stop light
    pub queue_cap: usize,
    /// Max cars served per green approach per tick
    pub flow_per_tick: u32,
    /// North/south green duration in ticks
    pub ns_green_ticks: u64,
    /// East/west green duration in ticks
    pub ew_green_ticks: u64,
    /// Turn-outcome distribution at intersections
    pub turn_probabilities: TurnProbabilities,
    /// Deterministic ticks to traverse one link
    pub base_travel_ticks: u32,
    /// RNG seed; `None` yields a non-reproducible run
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            total_ticks: DEFAULT_TOTAL_TICKS,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            link_transit_cap: DEFAULT_LINK_TRANSIT_CAP,
            queue_cap: DEFAULT_QUEUE_CAP,
            flow_per_tick: DEFAULT_FLOW_PER_TICK,
            ns_green_ticks: DEFAULT_NS_GREEN_TICKS,
            ew_green_ticks: DEFAULT_EW_GREEN_TICKS,
            turn_probabilities: TurnProbabilities::default(),
            base_travel_ticks: DEFAULT_BASE_TRAVEL_TICKS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject invalid configurations before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            bail!("grid size must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.arrival_rate) {
            bail!(
                "arrival rate must be in [0, 1], got {}",
                self.arrival_rate
            );
        }
        if self.ns_green_ticks + self.ew_green_ticks == 0 {
            bail!("signal cycle must last at least one tick");
        }
        self.turn_probabilities.validate()
    }
}
