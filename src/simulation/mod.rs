//! Mesoscopic grid traffic simulation
//!
//! Queue-level model of vehicle flow through a square grid of
//! signal-controlled intersections: bounded link buffers, a globally
//! synchronized signal cycle, probabilistic turning, and a fixed
//! four-phase tick pipeline. Fully deterministic given a seed.

mod config;
mod grid;
mod link;
mod signal;
mod stats;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use config::{
    SimConfig, TurnProbabilities, DEFAULT_ARRIVAL_RATE, DEFAULT_BASE_TRAVEL_TICKS,
    DEFAULT_EW_GREEN_TICKS, DEFAULT_FLOW_PER_TICK, DEFAULT_GRID_SIZE, DEFAULT_LINK_TRANSIT_CAP,
    DEFAULT_NS_GREEN_TICKS, DEFAULT_QUEUE_CAP, DEFAULT_TOTAL_TICKS,
};
#[allow(unused_imports)]
pub use grid::{GridTopology, Link};
#[allow(unused_imports)]
pub use link::{LinkBuffers, TransitCar};
#[allow(unused_imports)]
pub use signal::{Axis, SignalPlan};
#[allow(unused_imports)]
pub use stats::{SimulationStats, SummaryStats};
#[allow(unused_imports)]
pub use types::{Car, CarId, Direction, LinkId, Node, Turn, CLOCKWISE};
pub use world::{run_simulation, SimWorld};
