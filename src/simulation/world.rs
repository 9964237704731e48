//! Main simulation world that ties everything together
//!
//! One `SimWorld` owns all mutable state of a run: topology, link
//! buffers, signal plan, statistics, the car-id counter and the RNG.
//! Construct a fresh world per run; nothing is shared process-wide.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::grid::GridTopology;
use super::link::LinkBuffers;
use super::signal::SignalPlan;
use super::stats::{SimulationStats, SummaryStats};
use super::types::{Car, CarId, Direction, LinkId, Node};

/// Run a complete simulation and return the summary statistics.
///
/// This is the single batch entry point; use [`SimWorld`] directly to
/// step tick by tick and inspect intermediate state.
pub fn run_simulation(config: SimConfig) -> Result<SummaryStats> {
    let mut world = SimWorld::new(config)?;
    world.run()
}

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,

    /// Street network; read-only after construction
    topology: GridTopology,

    /// Per-link buffers, indexed by link ordinal
    buffers: Vec<LinkBuffers>,

    /// Boundary-entry links in construction order
    entry_links: Vec<LinkId>,

    signals: SignalPlan,

    stats: SimulationStats,

    /// Last car id handed out; advances even for dropped spawns so the
    /// id sequence does not depend on congestion
    next_car_id: u64,

    /// Current tick, 0-based
    tick: u64,

    /// Single source for arrival trials and turn draws; the draw order
    /// is part of the reproducibility contract
    rng: StdRng,
}

impl SimWorld {
    /// Validate `config` and build a fresh world for one run.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("invalid simulation config")?;

        let topology = GridTopology::build(config.grid_size);
        let buffers = (0..topology.link_count())
            .map(|_| LinkBuffers::new(config.link_transit_cap, config.queue_cap))
            .collect();
        let entry_links = topology.entry_links().map(|l| l.id).collect();
        let signals = SignalPlan::new(config.ns_green_ticks, config.ew_green_ticks);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            topology,
            buffers,
            entry_links,
            signals,
            stats: SimulationStats::default(),
            next_car_id: 0,
            tick: 0,
            config,
            rng,
        })
    }

    /// Run one tick: arrivals, link advance, intersection service,
    /// then queue sampling. Phases never interleave across ticks.
    pub fn step(&mut self) -> Result<()> {
        self.spawn_arrivals();
        self.advance_links();
        self.serve_intersections()?;
        self.sample_queues();
        self.tick += 1;
        Ok(())
    }

    /// Run until `total_ticks` and return the summary.
    pub fn run(&mut self) -> Result<SummaryStats> {
        info!(
            "starting run: {}x{} grid, {} ticks, seed {:?}",
            self.config.grid_size, self.config.grid_size, self.config.total_ticks, self.config.seed
        );
        while self.tick < self.config.total_ticks {
            self.step()?;
        }
        info!(
            "run complete: {} of {} spawned cars finished their trip",
            self.stats.cars_completed, self.stats.cars_spawned
        );
        Ok(self.summary())
    }

    /// Spawn new cars at boundary-entry links, one Bernoulli trial per
    /// link. A full in-transit buffer silently drops the spawn.
    fn spawn_arrivals(&mut self) {
        for idx in 0..self.entry_links.len() {
            let link = self.entry_links[idx];
            if self.rng.random::<f64>() >= self.config.arrival_rate {
                continue;
            }

            // ids advance even when the spawn is dropped below
            self.next_car_id += 1;
            let car = Car::new(CarId(self.next_car_id), self.tick);

            if self.buffers[link.0].try_depart(car, self.config.base_travel_ticks) {
                self.stats.record_spawn();
            } else {
                debug!("tick {}: entry link {:?} full, arrival dropped", self.tick, link);
            }
        }
    }

    /// Age every link by one tick, promoting ready cars into their
    /// stopped queues.
    fn advance_links(&mut self) {
        for buffers in &mut self.buffers {
            buffers.advance();
        }
    }

    /// Serve every intersection's green approaches for this tick.
    fn serve_intersections(&mut self) -> Result<()> {
        let axis = self.signals.green_axis(self.tick);
        for idx in 0..self.topology.node_count() {
            let node = self.topology.nodes()[idx];
            // Collect the approach list to keep the topology borrow
            // out of the serving loop.
            let approaches: Vec<(LinkId, Direction)> = self.topology.approaches(node).to_vec();
            for (link, approach) in approaches {
                if !axis.permits(approach) {
                    continue;
                }
                self.serve_approach(node, link, approach)?;
            }
        }
        Ok(())
    }

    /// Serve up to `flow_per_tick` cars from the head of one green
    /// approach queue. Each car draws a turn, then either exits the
    /// grid or transfers onto the next link; a full downstream link
    /// stops service for this approach until the next tick.
    fn serve_approach(&mut self, node: Node, link: LinkId, approach: Direction) -> Result<()> {
        let turns = self.config.turn_probabilities;
        let mut served = 0;

        while served < self.config.flow_per_tick {
            let Some(&car) = self.buffers[link.0].front_stopped() else {
                break;
            };

            let heading = turns.sample(&mut self.rng).apply(approach);
            match self.topology.neighbor(node, heading) {
                None => {
                    // heading points off-grid: the trip is complete
                    self.buffers[link.0].pop_stopped();
                    self.stats.record_completion(car.entered_at, self.tick);
                    served += 1;
                }
                Some(next) => {
                    let next_link = self.topology.link_between(node, next)?;
                    if !self.buffers[next_link.0].try_depart(car, self.config.base_travel_ticks) {
                        // head-of-line blocking: nothing more moves
                        // from this approach this tick
                        debug!(
                            "tick {}: link {:?} full, approach {approach} at {node} blocked",
                            self.tick, next_link
                        );
                        break;
                    }
                    self.buffers[link.0].pop_stopped();
                    served += 1;
                }
            }
        }
        Ok(())
    }

    /// Take this tick's queue snapshot, one sample per link.
    fn sample_queues(&mut self) {
        let combined: usize = self.buffers.iter().map(|b| b.stopped_len()).sum();
        self.stats.record_queue_sample(combined, self.buffers.len());
    }

    /// Summary of the statistics gathered so far
    pub fn summary(&self) -> SummaryStats {
        self.stats.summarize(self.tick)
    }

    /// Current tick, 0-based
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Cars currently owned by some buffer
    pub fn active_cars(&self) -> usize {
        self.buffers.iter().map(|b| b.total_cars()).sum()
    }

    /// Per-link (in-transit, stopped) buffer lengths, by link ordinal
    pub fn link_loads(&self) -> impl Iterator<Item = (LinkId, usize, usize)> + '_ {
        self.buffers
            .iter()
            .enumerate()
            .map(|(idx, b)| (LinkId(idx), b.in_transit_len(), b.stopped_len()))
    }
}
