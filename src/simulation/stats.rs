//! Aggregate throughput and delay statistics

use std::fmt;

/// Running accumulators for one simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Cars that actually entered a link buffer (dropped spawns excluded)
    pub cars_spawned: u64,
    /// Cars that exited the grid
    pub cars_completed: u64,
    /// Summed time-in-system of all completed cars, in ticks
    pub total_travel_time: u64,
    /// Summed stopped-queue lengths over all samples
    pub queue_length_sum: u64,
    /// Number of (link, tick) queue samples taken
    pub queue_samples: u64,
}

impl SimulationStats {
    pub fn record_spawn(&mut self) {
        self.cars_spawned += 1;
    }

    /// Record a car leaving the grid at `now`.
    pub fn record_completion(&mut self, entered_at: u64, now: u64) {
        self.cars_completed += 1;
        self.total_travel_time += now - entered_at;
    }

    /// Record one tick's queue snapshot: the combined stopped-queue
    /// length across the grid, counted as one sample per link.
    pub fn record_queue_sample(&mut self, combined_len: usize, link_count: usize) {
        self.queue_length_sum += combined_len as u64;
        self.queue_samples += link_count as u64;
    }

    /// Fold the accumulators into the end-of-run summary.
    pub fn summarize(&self, ticks: u64) -> SummaryStats {
        let avg_travel_time = if self.cars_completed > 0 {
            self.total_travel_time as f64 / self.cars_completed as f64
        } else {
            0.0
        };
        let avg_queue_len = if self.queue_samples > 0 {
            self.queue_length_sum as f64 / self.queue_samples as f64
        } else {
            0.0
        };
        SummaryStats {
            ticks,
            cars_spawned: self.cars_spawned,
            cars_completed: self.cars_completed,
            avg_travel_time,
            avg_queue_len,
        }
    }
}

/// End-of-run summary returned by `run_simulation`
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    /// Ticks actually run
    pub ticks: u64,
    /// Cars that entered the grid
    pub cars_spawned: u64,
    /// Cars that completed their trip
    pub cars_completed: u64,
    /// Mean time-in-system of completed cars, in ticks (0 if none)
    pub avg_travel_time: f64,
    /// Mean stopped-queue length per signal per tick (0 if unsampled)
    pub avg_queue_len: f64,
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticks run: {}", self.ticks)?;
        writeln!(f, "Cars spawned: {}", self.cars_spawned)?;
        writeln!(f, "Cars completed: {}", self.cars_completed)?;
        writeln!(f, "Average travel time: {:.2} ticks", self.avg_travel_time)?;
        write!(f, "Average queue length: {:.3} cars/signal", self.avg_queue_len)
    }
}
