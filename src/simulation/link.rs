//! Per-link car buffering
//!
//! Each directed link owns two bounded buffers: the in-transit
//! collection of cars still traveling the link and the FIFO stopped
//! queue of cars waiting at the downstream signal. Both caps hold at
//! every tick boundary; a full buffer is backpressure, not an error.

use std::collections::VecDeque;

use super::types::Car;

/// A car currently traveling a link, with its remaining travel time
#[derive(Debug, Clone, Copy)]
pub struct TransitCar {
    pub car: Car,
    pub remaining: u32,
}

/// The two bounded buffers owned by one directed link
#[derive(Debug, Clone)]
pub struct LinkBuffers {
    in_transit: VecDeque<TransitCar>,
    stopped: VecDeque<Car>,
    transit_cap: usize,
    queue_cap: usize,
}

impl LinkBuffers {
    pub fn new(transit_cap: usize, queue_cap: usize) -> Self {
        Self {
            in_transit: VecDeque::new(),
            stopped: VecDeque::new(),
            transit_cap,
            queue_cap,
        }
    }

    /// Try to put `car` on the link. Returns false when the in-transit
    /// buffer is at capacity; the caller decides what that means
    /// (dropped spawn or halted intersection service).
    pub fn try_depart(&mut self, car: Car, travel_time: u32) -> bool {
        if self.in_transit.len() >= self.transit_cap {
            return false;
        }
        self.in_transit.push_back(TransitCar {
            car,
            remaining: travel_time,
        });
        true
    }

    /// Age every in-transit car by one tick and migrate ready cars
    /// into the stopped queue, oldest-inserted first. A car blocked by
    /// a full queue stays in place with remaining time 0 and retries
    /// next tick. Relative order is preserved throughout.
    ///
    /// Returns how many cars migrated.
    pub fn advance(&mut self) -> usize {
        let mut migrated = 0;
        let mut retained = VecDeque::with_capacity(self.in_transit.len());

        while let Some(entry) = self.in_transit.pop_front() {
            let remaining = entry.remaining.saturating_sub(1);
            if remaining == 0 {
                if self.stopped.len() < self.queue_cap {
                    self.stopped.push_back(entry.car);
                    migrated += 1;
                    continue;
                }
                // downstream queue full; wait at the head of the link
                retained.push_back(TransitCar {
                    car: entry.car,
                    remaining: 0,
                });
            } else {
                retained.push_back(TransitCar {
                    car: entry.car,
                    remaining,
                });
            }
        }

        self.in_transit = retained;
        migrated
    }

    /// The car at the head of the stopped queue, if any
    pub fn front_stopped(&self) -> Option<&Car> {
        self.stopped.front()
    }

    /// Remove and return the head of the stopped queue
    pub fn pop_stopped(&mut self) -> Option<Car> {
        self.stopped.pop_front()
    }

    pub fn in_transit_len(&self) -> usize {
        self.in_transit.len()
    }

    pub fn stopped_len(&self) -> usize {
        self.stopped.len()
    }

    /// Total cars owned by this link, across both buffers
    pub fn total_cars(&self) -> usize {
        self.in_transit.len() + self.stopped.len()
    }
}
