//! Grid Traffic Simulation Library
//!
//! A mesoscopic traffic simulator producing throughput and delay
//! statistics for a signalized street grid.

pub mod simulation;
