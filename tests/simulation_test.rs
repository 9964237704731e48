//! End-to-end scenario and invariant tests
//!
//! These drive the public library API the way the binary does and
//! check the properties the simulator guarantees: conservation,
//! capacity bounds, determinism, and the degenerate scenarios.

use gridflow::simulation::{run_simulation, SimConfig, SimWorld, TurnProbabilities};

fn test_config() -> SimConfig {
    SimConfig {
        seed: Some(1234),
        ..SimConfig::default()
    }
}

#[test]
fn one_by_one_grid_has_no_links_and_no_traffic() {
    let config = SimConfig {
        grid_size: 1,
        total_ticks: 50,
        arrival_rate: 0.9,
        ..test_config()
    };
    let summary = run_simulation(config).expect("run should succeed");

    assert_eq!(summary.ticks, 50);
    assert_eq!(summary.cars_spawned, 0);
    assert_eq!(summary.cars_completed, 0);
    assert_eq!(summary.avg_travel_time, 0.0);
    assert_eq!(summary.avg_queue_len, 0.0);
}

#[test]
fn zero_arrival_rate_keeps_the_network_empty() {
    let config = SimConfig {
        arrival_rate: 0.0,
        total_ticks: 100,
        ..test_config()
    };
    let mut world = SimWorld::new(config).expect("config should be valid");

    for _ in 0..100 {
        world.step().expect("step should succeed");
        assert_eq!(world.active_cars(), 0, "no car should ever be buffered");
    }

    let summary = world.summary();
    assert_eq!(summary.cars_spawned, 0);
    assert_eq!(summary.cars_completed, 0);
    assert_eq!(summary.avg_queue_len, 0.0);
}

#[test]
fn saturated_arrivals_with_ample_capacity_complete_trips() {
    let config = SimConfig {
        grid_size: 4,
        total_ticks: 300,
        arrival_rate: 1.0,
        link_transit_cap: 1_000,
        queue_cap: 1_000,
        flow_per_tick: 5,
        ..test_config()
    };
    let base_travel = config.base_travel_ticks;
    let summary = run_simulation(config).expect("run should succeed");

    assert!(
        summary.cars_completed > 0,
        "saturated arrivals should produce completions, got none"
    );
    // A trip covers at least one link; the entry tick counts as the
    // first travel decrement, so the per-car floor is base - 1.
    assert!(
        summary.avg_travel_time >= (base_travel - 1) as f64,
        "average travel time {} below single-link floor",
        summary.avg_travel_time
    );
}

#[test]
fn zero_queue_capacity_stalls_every_car_in_transit() {
    let config = SimConfig {
        queue_cap: 0,
        arrival_rate: 1.0,
        total_ticks: 100,
        ..test_config()
    };
    let mut world = SimWorld::new(config).expect("config should be valid");

    for _ in 0..100 {
        world.step().expect("step should succeed");
    }

    let summary = world.summary();
    assert!(summary.cars_spawned > 0, "arrivals should still enter links");
    assert_eq!(summary.cars_completed, 0, "no car can ever pass a signal");
    assert_eq!(
        world.active_cars() as u64,
        summary.cars_spawned,
        "every spawned car should still be in transit"
    );
    for (link, _, stopped) in world.link_loads() {
        assert_eq!(stopped, 0, "link {link:?} should have an empty stopped queue");
    }
}

#[test]
fn identical_seeds_reproduce_identical_summaries() {
    let first = run_simulation(test_config()).expect("run should succeed");
    let second = run_simulation(test_config()).expect("run should succeed");
    assert_eq!(first, second, "same config and seed must replay bit-identically");
}

#[test]
fn conservation_and_capacity_hold_every_tick() {
    let config = SimConfig {
        seed: Some(99),
        total_ticks: 200,
        ..SimConfig::default()
    };
    let transit_cap = config.link_transit_cap;
    let queue_cap = config.queue_cap;
    let mut world = SimWorld::new(config).expect("config should be valid");

    for _ in 0..200 {
        world.step().expect("step should succeed");

        let stats = world.stats();
        assert_eq!(
            stats.cars_spawned,
            world.active_cars() as u64 + stats.cars_completed,
            "spawned cars must all be buffered or completed at tick {}",
            world.current_tick()
        );

        for (link, in_transit, stopped) in world.link_loads() {
            assert!(
                in_transit <= transit_cap,
                "link {link:?} in-transit over capacity at tick {}",
                world.current_tick()
            );
            assert!(
                stopped <= queue_cap,
                "link {link:?} stopped queue over capacity at tick {}",
                world.current_tick()
            );
        }
    }
}

#[test]
fn arrivals_enter_only_at_boundary_links() {
    let config = SimConfig {
        arrival_rate: 1.0,
        base_travel_ticks: 100,
        total_ticks: 3,
        ..test_config()
    };
    let mut world = SimWorld::new(config).expect("config should be valid");

    for _ in 0..3 {
        world.step().expect("step should succeed");
    }

    assert!(world.stats().cars_spawned > 0);
    for (link, in_transit, stopped) in world.link_loads() {
        if !world.topology().link(link).is_entry {
            assert_eq!(in_transit, 0, "interior link {link:?} received an arrival");
            assert_eq!(stopped, 0, "interior link {link:?} received an arrival");
        }
    }
}

#[test]
fn summary_is_printable() {
    let config = SimConfig {
        total_ticks: 40,
        ..test_config()
    };
    let summary = run_simulation(config).expect("run should succeed");
    let rendered = format!("{summary}");
    assert!(rendered.contains("Ticks run: 40"));
    assert!(rendered.contains("Average travel time"));
}

#[test]
fn invalid_configurations_are_rejected_before_the_run() {
    let zero_grid = SimConfig {
        grid_size: 0,
        ..SimConfig::default()
    };
    assert!(run_simulation(zero_grid).is_err());

    let bad_rate = SimConfig {
        arrival_rate: 1.5,
        ..SimConfig::default()
    };
    assert!(run_simulation(bad_rate).is_err());

    let bad_turns = SimConfig {
        turn_probabilities: TurnProbabilities::new(0.5, 0.5, 0.5),
        ..SimConfig::default()
    };
    assert!(run_simulation(bad_turns).is_err());

    let zero_cycle = SimConfig {
        ns_green_ticks: 0,
        ew_green_ticks: 0,
        ..SimConfig::default()
    };
    assert!(run_simulation(zero_cycle).is_err());
}
