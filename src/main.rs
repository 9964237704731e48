use clap::Parser;

use gridflow::simulation;
use gridflow::simulation::{SimConfig, TurnProbabilities};

#[derive(Parser)]
#[command(name = "gridflow")]
#[command(about = "Mesoscopic traffic simulation over a signalized street grid")]
struct Cli {
    /// Dimension of the square intersection grid
    #[arg(long, default_value = "4")]
    grid_size: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Per-boundary-link per-tick spawn probability, in [0, 1]
    #[arg(long, default_value = "0.33")]
    arrival_rate: f64,

    /// Max cars simultaneously traveling one link
    #[arg(long, default_value = "50")]
    transit_cap: usize,

    /// Max cars waiting at one stop light
    #[arg(long, default_value = "10")]
    queue_cap: usize,

    /// Max cars served per green approach per tick
    #[arg(long, default_value = "1")]
    flow_per_tick: u32,

    /// North/south green duration in ticks
    #[arg(long, default_value = "20")]
    ns_green: u64,

    /// East/west green duration in ticks
    #[arg(long, default_value = "20")]
    ew_green: u64,

    /// Probability of turning left at an intersection
    #[arg(long, default_value = "0.25")]
    turn_left: f64,

    /// Probability of continuing straight at an intersection
    #[arg(long, default_value = "0.50")]
    turn_straight: f64,

    /// Probability of turning right at an intersection
    #[arg(long, default_value = "0.25")]
    turn_right: f64,

    /// Ticks to traverse one link
    #[arg(long, default_value = "6")]
    travel_ticks: u32,

    /// RNG seed; omit for a non-reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> SimConfig {
        SimConfig {
            grid_size: self.grid_size,
            total_ticks: self.ticks,
            arrival_rate: self.arrival_rate,
            link_transit_cap: self.transit_cap,
            queue_cap: self.queue_cap,
            flow_per_tick: self.flow_per_tick,
            ns_green_ticks: self.ns_green,
            ew_green_ticks: self.ew_green,
            turn_probabilities: TurnProbabilities::new(
                self.turn_left,
                self.turn_straight,
                self.turn_right,
            ),
            base_travel_ticks: self.travel_ticks,
            seed: self.seed,
        }
    }
}

fn main() {
    env_logger::init();

    let config = Cli::parse().into_config();

    println!("=== Grid Traffic Simulation ===");
    println!(
        "Grid: {}x{}, ticks: {}, arrival rate: {}",
        config.grid_size, config.grid_size, config.total_ticks, config.arrival_rate
    );
    match config.seed {
        Some(seed) => println!("Seed: {seed}"),
        None => println!("Seed: none (non-reproducible run)"),
    }
    println!();

    match simulation::run_simulation(config) {
        Ok(summary) => {
            println!("=== Summary ===");
            println!("{summary}");
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}
