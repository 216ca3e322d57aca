use liquidity_sim::{LiquiditySimulator, config::SimulationConfig, logging::init_logging};
use std::{fs::File, io::BufReader, time::Duration};
use tracing::info;

const FILE_PATH_SIMULATION_CONFIG: &str = "liquidity-sim/examples/config/simulation_config.json";
const REFRESH_INTERVAL: Duration = Duration::from_millis(500);
const SEED: u64 = 42;
const TICKS: u64 = 20;

#[tokio::main]
async fn main() {
    // Initialise Tracing
    init_logging();

    // Load SimulationConfig
    let config = load_config();

    // Construct the engine; it owns no timer, so drive it from a caller-owned interval
    let mut simulator = LiquiditySimulator::new(config, SEED).unwrap();
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);

    while simulator.ticks() < TICKS {
        interval.tick().await;
        simulator.tick();

        // Pull a snapshot for the "visualisation" layer
        let snapshot = simulator.snapshot();
        info!(
            sequence = snapshot.sequence,
            current_price = %simulator.current_price(),
            bottom = %snapshot.levels[0].price,
            total_bid_volume = %snapshot.total_bid_volume(),
            total_ask_volume = %snapshot.total_ask_volume(),
            max_volume = %snapshot.max_volume(),
            "heatmap frame"
        );
    }

    let depth = simulator.snapshot().depth();
    println!("{}", serde_json::to_string_pretty(&depth).unwrap());
}

fn load_config() -> SimulationConfig {
    let file = File::open(FILE_PATH_SIMULATION_CONFIG).unwrap();
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).unwrap()
}
