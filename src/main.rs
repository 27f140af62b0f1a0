use lattice_walk::adapters::inbound::{FileEventStore, IntervalTickSource};
use lattice_walk::adapters::outbound::{
    init_buffered_logger, init_combined_logger, init_console_logger, InMemoryPathSink,
    JsonFilePathSink,
};
use lattice_walk::application::{SimulationRunner, WalkSession};
use lattice_walk::domains::walker::{PathSink, RandomDirections};
use lattice_walk::domains::DynLogger;
use lattice_walk::Config;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting lattice-walk");

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path).await?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    let logger = build_logger(&config);

    let directions = match config.simulation.seed {
        Some(seed) => {
            info!(seed, "Seeding direction source");
            RandomDirections::seeded(seed)
        }
        None => RandomDirections::from_entropy(),
    };
    let session = WalkSession::with_directions(Box::new(directions));

    let sink: Arc<dyn PathSink> = match &config.output.path_file {
        Some(path) => {
            info!(path = %path, "Writing path to file");
            Arc::new(JsonFilePathSink::new(path))
        }
        None => Arc::new(InMemoryPathSink::new()),
    };

    let mut runner = SimulationRunner::new(session, sink, logger);
    if let Some(dir) = &config.output.event_dir {
        info!(dir = %dir, "Journaling walker events");
        runner = runner.with_journal(Arc::new(FileEventStore::new(dir)));
    }

    let mut ticks = IntervalTickSource::new(
        config.simulation.tick_interval(),
        config.simulation.ticks,
    );

    tokio::select! {
        result = runner.run(&mut ticks) => match result {
            Ok(summary) => info!(
                walker_id = ?summary.walker_id,
                steps = summary.steps,
                path_len = summary.path_len,
                displacement = summary.displacement,
                "Simulation complete"
            ),
            Err(e) => {
                error!(error = %e, "Simulation failed");
                log::logger().flush();
                return Err(e.into());
            }
        },
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }

    log::logger().flush();
    Ok(())
}

fn build_logger(config: &Config) -> DynLogger {
    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path, config.logging.level_filter(), false),
        None => init_console_logger(),
    };

    if config.logging.buffer_capacity > 0 {
        init_buffered_logger(logger, config.logging.buffer_capacity)
    } else {
        logger
    }
}
