//! REEF - CLI Entry Point
//!
//! Headless ocean simulator.

use clap::{Parser, Subcommand};
use reef::creatures::DrifterKind;
use reef::{benchmark, Config, Ocean};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "reef")]
#[command(version)]
#[command(about = "Parallel 2-D ocean ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Random seed for placement and spawning
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads for the fish phase (overrides the config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Sharks to add at start
        #[arg(long, default_value = "0")]
        sharks: usize,

        /// Jellyfish and sea turtles to add at start, each
        #[arg(long, default_value = "0")]
        drifters: usize,

        /// Write the stats history as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Initial fish
        #[arg(short, long, default_value = "1000")]
        fish: usize,

        /// Sharks
        #[arg(short, long, default_value = "10")]
        sharks: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
            workers,
            sharks,
            drifters,
            json,
            quiet,
        } => run_simulation(config, ticks, seed, workers, sharks, drifters, json, quiet),

        Commands::Benchmark { ticks, fish, sharks } => {
            init_logging("info");
            run_benchmark(ticks, fish, sharks)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

/// Initialize logging; `RUST_LOG` takes precedence over `default_level`
fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

#[allow(clippy::too_many_arguments)]
fn run_simulation(
    config_path: PathBuf,
    ticks: u64,
    seed: Option<u64>,
    workers: Option<usize>,
    sharks: usize,
    drifters: usize,
    json: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let mut config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };
    init_logging(&config.logging.log_level);

    if let Some(w) = workers {
        config.runtime.workers = w;
    }

    let mut ocean = match seed {
        Some(s) => {
            println!("Using seed: {}", s);
            Ocean::new_with_seed(config.clone(), s)
        }
        None => Ocean::new(config.clone()),
    };

    for _ in 0..sharks {
        ocean.add_shark();
    }
    for _ in 0..drifters {
        ocean.add_drifter(DrifterKind::Jellyfish);
        ocean.add_drifter(DrifterKind::SeaTurtle);
    }

    println!("Starting simulation");
    println!("  Fish: {}", ocean.fish_count());
    println!("  Sharks: {}", ocean.shark_count());
    println!("  World: {}x{}", ocean.width(), ocean.height());
    println!("  Workers: {}", ocean.workers());
    println!("  Ticks: {}", ticks);
    println!();

    let stats_interval = config.logging.stats_interval.max(1);
    let start = Instant::now();

    ocean.run_with_callback(ticks, |ocean, report| {
        if !quiet && report.frame % stats_interval == 0 {
            println!("{}", ocean.stats_snapshot().summary());
        }
    });

    let elapsed = start.elapsed();
    let frames = ocean.frame_count();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", frames);
    println!("Speed: {:.1} ticks/s", frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON));
    println!("{}", ocean.stats_snapshot().summary());

    if let Some(path) = json {
        std::fs::write(&path, ocean.history().to_json()?)?;
        println!("Stats history: {:?}", path);
    }

    ocean.shutdown();
    Ok(())
}

fn run_benchmark(ticks: u64, fish: usize, sharks: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== REEF Benchmark ===");
    println!("Ticks: {}", ticks);
    println!("Fish: {}", fish);
    println!("Sharks: {}", sharks);
    println!();

    let result = benchmark(ticks, fish, sharks);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
