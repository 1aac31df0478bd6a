//! # REEF
//!
//! Parallel 2-D ocean ecosystem simulator: schooling fish, sharks, a
//! plankton food web and a procedural current field.
//!
//! ## Features
//!
//! - **Parallel**: the fish phase runs on a fixed Rayon worker pool
//! - **Race-free**: double-buffered fish, atomic plankton and a birth budget
//! - **Configurable**: YAML configuration files
//! - **Observable**: per-tick reports, stats history and render snapshots
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reef::{Config, Ocean};
//!
//! let mut ocean = Ocean::new(Config::default());
//! ocean.add_shark();
//!
//! ocean.run(1000);
//!
//! println!("Fish: {}", ocean.fish_count());
//! println!("{}", ocean.stats_snapshot().summary());
//! ocean.shutdown();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use reef::Config;
//!
//! let mut config = Config::default();
//! config.fish.initial_count = 200;
//! config.runtime.workers = 4;
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Observers
//!
//! ```rust,no_run
//! use reef::{Config, Ocean, TickReport};
//!
//! let mut ocean = Ocean::new(Config::default());
//! ocean.register_observer(|report: &TickReport| {
//!     if report.caught > 0 {
//!         println!("frame {}: {} fish caught", report.frame, report.caught);
//!     }
//! });
//! ocean.toggle_fisherman();
//! ocean.run(500);
//! ```

pub mod config;
pub mod context;
pub mod creatures;
pub mod ecology;
pub mod grid;
pub mod observer;
pub mod ocean;
pub mod shared;
pub mod stats;

// Re-export main types
pub use config::{Config, ConfigError};
pub use context::SimulationContext;
pub use creatures::{CreatureKind, Fish, Shark, Species};
pub use grid::SpatialGrid;
pub use observer::{OceanObserver, TickReport};
pub use ocean::Ocean;
pub use shared::{OceanCommand, OceanSnapshot};
pub use stats::{SimulationStats, StatsSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(ticks: u64, fish: usize, sharks: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.fish.max_fish = config.fish.max_fish.max(fish);
    config.fish.initial_count = fish;

    let mut ocean = Ocean::new(config);
    for _ in 0..sharks {
        ocean.add_shark();
    }

    let start = Instant::now();
    ocean.run(ticks);
    let elapsed = start.elapsed();

    let result = BenchmarkResult {
        ticks,
        workers: ocean.workers(),
        initial_fish: fish,
        final_fish: ocean.fish_count(),
        sharks: ocean.shark_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
    };
    ocean.shutdown();
    result
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub workers: usize,
    pub initial_fish: usize,
    pub final_fish: usize,
    pub sharks: usize,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Workers: {}", self.workers)?;
        writeln!(f, "Fish: {} -> {}", self.initial_fish, self.final_fish)?;
        writeln!(f, "Sharks: {}", self.sharks)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut ocean = Ocean::new(Config::default());
        ocean.run(100);
        assert_eq!(ocean.frame_count(), 100);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(50, 100, 2);

        assert_eq!(result.ticks, 50);
        assert_eq!(result.sharks, 2);
        assert!(result.ticks_per_second > 0.0);
        assert!(result.to_string().contains("Ticks: 50"));
    }
}
