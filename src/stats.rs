//! Statistics tracking for the simulation.
//!
//! Counters are atomics so fish-phase workers can record feeds without
//! locking. [`StatsSnapshot`] is the plain, serialisable copy.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free running totals
#[derive(Debug, Default)]
pub struct SimulationStats {
    births: AtomicU64,
    deaths: AtomicU64,
    feed_events: AtomicU64,
    caught: AtomicU64,
    /// f64 bits
    avg_energy: AtomicU64,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_birth(&self) {
        self.births.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_births(&self, n: u64) {
        self.births.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_death(&self) {
        self.deaths.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_deaths(&self, n: u64) {
        self.deaths.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_feed(&self) {
        self.feed_events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_catch(&self) {
        self.caught.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_avg_energy(&self, energy: f64) {
        self.avg_energy.store(energy.to_bits(), Ordering::Relaxed);
    }

    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    pub fn feed_events(&self) -> u64 {
        self.feed_events.load(Ordering::Relaxed)
    }

    pub fn caught(&self) -> u64 {
        self.caught.load(Ordering::Relaxed)
    }

    pub fn avg_energy(&self) -> f64 {
        f64::from_bits(self.avg_energy.load(Ordering::Relaxed))
    }

    /// Copy the counters together with the current population figures
    pub fn snapshot(&self, frame: u64, fish: usize, sharks: usize, plankton: usize) -> StatsSnapshot {
        StatsSnapshot {
            frame,
            fish,
            sharks,
            plankton_patches: plankton,
            births: self.births(),
            deaths: self.deaths(),
            feed_events: self.feed_events(),
            caught: self.caught(),
            avg_energy: self.avg_energy(),
        }
    }
}

/// Statistics at one tick
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub frame: u64,
    pub fish: usize,
    pub sharks: usize,
    pub plankton_patches: usize,
    pub births: u64,
    pub deaths: u64,
    pub feed_events: u64,
    pub caught: u64,
    pub avg_energy: f64,
}

impl StatsSnapshot {
    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Fish:{:5} | Sharks:{:3} | Plankton:{:3} | Births:{} Deaths:{} Feeds:{} Caught:{} | Energy:{:.0}",
            self.frame,
            self.fish,
            self.sharks,
            self.plankton_patches,
            self.births,
            self.deaths,
            self.feed_events,
            self.caught,
            self.avg_energy,
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded snapshots
    pub snapshots: Vec<StatsSnapshot>,
    /// Recording interval in ticks
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// Whether `frame` falls on the recording interval
    #[inline]
    pub fn is_due(&self, frame: u64) -> bool {
        frame % self.interval == 0
    }

    pub fn record(&mut self, stats: StatsSnapshot) {
        self.snapshots.push(stats);
    }

    pub fn latest(&self) -> Option<&StatsSnapshot> {
        self.snapshots.last()
    }

    /// Fish population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.frame, s.fish)).collect()
    }

    /// Average energy over time
    pub fn energy_series(&self) -> Vec<(u64, f64)> {
        self.snapshots.iter().map(|s| (s.frame, s.avg_energy)).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
