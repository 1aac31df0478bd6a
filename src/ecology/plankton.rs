//! Plankton patches: the regenerating food source of the ocean.
//!
//! Biomass is held in an atomic cell so that fish updating on different
//! worker threads can feed from the same patch without a lock. Every other
//! patch mutation (regrowth, culling, spawning) happens on the orchestrator
//! thread between fish phases.

use crate::config::PlanktonConfig;
use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` stored as raw bits in an `AtomicU64`
#[derive(Debug)]
struct AtomicBiomass(AtomicU64);

impl AtomicBiomass {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Atomically replace the value with `f(old)`, returning the old value
    #[inline]
    fn update<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        let previous = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some(f(f64::from_bits(bits)).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        f64::from_bits(previous)
    }
}

impl Clone for AtomicBiomass {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}

/// A circular food patch
#[derive(Debug, Clone)]
pub struct PlanktonPatch {
    pub x: f64,
    pub y: f64,
    radius: f64,
    max_biomass: f64,
    regen_rate: f64,
    depletion_threshold: f64,
    biomass: AtomicBiomass,
}

impl PlanktonPatch {
    pub fn new(x: f64, y: f64, initial_biomass: f64, config: &PlanktonConfig) -> Self {
        Self {
            x,
            y,
            radius: config.feed_radius,
            max_biomass: config.max_biomass,
            regen_rate: config.regen_rate,
            depletion_threshold: config.depletion_threshold,
            biomass: AtomicBiomass::new(initial_biomass.clamp(0.0, config.max_biomass)),
        }
    }

    /// Feed radius
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn biomass(&self) -> f64 {
        self.biomass.load()
    }

    pub fn max_biomass(&self) -> f64 {
        self.max_biomass
    }

    /// Whether the point lies strictly inside the feed radius
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy < self.radius * self.radius
    }

    /// Regrow biomass by the regeneration rate, up to the cap
    pub fn regenerate(&self) {
        let (rate, cap) = (self.regen_rate, self.max_biomass);
        self.biomass.update(|b| (b + rate).min(cap));
    }

    /// Take up to `requested` biomass, returning what was actually taken
    pub fn consume(&self, requested: f64) -> f64 {
        let requested = requested.max(0.0);
        let before = self.biomass.update(|b| (b - requested).max(0.0));
        requested.min(before)
    }

    /// Depleted patches are removed by the ocean
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.biomass.load() <= self.depletion_threshold
    }

    /// Fill level in [0, 1], for rendering
    pub fn fill_ratio(&self) -> f64 {
        if self.max_biomass > 0.0 {
            self.biomass() / self.max_biomass
        } else {
            0.0
        }
    }
}
