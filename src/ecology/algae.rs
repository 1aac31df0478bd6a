//! Algae swaying with the current. Cosmetic only.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Algae growth forms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgaeKind {
    Short,
    Medium,
    Tall,
    Kelp,
}

impl AlgaeKind {
    /// Pick a kind with the reef's usual mix: mostly short and medium
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen::<f64>() {
            r if r < 0.3 => AlgaeKind::Short,
            r if r < 0.6 => AlgaeKind::Medium,
            r if r < 0.85 => AlgaeKind::Tall,
            _ => AlgaeKind::Kelp,
        }
    }

    /// (height range start, height spread, width start, width spread)
    fn dimensions(&self) -> (f64, f64, f64, f64) {
        match self {
            AlgaeKind::Short => (40.0, 30.0, 8.0, 6.0),
            AlgaeKind::Medium => (80.0, 50.0, 12.0, 8.0),
            AlgaeKind::Tall => (150.0, 80.0, 15.0, 10.0),
            AlgaeKind::Kelp => (200.0, 100.0, 20.0, 15.0),
        }
    }
}

/// One algae stalk anchored on the sea floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Algae {
    pub base_x: f64,
    pub base_y: f64,
    pub height: f64,
    pub width: f64,
    pub kind: AlgaeKind,
    pub phase: f64,
    sway_speed: f64,
}

impl Algae {
    pub fn new(base_x: f64, base_y: f64, kind: AlgaeKind, rng: &mut impl Rng) -> Self {
        let (h0, hs, w0, ws) = kind.dimensions();
        Self {
            base_x,
            base_y,
            height: h0 + rng.gen::<f64>() * hs,
            width: w0 + rng.gen::<f64>() * ws,
            kind,
            phase: rng.gen::<f64>() * std::f64::consts::TAU,
            sway_speed: 0.02 + rng.gen::<f64>() * 0.03,
        }
    }

    /// Advance the sway phase, nudged by the local current
    pub fn update(&mut self, current: (f64, f64)) {
        self.phase += self.sway_speed + (current.0 + current.1) * 0.0001;
    }

    /// Horizontal tip offset for rendering
    pub fn sway(&self) -> f64 {
        self.phase.sin() * self.width
    }
}
