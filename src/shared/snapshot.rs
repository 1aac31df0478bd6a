//! Lightweight render snapshots of the ocean.
//!
//! A snapshot copies only what a renderer draws, so it can be handed to
//! another thread while the ocean keeps ticking.

use super::commands::DisplaySettings;
use crate::creatures::{CreatureKind, Drifter, Fish, Rgb, Shark};
use crate::ecology::{Algae, FieldCell, HookPhase, Obstacle, PlanktonPatch};
use crate::stats::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// A fish or shark as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureView {
    pub id: u64,
    pub kind: CreatureKind,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    /// `None` for sharks
    pub color: Option<Rgb>,
    /// Most recent first
    pub trail: Vec<(f64, f64)>,
}

impl From<&Fish> for CreatureView {
    fn from(fish: &Fish) -> Self {
        Self {
            id: fish.id,
            kind: fish.kind(),
            x: fish.body.x,
            y: fish.body.y,
            heading: fish.body.heading(),
            color: Some(fish.color),
            trail: fish.body.trail.iter().copied().collect(),
        }
    }
}

impl From<&Shark> for CreatureView {
    fn from(shark: &Shark) -> Self {
        Self {
            id: shark.id,
            kind: shark.kind(),
            x: shark.body.x,
            y: shark.body.y,
            heading: shark.body.heading(),
            color: None,
            trail: shark.body.trail.iter().copied().collect(),
        }
    }
}

/// A plankton patch as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanktonView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Biomass over capacity, in [0, 1]
    pub fill: f64,
}

impl From<&PlanktonPatch> for PlanktonView {
    fn from(patch: &PlanktonPatch) -> Self {
        Self {
            x: patch.x,
            y: patch.y,
            radius: patch.radius(),
            fill: patch.fill_ratio(),
        }
    }
}

/// Hook state for drawing the fishing line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HookView {
    pub x: f64,
    pub y: f64,
    pub fishing: bool,
    pub phase: HookPhase,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OceanSnapshot {
    pub width: f64,
    pub height: f64,
    pub frame: u64,
    pub creatures: Vec<CreatureView>,
    pub plankton: Vec<PlanktonView>,
    pub obstacles: Vec<Obstacle>,
    pub drifters: Vec<Drifter>,
    pub algae: Vec<Algae>,
    pub hook: HookView,
    /// (cells_x, cells_y)
    pub field_resolution: (usize, usize),
    /// Present only while currents are shown
    pub field: Option<Vec<FieldCell>>,
    /// Light level in [0, 1]
    pub light_level: f64,
    /// Clock time such as "06:00"
    pub time_of_day: Option<String>,
    pub display: DisplaySettings,
    pub stats: StatsSnapshot,
}

impl OceanSnapshot {
    pub fn fish_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.kind.is_prey()).count()
    }

    pub fn shark_count(&self) -> usize {
        self.creatures.len() - self.fish_count()
    }
}
