//! Read-only view of the ocean handed to creatures during a tick.

use crate::config::FishConfig;
use crate::creatures::Shark;
use crate::ecology::{EnvironmentalField, Obstacle, PlanktonPatch};
use crate::grid::SpatialGrid;

/// Everything a creature may read while it updates.
///
/// Built by the ocean once per phase. Every reference is shared and
/// immutable for the lifetime of the context, so the same value can be
/// handed to all workers of the fish phase at once. Plankton biomass is the
/// one exception: patches consume through an atomic cell.
#[derive(Clone, Copy)]
pub struct SimulationContext<'a> {
    pub width: f64,
    pub height: f64,
    /// Fish index of the current tick, queried by fish-phase workers
    pub grid: &'a SpatialGrid,
    pub field: &'a EnvironmentalField,
    pub plankton: &'a [PlanktonPatch],
    pub sharks: &'a [Shark],
    pub obstacles: &'a [Obstacle],
    pub fish: &'a FishConfig,
}
