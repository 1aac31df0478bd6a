//! Environment of the ocean.
//!
//! This module contains:
//! - Procedural current and temperature field
//! - Plankton patches (the food web)
//! - User-placed obstacles
//! - The fisherman's hook
//! - Day/night timer
//! - Algae swaying with the current

pub mod algae;
pub mod day_night;
pub mod field;
pub mod fisherman;
pub mod obstacles;
pub mod plankton;

pub use algae::{Algae, AlgaeKind};
pub use day_night::{DayNightCycle, DayPeriod};
pub use field::{CurrentPattern, EnvironmentalField, FieldCell};
pub use fisherman::{Fisherman, HookPhase};
pub use obstacles::{Obstacle, ObstacleField};
pub use plankton::PlanktonPatch;
