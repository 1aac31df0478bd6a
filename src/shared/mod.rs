//! Types shared with front ends: commands in, snapshots out.

pub mod commands;
pub mod snapshot;

pub use commands::{DisplayFlag, DisplaySettings, OceanCommand};
pub use snapshot::{CreatureView, HookView, OceanSnapshot, PlanktonView};
