//! Commands a front end sends to the ocean.

use crate::creatures::DrifterKind;
use crate::ecology::CurrentPattern;
use serde::{Deserialize, Serialize};

/// User actions, applied through [`crate::Ocean::apply`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OceanCommand {
    /// Add up to n fish at random positions
    AddFish(usize),
    AddShark,
    AddDrifter(DrifterKind),
    ToggleFisherman,
    SpawnPlankton,
    /// Place an obstacle; `None` radius uses the configured default
    AddObstacle { x: f64, y: f64, radius: Option<f64> },
    SetCurrentPattern(CurrentPattern),
    /// Strength multiplier, clamped to [0, 2]
    SetCurrentStrength(f64),
    /// Field animation multiplier, clamped to [0, 3]
    SetAnimationSpeed(f64),
    SetDisplay(DisplayFlag, bool),
    Resize { width: f64, height: f64 },
}

/// Presentation toggles stored on the ocean for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayFlag {
    Currents,
    Plankton,
    DayNight,
    Particles,
}

/// Current values of the display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub show_currents: bool,
    pub show_plankton: bool,
    pub day_night_enabled: bool,
    pub particles_enabled: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_currents: false,
            show_plankton: true,
            day_night_enabled: true,
            particles_enabled: true,
        }
    }
}

impl DisplaySettings {
    pub fn set(&mut self, flag: DisplayFlag, value: bool) {
        match flag {
            DisplayFlag::Currents => self.show_currents = value,
            DisplayFlag::Plankton => self.show_plankton = value,
            DisplayFlag::DayNight => self.day_night_enabled = value,
            DisplayFlag::Particles => self.particles_enabled = value,
        }
    }

    pub fn get(&self, flag: DisplayFlag) -> bool {
        match flag {
            DisplayFlag::Currents => self.show_currents,
            DisplayFlag::Plankton => self.show_plankton,
            DisplayFlag::DayNight => self.day_night_enabled,
            DisplayFlag::Particles => self.particles_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_flags() {
        let mut display = DisplaySettings::default();
        assert!(!display.get(DisplayFlag::Currents));
        display.set(DisplayFlag::Currents, true);
        assert!(display.show_currents);
    }

    #[test]
    fn test_command_serde() {
        let cmd = OceanCommand::AddObstacle { x: 1.0, y: 2.0, radius: None };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: OceanCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
