//! Day/night timer.
//!
//! Only the timing lives here: phase, daytime and light level. Colour
//! interpolation for the sky belongs to the renderer.

use serde::{Deserialize, Serialize};

/// Named part of the day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPeriod {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl DayPeriod {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            DayPeriod::Dawn => "Dawn",
            DayPeriod::Day => "Day",
            DayPeriod::Dusk => "Dusk",
            DayPeriod::Night => "Night",
        }
    }
}

/// Cyclic day timer. Phase 0.0 is midnight, 0.5 is noon.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayNightCycle {
    cycle_ticks: f64,
    position: f64,
    time_multiplier: f64,
    paused: bool,
}

impl DayNightCycle {
    /// Create a cycle lasting `cycle_ticks`, starting at sunrise
    pub fn new(cycle_ticks: u32) -> Self {
        let cycle_ticks = cycle_ticks.max(1) as f64;
        Self {
            cycle_ticks,
            position: cycle_ticks / 4.0,
            time_multiplier: 1.0,
            paused: false,
        }
    }

    pub fn tick(&mut self) {
        if !self.paused {
            self.position = (self.position + self.time_multiplier) % self.cycle_ticks;
        }
    }

    /// Phase in [0, 1)
    pub fn phase(&self) -> f64 {
        self.position / self.cycle_ticks
    }

    /// Set the phase directly (0.0 = midnight, 0.5 = noon)
    pub fn set_phase(&mut self, phase: f64) {
        self.position = phase.rem_euclid(1.0) * self.cycle_ticks;
    }

    pub fn is_daytime(&self) -> bool {
        let phase = self.phase();
        (0.2..0.8).contains(&phase)
    }

    /// Light level from 0.15 (moonlight) to 1.0
    pub fn light_level(&self) -> f64 {
        let phase = self.phase();
        match phase {
            p if (0.25..0.35).contains(&p) => ((p - 0.25) / 0.1).max(0.15),
            p if (0.35..0.65).contains(&p) => 1.0,
            p if (0.65..0.75).contains(&p) => ((0.75 - p) / 0.1).max(0.15),
            p if (0.75..0.85).contains(&p) => (1.0 - (p - 0.75) / 0.1).max(0.15),
            p if (0.15..0.25).contains(&p) => ((p - 0.15) / 0.1).max(0.15),
            _ => 0.15,
        }
    }

    pub fn period(&self) -> DayPeriod {
        let phase = self.phase();
        if (0.15..0.25).contains(&phase) {
            DayPeriod::Dawn
        } else if (0.25..0.75).contains(&phase) {
            DayPeriod::Day
        } else if (0.75..0.85).contains(&phase) {
            DayPeriod::Dusk
        } else {
            DayPeriod::Night
        }
    }

    /// Clock time as "HH:MM"
    pub fn time_string(&self) -> String {
        let phase = self.phase();
        let minutes_total = (phase * 24.0 * 60.0) as u32;
        format!("{:02}:{:02}", (minutes_total / 60) % 24, minutes_total % 60)
    }

    pub fn set_time_multiplier(&mut self, multiplier: f64) {
        self.time_multiplier = multiplier.max(0.0);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self::new(36_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_sunrise() {
        let cycle = DayNightCycle::new(1000);
        assert!((cycle.phase() - 0.25).abs() < 1e-12);
        assert!(cycle.is_daytime());
        assert_eq!(cycle.period(), DayPeriod::Day);
    }

    #[test]
    fn test_tick_wraps() {
        let mut cycle = DayNightCycle::new(4);
        for _ in 0..4 {
            cycle.tick();
        }
        assert!((cycle.phase() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_light_levels() {
        let mut cycle = DayNightCycle::new(1000);
        cycle.set_phase(0.5);
        assert_eq!(cycle.light_level(), 1.0);
        cycle.set_phase(0.0);
        assert_eq!(cycle.light_level(), 0.15);
        assert_eq!(cycle.period(), DayPeriod::Night);
        assert!(!cycle.is_daytime());
    }

    #[test]
    fn test_paused() {
        let mut cycle = DayNightCycle::new(1000);
        cycle.set_paused(true);
        let before = cycle.phase();
        cycle.tick();
        assert_eq!(cycle.phase(), before);
    }

    #[test]
    fn test_time_string() {
        let mut cycle = DayNightCycle::new(1000);
        cycle.set_phase(0.5);
        assert_eq!(cycle.time_string(), "12:00");
    }
}
