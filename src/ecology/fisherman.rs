//! The fisherman's hook.
//!
//! A two-state machine: idle, or fishing. A fishing trip drops the hook to a
//! target depth and reels it back to the surface.

use crate::config::FishermanConfig;
use serde::{Deserialize, Serialize};

/// Where the hook is in its trip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhase {
    Descending,
    Ascending,
}

/// The single fisherman of the ocean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fisherman {
    pub x: f64,
    pub y: f64,
    fishing: bool,
    phase: HookPhase,
    target_depth: f64,
    speed: f64,
    catch_radius: f64,
}

impl Fisherman {
    /// Park the hook above the surface at `x`
    pub fn new(x: f64, config: &FishermanConfig) -> Self {
        Self {
            x,
            y: -50.0,
            fishing: false,
            phase: HookPhase::Descending,
            target_depth: 0.0,
            speed: config.speed,
            catch_radius: config.catch_radius,
        }
    }

    /// Begin a trip at `x`, dropping the hook to `depth`
    pub fn start_fishing(&mut self, x: f64, depth: f64) {
        self.x = x;
        self.y = 0.0;
        self.target_depth = depth;
        self.fishing = true;
        self.phase = HookPhase::Descending;
    }

    /// End the current trip immediately
    pub fn stop(&mut self) {
        self.fishing = false;
        self.phase = HookPhase::Ascending;
    }

    /// Move the hook one tick along its trip
    pub fn update(&mut self) {
        if !self.fishing {
            return;
        }

        match self.phase {
            HookPhase::Descending => {
                self.y += self.speed;
                if self.y >= self.target_depth {
                    self.phase = HookPhase::Ascending;
                }
            }
            HookPhase::Ascending => {
                self.y -= self.speed;
                if self.y <= 0.0 {
                    self.fishing = false;
                }
            }
        }
    }

    /// Whether a fish at (x, y) is on the hook
    #[inline]
    pub fn check_catch(&self, x: f64, y: f64) -> bool {
        if !self.fishing {
            return false;
        }
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy < self.catch_radius * self.catch_radius
    }

    pub fn is_fishing(&self) -> bool {
        self.fishing
    }

    pub fn phase(&self) -> HookPhase {
        self.phase
    }

    pub fn target_depth(&self) -> f64 {
        self.target_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fisherman() -> Fisherman {
        Fisherman::new(100.0, &FishermanConfig::default())
    }

    #[test]
    fn test_idle_does_not_move() {
        let mut f = fisherman();
        f.update();
        assert_eq!(f.y, -50.0);
        assert!(!f.check_catch(100.0, -50.0));
    }

    #[test]
    fn test_full_trip() {
        let mut f = fisherman();
        f.start_fishing(200.0, 9.0);
        assert!(f.is_fishing());

        for _ in 0..3 {
            f.update();
        }
        assert_eq!(f.y, 9.0);
        assert_eq!(f.phase(), HookPhase::Ascending);

        for _ in 0..3 {
            f.update();
        }
        assert!(!f.is_fishing());
    }

    #[test]
    fn test_catch_radius() {
        let mut f = fisherman();
        f.start_fishing(200.0, 100.0);
        assert!(f.check_catch(210.0, 10.0));
        assert!(!f.check_catch(230.0, 0.0));
    }

    #[test]
    fn test_stop() {
        let mut f = fisherman();
        f.start_fishing(200.0, 100.0);
        f.stop();
        assert!(!f.is_fishing());
        assert!(!f.check_catch(200.0, 0.0));
    }
}
