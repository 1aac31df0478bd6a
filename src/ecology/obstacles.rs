//! Transient obstacles placed by the user.
//!
//! Each obstacle is a circular zone fish steer away from. Obstacles count
//! down a fixed lifetime and disappear when it runs out.

use serde::{Deserialize, Serialize};

/// A circular no-go zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Ticks left before removal
    pub remaining: u32,
    /// Lifetime at creation, for fade-out rendering
    pub lifetime: u32,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, radius: f64, lifetime: u32) -> Self {
        Self {
            x,
            y,
            radius: radius.max(0.0),
            remaining: lifetime,
            lifetime,
        }
    }

    /// Count down one tick
    pub fn update(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining life in [0, 1]
    pub fn fade(&self) -> f64 {
        if self.lifetime == 0 {
            0.0
        } else {
            self.remaining as f64 / self.lifetime as f64
        }
    }
}

/// All live obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Decrement lifetimes and drop expired obstacles
    pub fn update(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
        self.obstacles.retain(|o| !o.is_expired());
    }

    pub fn count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_expires() {
        let mut field = ObstacleField::new();
        field.add(Obstacle::new(10.0, 10.0, 30.0, 3));
        field.add(Obstacle::new(50.0, 50.0, 30.0, 5));

        for _ in 0..3 {
            field.update();
        }
        assert_eq!(field.count(), 1);

        for _ in 0..2 {
            field.update();
        }
        assert_eq!(field.count(), 0);
    }

    #[test]
    fn test_fade() {
        let mut obstacle = Obstacle::new(0.0, 0.0, 30.0, 4);
        assert_eq!(obstacle.fade(), 1.0);
        obstacle.update();
        assert_eq!(obstacle.fade(), 0.75);
    }

    #[test]
    fn test_zero_lifetime() {
        let obstacle = Obstacle::new(0.0, 0.0, 30.0, 0);
        assert!(obstacle.is_expired());
        assert_eq!(obstacle.fade(), 0.0);
    }
}
