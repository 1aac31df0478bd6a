//! Shark: chases the nearest fish or wanders.

use super::fish::Fish;
use super::motion::{self, Body};
use super::CreatureKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cruise speed every shark velocity is normalized to
pub const SHARK_SPEED: f64 = 4.5;
/// Fish farther than this are ignored
pub const SHARK_DETECTION_RADIUS: f64 = 200.0;

const CHASE_WEIGHT: f64 = 0.2;
const WANDER_JITTER: f64 = 0.05;

/// A predator swimming among the fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shark {
    pub id: u64,
    pub body: Body,
}

impl Shark {
    pub fn new(id: u64, x: f64, y: f64, heading: f64) -> Self {
        Self {
            id,
            body: Body::new(x, y, heading, SHARK_SPEED),
        }
    }

    #[inline]
    pub fn kind(&self) -> CreatureKind {
        CreatureKind::Shark
    }

    /// Shark at a random position and heading
    pub fn random(id: u64, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        Self::new(id, x, y, rng.gen::<f64>() * std::f64::consts::TAU)
    }

    /// Advance one tick.
    ///
    /// `prey` holds the fish found near the shark. The closest live one
    /// inside the detection radius is chased, otherwise the shark wanders.
    pub fn update<'a, I>(&mut self, prey: I, width: f64, height: f64, rng: &mut impl Rng)
    where
        I: IntoIterator<Item = &'a Fish>,
    {
        let max_sq = SHARK_DETECTION_RADIUS * SHARK_DETECTION_RADIUS;
        let mut target: Option<(f64, f64)> = None;
        let mut best = max_sq;

        for fish in prey.into_iter().filter(|f| f.is_alive() && f.kind().is_prey()) {
            let d = self.body.distance_sq_to(fish.x(), fish.y());
            if d < best {
                best = d;
                target = Some((fish.x(), fish.y()));
            }
        }

        match target {
            Some((tx, ty)) => motion::steer_toward(&mut self.body, tx, ty, CHASE_WEIGHT),
            None => {
                self.body.vx += rng.gen_range(-WANDER_JITTER..WANDER_JITTER);
                self.body.vy += rng.gen_range(-WANDER_JITTER..WANDER_JITTER);
            }
        }

        let speed = self.kind().speed();
        motion::normalize(&mut self.body, speed);
        motion::integrate(&mut self.body);
        motion::bounce(&mut self.body, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::Species;

    #[test]
    fn test_shark_chases_nearest() {
        let mut rng = rand::thread_rng();
        let mut shark = Shark::new(0, 100.0, 100.0, std::f64::consts::FRAC_PI_2);
        let near = Fish::new(1, 150.0, 100.0, 0.0, Species::Small, 1200.0, &mut rng);
        let far = Fish::new(2, 100.0, 290.0, 0.0, Species::Small, 1200.0, &mut rng);

        shark.update([&far, &near], 1000.0, 1000.0, &mut rng);
        assert!(shark.body.vx > 0.0);
        assert!((shark.body.speed() - SHARK_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_shark_ignores_distant_fish() {
        let mut rng = rand::thread_rng();
        let mut shark = Shark::new(0, 100.0, 100.0, 0.0);
        let far = Fish::new(1, 900.0, 900.0, 0.0, Species::Small, 1200.0, &mut rng);
        shark.update([&far], 1000.0, 1000.0, &mut rng);
        // Wandering barely changes heading
        assert!(shark.body.vx > 4.0);
    }

    #[test]
    fn test_shark_moves_then_bounces() {
        let mut rng = rand::thread_rng();
        let mut shark = Shark::new(0, 998.0, 500.0, 0.0);
        shark.update(std::iter::empty(), 1000.0, 1000.0, &mut rng);

        // Moved from 998 past the wall, then clamped back onto it
        assert_eq!(shark.body.trail.front().copied(), Some((998.0, 500.0)));
        assert_eq!(shark.body.x, 1000.0);
        assert!(shark.body.vx < 0.0);
    }

    #[test]
    fn test_shark_never_ends_tick_outside() {
        let mut rng = rand::thread_rng();
        let mut shark = Shark::new(0, 5.0, 5.0, std::f64::consts::PI * 1.25);
        for _ in 0..200 {
            shark.update(std::iter::empty(), 300.0, 200.0, &mut rng);
            assert!((0.0..=300.0).contains(&shark.body.x));
            assert!((0.0..=200.0).contains(&shark.body.y));
        }
    }

    #[test]
    fn test_shark_skips_dead_fish() {
        let mut rng = rand::thread_rng();
        let mut shark = Shark::new(0, 100.0, 100.0, std::f64::consts::FRAC_PI_2);
        let mut dead = Fish::new(1, 150.0, 100.0, 0.0, Species::Small, 1200.0, &mut rng);
        dead.kill();
        shark.update([&dead], 1000.0, 1000.0, &mut rng);
        // Wandering keeps the southward heading
        assert!(shark.body.vy > 4.0);
        assert_eq!(shark.kind().speed(), SHARK_SPEED);
    }
}
