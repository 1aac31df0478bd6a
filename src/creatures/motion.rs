//! Motion primitives shared by every swimming creature.
//!
//! Fish and sharks own a [`Body`] and drive it through these free functions;
//! only the steering decisions differ between them.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of past positions kept for the trail
pub const TRAIL_LENGTH: usize = 5;

/// Position, velocity and trail of a creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Most recent position first
    pub trail: VecDeque<(f64, f64)>,
}

impl Body {
    /// Body at (x, y) heading `heading` radians at `speed`
    pub fn new(x: f64, y: f64, heading: f64, speed: f64) -> Self {
        Self {
            x,
            y,
            vx: heading.cos() * speed,
            vy: heading.sin() * speed,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Heading in radians
    #[inline]
    pub fn heading(&self) -> f64 {
        self.vy.atan2(self.vx)
    }

    #[inline]
    pub fn distance_sq_to(&self, x: f64, y: f64) -> f64 {
        distance_sq(self.x, self.y, x, y)
    }
}

#[inline]
pub fn distance_sq(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

/// Rescale velocity to exactly `speed`. A zero velocity is left untouched.
#[inline]
pub fn normalize(body: &mut Body, speed: f64) {
    let length = body.speed();
    if length > 0.0 && length.is_finite() {
        body.vx = body.vx / length * speed;
        body.vy = body.vy / length * speed;
    }
}

/// Push velocity away from (x, y) by `weight`, then renormalize
#[inline]
pub fn steer_away(body: &mut Body, x: f64, y: f64, weight: f64, speed: f64) {
    let distance = body.distance_sq_to(x, y).sqrt();
    if distance > 0.0 {
        body.vx -= (x - body.x) / distance * weight;
        body.vy -= (y - body.y) / distance * weight;
    }
    normalize(body, speed);
}

/// Pull velocity toward (x, y) by `weight` without renormalizing
#[inline]
pub fn steer_toward(body: &mut Body, x: f64, y: f64, weight: f64) {
    let distance = body.distance_sq_to(x, y).sqrt();
    if distance > 0.0 {
        body.vx += (x - body.x) / distance * weight;
        body.vy += (y - body.y) / distance * weight;
    }
}

/// Record the current position in the trail and advance by one velocity step
#[inline]
pub fn integrate(body: &mut Body) {
    body.trail.push_front((body.x, body.y));
    body.trail.truncate(TRAIL_LENGTH);
    body.x += body.vx;
    body.y += body.vy;
}

/// Clamp into [0, width] x [0, height], pointing velocity back inside.
///
/// Only the sign of a velocity component changes, so speed is preserved.
/// Returns whether the body touched a wall.
pub fn confine(body: &mut Body, width: f64, height: f64) -> bool {
    let mut hit = false;

    if body.x < 0.0 {
        body.x = 0.0;
        body.vx = body.vx.abs();
        hit = true;
    } else if body.x > width {
        body.x = width;
        body.vx = -body.vx.abs();
        hit = true;
    }

    if body.y < 0.0 {
        body.y = 0.0;
        body.vy = body.vy.abs();
        hit = true;
    } else if body.y > height {
        body.y = height;
        body.vy = -body.vy.abs();
        hit = true;
    }

    hit
}

/// Invert any velocity component whose axis crossed a wall
pub fn bounce(body: &mut Body, width: f64, height: f64) {
    if body.x < 0.0 {
        body.x = 0.0;
        body.vx = -body.vx;
    } else if body.x > width {
        body.x = width;
        body.vx = -body.vx;
    }

    if body.y < 0.0 {
        body.y = 0.0;
        body.vy = -body.vy;
    } else if body.y > height {
        body.y = height;
        body.vy = -body.vy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let mut body = Body::new(0.0, 0.0, 0.0, 1.0);
        body.vx = 3.0;
        body.vy = 4.0;
        normalize(&mut body, 10.0);
        assert!((body.vx - 6.0).abs() < 1e-12);
        assert!((body.vy - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_velocity() {
        let mut body = Body::new(0.0, 0.0, 0.0, 0.0);
        normalize(&mut body, 3.0);
        assert_eq!((body.vx, body.vy), (0.0, 0.0));
    }

    #[test]
    fn test_trail_bounded() {
        let mut body = Body::new(0.0, 0.0, 0.0, 1.0);
        for _ in 0..10 {
            integrate(&mut body);
        }
        assert_eq!(body.trail.len(), TRAIL_LENGTH);
        assert_eq!(body.trail[0], (9.0, 0.0));
        assert!((body.x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_confine_keeps_speed() {
        let mut body = Body::new(-3.0, 50.0, std::f64::consts::PI, 2.0);
        assert!(confine(&mut body, 100.0, 100.0));
        assert_eq!(body.x, 0.0);
        assert!(body.vx > 0.0);
        assert!((body.speed() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_steer_away() {
        let mut body = Body::new(50.0, 50.0, std::f64::consts::FRAC_PI_2, 1.0);
        steer_away(&mut body, 60.0, 50.0, 0.5, 1.0);
        assert!(body.vx < 0.0);
        assert!((body.speed() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_inverts() {
        let mut body = Body::new(101.0, 50.0, 0.0, 2.0);
        bounce(&mut body, 100.0, 100.0);
        assert_eq!(body.x, 100.0);
        assert!(body.vx < 0.0);
    }
}
