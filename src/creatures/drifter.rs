//! Ambient creatures that drift with the current: jellyfish and sea turtles.
//!
//! They neither eat nor get eaten; they only read the current field.

use crate::context::SimulationContext;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Which drifter to add
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrifterKind {
    Jellyfish,
    SeaTurtle,
}

/// Pulsing jellyfish carried by the current
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jellyfish {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub bell_radius: f64,
    pub pulse_phase: f64,
    pulse_speed: f64,
}

impl Jellyfish {
    pub fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y,
            vx: (rng.gen::<f64>() - 0.5) * 0.5,
            vy: (rng.gen::<f64>() - 0.5) * 0.3,
            bell_radius: 15.0 + rng.gen::<f64>() * 25.0,
            pulse_phase: rng.gen::<f64>() * TAU,
            pulse_speed: 0.03 + rng.gen::<f64>() * 0.02,
        }
    }

    pub fn update(&mut self, ctx: &SimulationContext) {
        self.pulse_phase += self.pulse_speed;

        // Push down on the pulse, float up during recovery
        let pulse = self.pulse_phase.sin();
        if pulse > 0.0 {
            self.vy += pulse * 0.02;
        } else {
            self.vy -= 0.01;
        }

        let (cx, cy) = ctx.field.sample_vector(self.x, self.y);
        self.vx = (self.vx + cx * 0.15) * 0.98;
        self.vy = (self.vy + cy * 0.15) * 0.98;

        self.x += self.vx;
        self.y += self.vy;

        // Wrap horizontally, stay under the surface, bounce off the floor
        let r = self.bell_radius;
        if self.x < -r {
            self.x = ctx.width + r;
        } else if self.x > ctx.width + r {
            self.x = -r;
        }
        if self.y < -r {
            self.y = ctx.height * 0.1;
        }
        if self.y > ctx.height - r {
            self.vy = -self.vy.abs() - 0.5;
        }
    }
}

/// Sea turtle wandering between random targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeaTurtle {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub shell_size: f64,
    pub flipper_phase: f64,
    speed: f64,
    target: (f64, f64),
    wander_timer: u32,
}

impl SeaTurtle {
    pub fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y,
            heading: rng.gen::<f64>() * TAU,
            shell_size: 40.0 + rng.gen::<f64>() * 20.0,
            flipper_phase: rng.gen::<f64>() * TAU,
            speed: 1.0 + rng.gen::<f64>() * 0.5,
            target: (x, y),
            wander_timer: 0,
        }
    }

    #[inline]
    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    pub fn update(&mut self, ctx: &SimulationContext, rng: &mut impl Rng) {
        self.flipper_phase += 0.08;
        self.wander_timer = self.wander_timer.saturating_sub(1);

        let (dx, dy) = (self.target.0 - self.x, self.target.1 - self.y);
        if self.wander_timer == 0 || dx * dx + dy * dy < 2500.0 {
            self.target = (
                100.0 + rng.gen::<f64>() * (ctx.width - 200.0).max(0.0),
                100.0 + rng.gen::<f64>() * (ctx.height - 200.0).max(0.0),
            );
            self.wander_timer = rng.gen_range(200..500);
        }

        // Turn smoothly toward the target
        let desired = (self.target.1 - self.y).atan2(self.target.0 - self.x);
        let mut diff = desired - self.heading;
        while diff > PI {
            diff -= TAU;
        }
        while diff < -PI {
            diff += TAU;
        }
        self.heading += diff * 0.02;

        let (cx, cy) = ctx.field.sample_vector(self.x, self.y);
        self.x += self.heading.cos() * self.speed + cx * 0.1;
        self.y += self.heading.sin() * self.speed + cy * 0.1;

        let margin = self.shell_size * 2.0;
        if self.x < margin {
            self.x = margin;
            self.target.0 = ctx.width / 2.0;
        } else if self.x > ctx.width - margin {
            self.x = ctx.width - margin;
            self.target.0 = ctx.width / 2.0;
        }
        if self.y < margin {
            self.y = margin;
            self.target.1 = ctx.height / 2.0;
        } else if self.y > ctx.height - margin {
            self.y = ctx.height - margin;
            self.target.1 = ctx.height / 2.0;
        }
    }
}

/// Either kind of drifting creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Drifter {
    Jellyfish(Jellyfish),
    SeaTurtle(SeaTurtle),
}

impl Drifter {
    /// A new drifter of `kind` at a random position suited to it
    pub fn spawn(kind: DrifterKind, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        match kind {
            DrifterKind::Jellyfish => {
                // Upper two thirds of the water column
                let x = rng.gen::<f64>() * width;
                let y = height * (0.1 + rng.gen::<f64>() * 0.6);
                Drifter::Jellyfish(Jellyfish::new(x, y, rng))
            }
            DrifterKind::SeaTurtle => {
                let x = 100.0 + rng.gen::<f64>() * (width - 200.0).max(0.0);
                let y = 100.0 + rng.gen::<f64>() * (height - 200.0).max(0.0);
                Drifter::SeaTurtle(SeaTurtle::new(x, y, rng))
            }
        }
    }

    pub fn kind(&self) -> DrifterKind {
        match self {
            Drifter::Jellyfish(_) => DrifterKind::Jellyfish,
            Drifter::SeaTurtle(_) => DrifterKind::SeaTurtle,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            Drifter::Jellyfish(j) => (j.x, j.y),
            Drifter::SeaTurtle(t) => (t.x, t.y),
        }
    }

    pub fn update(&mut self, ctx: &SimulationContext, rng: &mut impl Rng) {
        match self {
            Drifter::Jellyfish(j) => j.update(ctx),
            Drifter::SeaTurtle(t) => t.update(ctx, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FieldConfig};
    use crate::ecology::EnvironmentalField;
    use crate::grid::SpatialGrid;

    fn with_ctx(f: impl FnOnce(&SimulationContext)) {
        let config = Config::default();
        let grid = SpatialGrid::new(800.0, 600.0, 100.0);
        let mut field = EnvironmentalField::new(800.0, 600.0, &FieldConfig::default());
        field.tick(1.0);
        let ctx = SimulationContext {
            width: 800.0,
            height: 600.0,
            grid: &grid,
            field: &field,
            plankton: &[],
            sharks: &[],
            obstacles: &[],
            fish: &config.fish,
        };
        f(&ctx);
    }

    #[test]
    fn test_turtle_stays_inside_margin() {
        let mut rng = rand::thread_rng();
        with_ctx(|ctx| {
            let mut turtle = SeaTurtle::new(400.0, 300.0, &mut rng);
            for _ in 0..2000 {
                turtle.update(ctx, &mut rng);
                let margin = turtle.shell_size * 2.0;
                assert!(turtle.x >= margin && turtle.x <= 800.0 - margin);
                assert!(turtle.y >= margin && turtle.y <= 600.0 - margin);
            }
        });
    }

    #[test]
    fn test_jellyfish_wraps_horizontally() {
        let mut rng = rand::thread_rng();
        with_ctx(|ctx| {
            let mut jelly = Jellyfish::new(0.0, 300.0, &mut rng);
            jelly.x = -jelly.bell_radius - 5.0;
            jelly.vx = 0.0;
            jelly.update(ctx);
            assert!(jelly.x > 800.0);
        });
    }

    #[test]
    fn test_spawn_kind() {
        let mut rng = rand::thread_rng();
        let d = Drifter::spawn(DrifterKind::SeaTurtle, 800.0, 600.0, &mut rng);
        assert_eq!(d.kind(), DrifterKind::SeaTurtle);
        let (x, y) = d.position();
        assert!((100.0..=700.0).contains(&x) && (100.0..=500.0).contains(&y));
    }
}
