//! Procedural current and temperature field.
//!
//! The field is a fixed grid of samples recomputed from scratch every tick
//! from the global field time and the selected pattern. No per-cell state
//! survives between ticks beyond the current sample.

use crate::config::FieldConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Analytic current patterns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentPattern {
    /// Very gentle currents
    Calm,
    /// Swirling gyres
    #[default]
    Swirl,
    /// Faster, stronger gyres
    Strong,
    /// Intense circular motion around the centre
    Whirlpool,
    /// Left-right flow
    Horizontal,
    /// Up-down flow
    Vertical,
}

impl CurrentPattern {
    pub const ALL: [CurrentPattern; 6] = [
        CurrentPattern::Calm,
        CurrentPattern::Swirl,
        CurrentPattern::Strong,
        CurrentPattern::Whirlpool,
        CurrentPattern::Horizontal,
        CurrentPattern::Vertical,
    ];

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            CurrentPattern::Calm => "Calm",
            CurrentPattern::Swirl => "Swirl",
            CurrentPattern::Strong => "Strong",
            CurrentPattern::Whirlpool => "Whirlpool",
            CurrentPattern::Horizontal => "Horizontal",
            CurrentPattern::Vertical => "Vertical",
        }
    }

    /// Current vector at normalized coordinates for field time `t`
    fn vector(&self, nx: f64, ny: f64, t: f64, gyre: (f64, f64)) -> (f64, f64) {
        match self {
            CurrentPattern::Calm => (
                0.1 * (t * 0.2 + nx * 3.0).sin(),
                0.1 * (t * 0.2 + ny * 3.0).cos(),
            ),
            CurrentPattern::Swirl => {
                let cx = nx - 0.5 + (t * 0.4 + gyre.0).sin() * 0.15;
                let cy = ny - 0.5 + (t * 0.35 + gyre.1).cos() * 0.15;
                let swirl = 0.35 + 0.25 * (t * 0.6 + nx * 5.0 + ny * 4.0).sin();
                let (vx, vy) = tangential(cx, cy, swirl);
                (vx + 0.25 * (t * 0.9 + ny * 6.0).sin(), vy)
            }
            CurrentPattern::Strong => {
                let cx = nx - 0.5 + (t * 0.6 + gyre.0).sin() * 0.2;
                let cy = ny - 0.5 + (t * 0.55 + gyre.1).cos() * 0.2;
                let swirl = 0.6 + 0.4 * (t * 0.8 + nx * 6.0 + ny * 5.0).sin();
                let (vx, vy) = tangential(cx, cy, swirl);
                (vx + 0.5 * (t * 1.2 + ny * 8.0).sin(), vy)
            }
            CurrentPattern::Whirlpool => {
                let swirl = 0.8 + 0.3 * t.sin();
                tangential(nx - 0.5, ny - 0.5, swirl)
            }
            CurrentPattern::Horizontal => (
                0.5 * (t * 0.5 + ny * 4.0).sin(),
                0.1 * (t * 0.3 + nx * 2.0).cos(),
            ),
            CurrentPattern::Vertical => (
                0.1 * (t * 0.3 + nx * 2.0).sin(),
                0.5 * (t * 0.5 + ny * 4.0).cos(),
            ),
        }
    }
}

/// Vector perpendicular to the radius (cx, cy), scaled by `swirl`
#[inline]
fn tangential(cx: f64, cy: f64, swirl: f64) -> (f64, f64) {
    let dist = (cx * cx + cy * cy).sqrt() + 1e-4;
    ((-cy / dist) * swirl, (cx / dist) * swirl)
}

/// One sample of the field
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCell {
    pub vx: f64,
    pub vy: f64,
    pub temperature: f64,
}

/// Time-varying current and temperature field
#[derive(Clone, Debug)]
pub struct EnvironmentalField {
    cells_x: usize,
    cells_y: usize,
    cell_width: f64,
    cell_height: f64,
    /// cells[y * cells_x + x]
    cells: Vec<FieldCell>,
    time: f64,
    time_scale: f64,
    gyre_offset: (f64, f64),
    current_strength: f64,
    animation_speed: f64,
    pattern: CurrentPattern,
}

impl EnvironmentalField {
    /// Create a field covering `width` x `height`
    pub fn new(width: f64, height: f64, config: &FieldConfig) -> Self {
        let mut rng = rand::thread_rng();
        let cells = config.cells.max(1);

        Self {
            cells_x: cells,
            cells_y: cells,
            cell_width: width / cells as f64,
            cell_height: height / cells as f64,
            cells: vec![FieldCell::default(); cells * cells],
            time: 0.0,
            time_scale: config.time_scale,
            gyre_offset: (rng.gen::<f64>(), rng.gen::<f64>()),
            current_strength: 1.0,
            animation_speed: 1.0,
            pattern: CurrentPattern::default(),
        }
    }

    /// Advance field time and recompute every cell
    pub fn tick(&mut self, delta_time: f64) {
        self.time += delta_time * self.time_scale * self.animation_speed;
        let t = self.time;

        for y in 0..self.cells_y {
            let ny = y as f64 / self.cells_y as f64;
            for x in 0..self.cells_x {
                let nx = x as f64 / self.cells_x as f64;
                let (vx, vy) = self.pattern.vector(nx, ny, t, self.gyre_offset);

                // Calmer water along the borders
                let edge_falloff = nx.min(1.0 - nx).min(ny.min(1.0 - ny)) * 2.0;
                let strength = edge_falloff.max(0.15) * self.current_strength;

                self.cells[y * self.cells_x + x] = FieldCell {
                    vx: vx * strength,
                    vy: vy * strength,
                    // Warmer near the surface
                    temperature: 18.0 + 8.0 * (1.0 - ny) + 2.0 * (t + nx * 1.2).sin(),
                };
            }
        }
    }

    /// Cell index for a world position, clamped into the grid
    #[inline]
    fn index_of(&self, world_x: f64, world_y: f64) -> usize {
        let cx = clamp_cell(world_x / self.cell_width, self.cells_x);
        let cy = clamp_cell(world_y / self.cell_height, self.cells_y);
        cy * self.cells_x + cx
    }

    /// Current vector at a world position
    #[inline]
    pub fn sample_vector(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let cell = &self.cells[self.index_of(world_x, world_y)];
        (cell.vx, cell.vy)
    }

    /// Water temperature at a world position
    #[inline]
    pub fn sample_temperature(&self, world_x: f64, world_y: f64) -> f64 {
        self.cells[self.index_of(world_x, world_y)].temperature
    }

    /// Set the strength multiplier, clamped to [0, 2]
    pub fn set_current_strength(&mut self, strength: f64) {
        self.current_strength = clamp_or(strength, 0.0, 2.0, self.current_strength);
    }

    pub fn current_strength(&self) -> f64 {
        self.current_strength
    }

    /// Set the animation multiplier, clamped to [0, 3]
    pub fn set_animation_speed(&mut self, speed: f64) {
        self.animation_speed = clamp_or(speed, 0.0, 3.0, self.animation_speed);
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    pub fn set_pattern(&mut self, pattern: CurrentPattern) {
        self.pattern = pattern;
    }

    pub fn pattern(&self) -> CurrentPattern {
        self.pattern
    }

    /// Field time (advances with animation speed)
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Row-major cell samples for visualization
    pub fn cells(&self) -> &[FieldCell] {
        &self.cells
    }

    /// Sample at grid coordinates
    pub fn cell(&self, x: usize, y: usize) -> Option<&FieldCell> {
        if x < self.cells_x && y < self.cells_y {
            self.cells.get(y * self.cells_x + x)
        } else {
            None
        }
    }

    /// Grid resolution (cells_x, cells_y)
    pub fn resolution(&self) -> (usize, usize) {
        (self.cells_x, self.cells_y)
    }

    /// Size of one cell in world units (width, height)
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }
}

#[inline]
fn clamp_cell(v: f64, cells: usize) -> usize {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        (v as usize).min(cells - 1)
    }
}

/// Clamp `value` to [min, max], keeping `fallback` for NaN
#[inline]
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
