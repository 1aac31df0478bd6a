//! Fish behaviour: flocking steering, energy and feeding.

use super::motion::{self, Body};
use super::species::{Rgb, Species, SpeciesTraits};
use super::CreatureKind;
use crate::context::SimulationContext;
use crate::creatures::Shark;
use crate::ecology::{EnvironmentalField, Obstacle, PlanktonPatch};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Unique fish identifier
pub type FishId = u64;

/// Sharks closer than this make a fish flee
pub const PREDATOR_DETECTION_RADIUS: f64 = 150.0;

const FLEE_WEIGHT: f64 = 0.8;
const OBSTACLE_WEIGHT: f64 = 0.5;
const CROWD_WEIGHT: f64 = 0.25;
const WALL_PUSH: f64 = 0.25;
const WALL_PADDING: f64 = 2.5;

/// Offspring requested by a parent during the fish phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthRequest {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub species: Species,
}

/// A schooling fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub id: FishId,
    pub body: Body,
    pub species: Species,
    pub color: Rgb,
    pub energy: f64,
    alive: bool,
}

impl Fish {
    /// Create a fish heading `heading` radians at its species speed
    pub fn new(
        id: FishId,
        x: f64,
        y: f64,
        heading: f64,
        species: Species,
        energy: f64,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            body: Body::new(x, y, heading, species.traits().speed),
            species,
            color: species.random_color(rng),
            energy,
            alive: true,
        }
    }

    /// Create a fish of random species at a random position and heading
    pub fn random(id: FishId, width: f64, height: f64, energy: f64, rng: &mut impl Rng) -> Self {
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        let heading = rng.gen::<f64>() * std::f64::consts::TAU;
        let species = Species::random(rng);
        Self::new(id, x, y, heading, species, energy, rng)
    }

    /// Create a fish from a birth request
    pub fn from_birth(id: FishId, birth: &BirthRequest, energy: f64, rng: &mut impl Rng) -> Self {
        Self::new(id, birth.x, birth.y, birth.heading, birth.species, energy, rng)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn traits(&self) -> &'static SpeciesTraits {
        self.species.traits()
    }

    #[inline]
    pub fn kind(&self) -> CreatureKind {
        CreatureKind::Fish(self.species)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.body.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.body.y
    }

    /// Mark the fish dead (caught, or out of energy)
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Advance the fish by one tick.
    ///
    /// `nearby` holds the previous-tick state of neighbouring fish and may
    /// include this fish itself; it is skipped by id. Returns whether the
    /// fish fed this tick.
    pub fn update(&mut self, nearby: &[&Fish], ctx: &SimulationContext) -> bool {
        if !self.alive {
            return false;
        }

        let traits = self.traits();

        // Priority chain: the first stage that steers claims the tick
        let claimed = self.avoid_walls(ctx.width, ctx.height)
            || self.avoid_sharks(ctx.sharks)
            || self.avoid_obstacles(ctx.obstacles)
            || self.avoid_crowding(nearby);
        if !claimed {
            self.align_with_school(nearby);
        }
        motion::normalize(&mut self.body, traits.speed);

        self.drift(ctx.field, ctx.fish.current_influence);
        motion::integrate(&mut self.body);
        motion::confine(&mut self.body, ctx.width, ctx.height);

        let fed = self.metabolize(ctx.plankton, ctx.fish.energy_decay, ctx.fish.feed_gain);
        if self.energy <= 0.0 {
            self.alive = false;
        }
        fed
    }

    /// Hard clamp into the world, then push away from any edge inside the padding band
    fn avoid_walls(&mut self, width: f64, height: f64) -> bool {
        let traits = self.traits();
        let mut turned = motion::confine(&mut self.body, width, height);

        let padding = traits.min_distance() * WALL_PADDING;
        let push = traits.speed * WALL_PUSH;
        let body = &mut self.body;

        // Each axis picks its nearer edge independently
        if body.x < padding {
            body.vx += push;
            turned = true;
        } else if width - body.x < padding {
            body.vx -= push;
            turned = true;
        }

        if body.y < padding {
            body.vy += push;
            turned = true;
        } else if height - body.y < padding {
            body.vy -= push;
            turned = true;
        }

        if turned {
            motion::normalize(&mut self.body, traits.speed);
        }
        turned
    }

    /// Flee the nearest shark inside the detection radius
    fn avoid_sharks(&mut self, sharks: &[Shark]) -> bool {
        let nearest = nearest_by(sharks, |s| self.body.distance_sq_to(s.body.x, s.body.y));
        match nearest {
            Some((shark, dist_sq)) if dist_sq < PREDATOR_DETECTION_RADIUS * PREDATOR_DETECTION_RADIUS => {
                let speed = self.traits().speed;
                motion::steer_away(&mut self.body, shark.body.x, shark.body.y, speed * FLEE_WEIGHT, speed);
                true
            }
            _ => false,
        }
    }

    /// Steer out of the nearest obstacle if inside it
    fn avoid_obstacles(&mut self, obstacles: &[Obstacle]) -> bool {
        let nearest = nearest_by(obstacles, |o| self.body.distance_sq_to(o.x, o.y));
        match nearest {
            Some((obstacle, dist_sq)) if dist_sq < obstacle.radius * obstacle.radius => {
                let speed = self.traits().speed;
                motion::steer_away(&mut self.body, obstacle.x, obstacle.y, speed * OBSTACLE_WEIGHT, speed);
                true
            }
            _ => false,
        }
    }

    /// Keep personal space from the single nearest neighbour
    fn avoid_crowding(&mut self, nearby: &[&Fish]) -> bool {
        let id = self.id;
        let nearest = nearest_by(nearby.iter().filter(|f| f.id != id), |f| {
            self.body.distance_sq_to(f.body.x, f.body.y)
        });

        let traits = self.traits();
        let min_distance = traits.min_distance();
        match nearest {
            Some((other, dist_sq)) if dist_sq < min_distance * min_distance => {
                motion::steer_away(
                    &mut self.body,
                    other.body.x,
                    other.body.y,
                    traits.speed * CROWD_WEIGHT,
                    traits.speed,
                );
                true
            }
            _ => false,
        }
    }

    /// Blend heading toward the mean velocity of the school
    fn align_with_school(&mut self, nearby: &[&Fish]) {
        let traits = self.traits();
        let min_sq = traits.min_distance() * traits.min_distance();
        let max_sq = traits.max_distance() * traits.max_distance();

        let mut sum_vx = 0.0;
        let mut sum_vy = 0.0;
        let mut count = 0usize;

        for other in nearby.iter().filter(|f| f.id != self.id) {
            let dist_sq = self.body.distance_sq_to(other.body.x, other.body.y);
            if dist_sq > min_sq && dist_sq < max_sq {
                sum_vx += other.body.vx;
                sum_vy += other.body.vy;
                count += 1;
            }
        }

        if count > 0 {
            let strength = traits.schooling_strength;
            let n = count as f64;
            self.body.vx = (sum_vx / n) * strength + self.body.vx * (1.0 - strength);
            self.body.vy = (sum_vy / n) * strength + self.body.vy * (1.0 - strength);
            motion::normalize(&mut self.body, traits.speed);
        }
    }

    /// Let the local current push the fish
    fn drift(&mut self, field: &EnvironmentalField, influence: f64) {
        let (cx, cy) = field.sample_vector(self.body.x, self.body.y);
        self.body.vx += cx * influence;
        self.body.vy += cy * influence;
        let speed = self.kind().speed();
        motion::normalize(&mut self.body, speed);
    }

    /// Burn energy and feed from the first patch in reach
    fn metabolize(&mut self, plankton: &[PlanktonPatch], decay: f64, feed_gain: f64) -> bool {
        self.energy -= decay;

        match plankton.iter().find(|p| p.contains(self.body.x, self.body.y)) {
            Some(patch) => {
                let gained = patch.consume(feed_gain);
                self.energy += gained;
                gained > 0.0
            }
            None => false,
        }
    }

    /// Whether the fish has enough energy to reproduce
    #[inline]
    pub fn can_reproduce(&self, threshold: f64) -> bool {
        self.alive && self.energy > threshold
    }

    /// Pay the reproduction cost and describe the offspring
    pub fn reproduce(&mut self, cost: f64, jitter: f64, rng: &mut impl Rng) -> BirthRequest {
        self.energy -= cost;

        let (dx, dy) = match Normal::new(0.0, jitter.max(0.0)) {
            Ok(normal) => (normal.sample(rng), normal.sample(rng)),
            Err(_) => (0.0, 0.0),
        };

        BirthRequest {
            x: self.body.x + dx,
            y: self.body.y + dy,
            heading: rng.gen::<f64>() * std::f64::consts::TAU,
            species: self.species,
        }
    }
}

/// Item with the smallest key; the first one encountered wins ties
fn nearest_by<'a, T: 'a, I, F>(items: I, mut key: F) -> Option<(&'a T, f64)>
where
    I: IntoIterator<Item = &'a T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(&'a T, f64)> = None;
    for item in items {
        let d = key(item);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((item, d)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FieldConfig};
    use crate::ecology::{EnvironmentalField, Obstacle};
    use crate::grid::SpatialGrid;
    use std::f64::consts::FRAC_PI_2;

    struct Fixture {
        config: Config,
        grid: SpatialGrid,
        field: EnvironmentalField,
        plankton: Vec<PlanktonPatch>,
        sharks: Vec<Shark>,
        obstacles: Vec<Obstacle>,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Config::default();
            let mut field = EnvironmentalField::new(800.0, 600.0, &FieldConfig::default());
            field.set_current_strength(0.0);
            field.tick(1.0);
            Self {
                grid: SpatialGrid::new(800.0, 600.0, 100.0),
                field,
                plankton: Vec::new(),
                sharks: Vec::new(),
                obstacles: Vec::new(),
                config,
            }
        }

        fn ctx(&self) -> SimulationContext<'_> {
            SimulationContext {
                width: 800.0,
                height: 600.0,
                grid: &self.grid,
                field: &self.field,
                plankton: &self.plankton,
                sharks: &self.sharks,
                obstacles: &self.obstacles,
                fish: &self.config.fish,
            }
        }
    }

    fn fish_at(id: FishId, x: f64, y: f64, heading: f64, species: Species) -> Fish {
        let mut rng = rand::thread_rng();
        Fish::new(id, x, y, heading, species, 1200.0, &mut rng)
    }

    #[test]
    fn test_speed_normalized_after_update() {
        let fixture = Fixture::new();
        let mut rng = rand::thread_rng();
        for species in Species::ALL {
            let mut fish = Fish::random(1, 800.0, 600.0, 1200.0, &mut rng);
            fish.species = species;
            fish.update(&[], &fixture.ctx());
            assert!((fish.body.speed() - species.traits().speed).abs() < 1e-9);
        }
    }

    #[test]
    fn test_close_fish_steer_apart() {
        let fixture = Fixture::new();
        let a = fish_at(1, 400.0, 300.0, FRAC_PI_2, Species::Medium);
        let b = fish_at(2, 404.0, 300.0, FRAC_PI_2, Species::Medium);
        let before = a.body.distance_sq_to(b.x(), b.y());

        let (snap_a, snap_b) = (a.clone(), b.clone());
        let mut a = a;
        let mut b = b;
        a.update(&[&snap_a, &snap_b], &fixture.ctx());
        b.update(&[&snap_a, &snap_b], &fixture.ctx());

        let after = a.body.distance_sq_to(b.x(), b.y());
        assert!(after >= before, "{after} < {before}");
    }

    #[test]
    fn test_flees_shark() {
        let mut fixture = Fixture::new();
        fixture.sharks.push(Shark::new(0, 500.0, 300.0, 0.0));
        let mut fish = fish_at(1, 400.0, 300.0, FRAC_PI_2, Species::Large);
        fish.update(&[], &fixture.ctx());
        assert!(fish.body.vx < 0.0);
    }

    #[test]
    fn test_avoids_obstacle() {
        let mut fixture = Fixture::new();
        fixture.obstacles.push(Obstacle::new(410.0, 300.0, 30.0, 100));
        let mut fish = fish_at(1, 400.0, 300.0, FRAC_PI_2, Species::Large);
        fish.update(&[], &fixture.ctx());
        assert!(fish.body.vx < 0.0);
    }

    #[test]
    fn test_aligns_with_school() {
        let fixture = Fixture::new();
        // Neighbour 20px away heading east; fish heading north
        let neighbour = fish_at(2, 420.0, 300.0, 0.0, Species::Small);
        let mut fish = fish_at(1, 400.0, 300.0, -FRAC_PI_2, Species::Small);
        fish.update(&[&neighbour], &fixture.ctx());
        // Strong schooling pulls the heading mostly east
        assert!(fish.body.vx > fish.body.vy.abs());
    }

    #[test]
    fn test_wall_pushes_inward() {
        let fixture = Fixture::new();
        let mut fish = fish_at(1, 2.0, 300.0, std::f64::consts::PI, Species::Medium);
        fish.update(&[], &fixture.ctx());
        assert!(fish.x() >= 0.0);
        assert!(fish.body.vx > 0.0 || fish.x() == 0.0);
    }

    #[test]
    fn test_stays_in_bounds() {
        let fixture = Fixture::new();
        let mut rng = rand::thread_rng();
        for i in 0..200 {
            let mut fish = Fish::random(i, 800.0, 600.0, 1200.0, &mut rng);
            for _ in 0..50 {
                fish.update(&[], &fixture.ctx());
                assert!(fish.x() >= 0.0 && fish.x() <= 800.0);
                assert!(fish.y() >= 0.0 && fish.y() <= 600.0);
            }
        }
    }

    #[test]
    fn test_starves() {
        let fixture = Fixture::new();
        let mut fish = fish_at(1, 400.0, 300.0, 0.0, Species::Medium);
        fish.energy = fixture.config.fish.energy_decay / 2.0;
        fish.update(&[], &fixture.ctx());
        assert!(!fish.is_alive());
    }

    #[test]
    fn test_feeds_once_per_tick() {
        let mut fixture = Fixture::new();
        let plankton_config = crate::config::PlanktonConfig::default();
        fixture.plankton.push(PlanktonPatch::new(400.0, 300.0, 400.0, &plankton_config));
        fixture.plankton.push(PlanktonPatch::new(401.0, 300.0, 400.0, &plankton_config));

        let mut fish = fish_at(1, 400.0, 300.0, 0.0, Species::Large);
        let fed = fish.update(&[], &fixture.ctx());

        assert!(fed);
        assert!((fish.energy - (1200.0 - 0.35 + 180.0)).abs() < 1e-9);
        assert_eq!(fixture.plankton[0].biomass(), 220.0);
        assert_eq!(fixture.plankton[1].biomass(), 400.0);
    }

    #[test]
    fn test_reproduce_costs_energy() {
        let mut rng = rand::thread_rng();
        let mut fish = fish_at(1, 400.0, 300.0, 0.0, Species::Tropical);
        fish.energy = 1500.0;
        assert!(fish.can_reproduce(1400.0));

        let birth = fish.reproduce(600.0, 4.0, &mut rng);
        assert_eq!(fish.energy, 900.0);
        assert_eq!(birth.species, Species::Tropical);
        assert!(!fish.can_reproduce(1400.0));
    }

    #[test]
    fn test_nearest_first_wins_ties() {
        let items = [3.0, 1.0, 1.0, 2.0];
        let (item, d) = nearest_by(items.iter(), |v| *v).unwrap();
        assert!(std::ptr::eq(item, &items[1]));
        assert_eq!(d, 1.0);
    }
}
