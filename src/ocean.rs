//! Ocean orchestrator - owns every entity and runs the tick.
//!
//! Fish are double-buffered. During the fish phase each worker reads the
//! previous buffer and the spatial grid built from it, and writes only its
//! own contiguous slice of the next buffer. Offspring are requested through
//! a channel against an atomic birth budget, so the population cap holds
//! however many fish reproduce at once. Everything else mutates on the
//! calling thread between phases.

use crate::config::{Config, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::context::SimulationContext;
use crate::creatures::{motion, BirthRequest, Drifter, DrifterKind, Fish, FishId, Shark, Species};
use crate::ecology::{
    Algae, AlgaeKind, CurrentPattern, DayNightCycle, EnvironmentalField, Fisherman, Obstacle,
    ObstacleField, PlanktonPatch,
};
use crate::grid::SpatialGrid;
use crate::observer::{OceanObserver, TickReport};
use crate::shared::{CreatureView, DisplayFlag, DisplaySettings, HookView, OceanCommand, OceanSnapshot};
use crate::stats::{SimulationStats, StatsHistory, StatsSnapshot};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The simulated ocean
pub struct Ocean {
    width: f64,
    height: f64,
    config: Config,

    // Population
    fish: Vec<Fish>,
    /// Back buffer written by the fish phase
    next_fish: Vec<Fish>,
    /// Pre-merge fish index -> post-merge index, None for the dead
    remap: Vec<Option<usize>>,
    sharks: Vec<Shark>,
    drifters: Vec<Drifter>,

    // Environment
    plankton: Vec<PlanktonPatch>,
    algae: Vec<Algae>,
    obstacles: ObstacleField,
    fisherman: Fisherman,
    field: EnvironmentalField,
    day_night: DayNightCycle,
    grid: SpatialGrid,
    display: DisplaySettings,

    // Statistics
    stats: SimulationStats,
    history: StatsHistory,
    observers: Vec<Box<dyn OceanObserver>>,

    // Workers
    pool: Option<ThreadPool>,
    workers: usize,
    exited_workers: Arc<AtomicUsize>,
    stopped: bool,

    // State
    frame: u64,
    next_fish_id: FishId,
    next_shark_id: u64,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Ocean {
    /// Create a new ocean with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create an ocean with an explicit number of fish-phase workers
    pub fn with_workers(mut config: Config, workers: usize) -> Self {
        config.runtime.workers = workers;
        Self::new(config)
    }

    /// Create an ocean whose sequential draws (placement, spawning) follow `seed`.
    ///
    /// The fish phase uses per-thread RNGs, so runs are not replayable.
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let (width, height) = sanitize_dimensions(config.world.width, config.world.height);

        let requested = match config.runtime.workers {
            0 => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        };
        let exited_workers = Arc::new(AtomicUsize::new(0));
        let pool = build_pool(requested, Arc::clone(&exited_workers));
        let workers = pool.as_ref().map_or(1, |p| p.current_num_threads());

        let mut ocean = Self {
            width,
            height,
            fish: Vec::new(),
            next_fish: Vec::new(),
            remap: Vec::new(),
            sharks: Vec::new(),
            drifters: Vec::new(),
            plankton: Vec::new(),
            algae: Vec::new(),
            obstacles: ObstacleField::new(),
            fisherman: Fisherman::new(width / 2.0, &config.fisherman),
            field: EnvironmentalField::new(width, height, &config.field),
            day_night: DayNightCycle::new(config.day_night.cycle_ticks),
            grid: SpatialGrid::new(width, height, config.world.grid_cell_size),
            display: DisplaySettings {
                day_night_enabled: config.day_night.enabled,
                ..DisplaySettings::default()
            },
            stats: SimulationStats::new(),
            history: StatsHistory::new(config.logging.stats_interval),
            observers: Vec::new(),
            pool,
            workers,
            exited_workers,
            stopped: false,
            frame: 0,
            next_fish_id: 0,
            next_shark_id: 0,
            rng,
            seed,
            config,
        };

        let initial = ocean.config.fish.initial_count;
        ocean.add_fish(initial);
        for _ in 0..ocean.config.plankton.initial_patches {
            ocean.spawn_plankton_patch();
        }
        ocean.seed_algae();
        ocean.field.tick(0.0);

        log::info!(
            "Ocean created: {}x{}, fish={}, plankton={}, workers={}, seed={}",
            width,
            height,
            ocean.fish.len(),
            ocean.plankton.len(),
            ocean.workers,
            seed
        );
        ocean
    }

    fn seed_algae(&mut self) {
        let count = 25 + self.rng.gen_range(0..15);
        for _ in 0..count {
            let x = self.rng.gen::<f64>() * self.width;
            let y = self.height - 10.0 - self.rng.gen::<f64>() * 50.0;
            let kind = AlgaeKind::random(&mut self.rng);
            self.algae.push(Algae::new(x, y, kind, &mut self.rng));
        }
    }

    /// Advance one tick.
    ///
    /// Returns `None` once the ocean has been shut down.
    pub fn step(&mut self) -> Option<TickReport> {
        if self.stopped {
            return None;
        }

        // Phase 1: Environment
        self.field.tick(1.0);
        if self.display.day_night_enabled {
            self.day_night.tick();
        }

        // Phase 2: Plankton
        self.update_plankton();

        // Phase 3: Algae
        self.update_algae();

        // Phase 4: Obstacles
        self.obstacles.update();

        // Phase 5: Fish (parallel)
        let (births, deaths) = self.update_fish();

        // Phase 6: Sharks
        self.update_sharks();

        // Phase 7: Drifters
        self.update_drifters();

        // Phase 8: Fisherman
        let caught = self.update_fisherman();

        // Phase 9: Population floor
        let spawned = self.enforce_population_floor();

        self.frame += 1;

        if self.history.is_due(self.frame) {
            let snapshot = self.stats_snapshot();
            log::debug!("{}", snapshot.summary());
            self.history.record(snapshot);
        }

        let report = TickReport {
            frame: self.frame,
            fish: self.fish.len(),
            sharks: self.sharks.len(),
            drifters: self.drifters.len(),
            plankton_patches: self.plankton.len(),
            births: births + spawned,
            deaths,
            caught,
        };
        for observer in &mut self.observers {
            observer.on_tick(&report);
        }
        Some(report)
    }

    /// Run the ocean for `ticks` ticks, stopping early if it was shut down
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.step().is_none() {
                break;
            }
        }
    }

    /// Run with a callback after every tick
    pub fn run_with_callback<F>(&mut self, ticks: u64, mut callback: F)
    where
        F: FnMut(&Ocean, &TickReport),
    {
        for _ in 0..ticks {
            match self.step() {
                Some(report) => callback(self, &report),
                None => break,
            }
        }
    }

    fn update_plankton(&mut self) {
        for patch in &self.plankton {
            patch.regenerate();
        }
        self.plankton.retain(|p| !p.is_depleted());

        let cfg = &self.config.plankton;
        if self.plankton.len() < cfg.initial_patches * 2 && self.rng.gen::<f64>() < cfg.spawn_chance {
            self.spawn_plankton_patch();
        }
    }

    fn update_algae(&mut self) {
        for algae in &mut self.algae {
            algae.update(self.field.sample_vector(algae.base_x, algae.base_y));
        }
    }

    /// Parallel fish update. Returns (births, deaths).
    fn update_fish(&mut self) -> (usize, usize) {
        self.grid.clear();
        for (i, fish) in self.fish.iter().enumerate() {
            self.grid.insert(i, fish.x(), fish.y());
        }

        let len = self.fish.len();
        let (birth_tx, birth_rx) = crossbeam_channel::unbounded::<BirthRequest>();

        if len > 0 {
            self.next_fish.clone_from(&self.fish);

            let fish_cfg = &self.config.fish;
            let ctx = SimulationContext {
                width: self.width,
                height: self.height,
                grid: &self.grid,
                field: &self.field,
                plankton: &self.plankton,
                sharks: &self.sharks,
                obstacles: self.obstacles.as_slice(),
                fish: fish_cfg,
            };
            let previous = &self.fish;
            let next = &mut self.next_fish;
            let stats = &self.stats;
            let budget = AtomicUsize::new(fish_cfg.max_fish.saturating_sub(len));
            let chunk = ((len + self.workers - 1) / self.workers).max(1);

            let mut work = || {
                next.par_chunks_mut(chunk)
                    .for_each_with(birth_tx.clone(), |births, slice| {
                        let mut rng = rand::thread_rng();
                        let mut nearby: Vec<&Fish> = Vec::with_capacity(64);

                        for fish in slice.iter_mut() {
                            nearby.clear();
                            ctx.grid
                                .for_each_neighbor(fish.x(), fish.y(), |k| nearby.push(&previous[k]));

                            if fish.update(&nearby, &ctx) {
                                stats.record_feed();
                            }

                            if fish.can_reproduce(fish_cfg.reproduction_threshold)
                                && reserve_birth(&budget)
                            {
                                let birth = fish.reproduce(
                                    fish_cfg.reproduction_cost,
                                    fish_cfg.birth_jitter,
                                    &mut rng,
                                );
                                // Receiver outlives every worker
                                let _ = births.send(birth);
                            }
                        }
                    });
            };

            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }

            std::mem::swap(&mut self.fish, &mut self.next_fish);
        }
        drop(birth_tx);

        // Collect survivors, remembering where each one moved to
        self.remap.clear();
        let remap = &mut self.remap;
        let mut kept = 0;
        self.fish.retain(|fish| {
            if fish.is_alive() {
                remap.push(Some(kept));
                kept += 1;
                true
            } else {
                remap.push(None);
                false
            }
        });
        let deaths = len - kept;

        let mut births = 0;
        for request in birth_rx.try_iter() {
            let x = request.x.clamp(0.0, self.width);
            let y = request.y.clamp(0.0, self.height);
            let birth = BirthRequest { x, y, ..request };
            let id = self.allocate_fish_id();
            let energy = self.config.fish.base_energy;
            self.fish.push(Fish::from_birth(id, &birth, energy, &mut self.rng));
            births += 1;
        }

        self.stats.record_deaths(deaths as u64);
        self.stats.record_births(births as u64);
        self.refresh_avg_energy();

        (births, deaths)
    }

    fn update_sharks(&mut self) {
        let fish = &self.fish;
        let remap = &self.remap;
        let grid = &self.grid;
        let mut prey: Vec<&Fish> = Vec::new();

        for shark in &mut self.sharks {
            prey.clear();
            grid.for_each_neighbor(shark.body.x, shark.body.y, |k| {
                if let Some(Some(i)) = remap.get(k) {
                    prey.push(&fish[*i]);
                }
            });
            shark.update(prey.iter().copied(), self.width, self.height, &mut self.rng);
        }
    }

    fn update_drifters(&mut self) {
        let ctx = SimulationContext {
            width: self.width,
            height: self.height,
            grid: &self.grid,
            field: &self.field,
            plankton: &self.plankton,
            sharks: &self.sharks,
            obstacles: self.obstacles.as_slice(),
            fish: &self.config.fish,
        };
        for drifter in &mut self.drifters {
            drifter.update(&ctx, &mut self.rng);
        }
    }

    /// Move the hook and remove every fish on it. Returns the catch size.
    fn update_fisherman(&mut self) -> usize {
        self.fisherman.update();
        if !self.fisherman.is_fishing() {
            return 0;
        }

        let before = self.fish.len();
        let hook = &self.fisherman;
        self.fish.retain(|f| !hook.check_catch(f.x(), f.y()));
        let caught = before - self.fish.len();

        if caught > 0 {
            for _ in 0..caught {
                self.stats.record_catch();
            }
            // One catch per trip
            self.fisherman.stop();
            log::debug!("Fisherman caught {} fish at frame {}", caught, self.frame);
        }
        caught
    }

    /// Top the population up from the edges. Returns the number spawned.
    fn enforce_population_floor(&mut self) -> usize {
        let cfg = &self.config.fish;
        let missing = cfg.min_population.saturating_sub(self.fish.len());
        let count = missing
            .min(cfg.floor_spawn_per_tick)
            .min(cfg.max_fish.saturating_sub(self.fish.len()));

        for _ in 0..count {
            let fish = self.spawn_at_edge();
            self.fish.push(fish);
        }
        self.stats.record_births(count as u64);
        count
    }

    /// A new fish on a random edge, heading into the water
    fn spawn_at_edge(&mut self) -> Fish {
        let (w, h) = (self.width, self.height);
        let along = self.rng.gen::<f64>();
        let (x, y, inward) = match self.rng.gen_range(0..4) {
            0 => (0.0, along * h, 0.0),
            1 => (w, along * h, PI),
            2 => (along * w, 0.0, FRAC_PI_2),
            _ => (along * w, h, -FRAC_PI_2),
        };
        let heading = inward + self.rng.gen_range(-0.6..0.6);
        let id = self.allocate_fish_id();
        let energy = self.config.fish.base_energy;
        let species = Species::random(&mut self.rng);
        Fish::new(id, x, y, heading, species, energy, &mut self.rng)
    }

    #[inline]
    fn allocate_fish_id(&mut self) -> FishId {
        let id = self.next_fish_id;
        self.next_fish_id += 1;
        id
    }

    fn refresh_avg_energy(&self) {
        if !self.fish.is_empty() {
            let total: f64 = self.fish.iter().map(|f| f.energy).sum();
            self.stats.set_avg_energy(total / self.fish.len() as f64);
        }
    }

    // ----- Mutators -----

    /// Add up to `count` fish at random positions. Returns how many were added.
    pub fn add_fish(&mut self, count: usize) -> usize {
        let room = self.config.fish.max_fish.saturating_sub(self.fish.len());
        let count = count.min(room);
        for _ in 0..count {
            let id = self.allocate_fish_id();
            let fish = Fish::random(id, self.width, self.height, self.config.fish.base_energy, &mut self.rng);
            self.fish.push(fish);
        }
        count
    }

    /// Add a shark at a random position. Returns false at the cap.
    pub fn add_shark(&mut self) -> bool {
        if self.sharks.len() >= self.config.sharks.max_sharks {
            return false;
        }
        let id = self.next_shark_id;
        self.next_shark_id += 1;
        self.sharks.push(Shark::random(id, self.width, self.height, &mut self.rng));
        true
    }

    /// Add a drifter. Each kind gets half of the drifter cap.
    pub fn add_drifter(&mut self, kind: DrifterKind) -> bool {
        let per_kind = self.config.sharks.max_drifters / 2;
        let existing = self.drifters.iter().filter(|d| d.kind() == kind).count();
        if existing >= per_kind {
            return false;
        }
        let drifter = Drifter::spawn(kind, self.width, self.height, &mut self.rng);
        self.drifters.push(drifter);
        true
    }

    /// Start a fishing trip at a random x, or end the current one
    pub fn toggle_fisherman(&mut self) {
        if self.fisherman.is_fishing() {
            self.fisherman.stop();
        } else {
            let x = self.rng.gen::<f64>() * self.width;
            let depth = self.height * self.config.fisherman.depth_ratio;
            self.fisherman.start_fishing(x, depth);
        }
    }

    /// Add a half-full plankton patch at a random position
    pub fn spawn_plankton_patch(&mut self) {
        let cfg = &self.config.plankton;
        let x = self.rng.gen::<f64>() * self.width;
        let y = self.rng.gen::<f64>() * self.height;
        self.plankton.push(PlanktonPatch::new(x, y, cfg.max_biomass * 0.5, cfg));
    }

    /// Place an obstacle; `None` uses the configured default radius
    pub fn add_obstacle(&mut self, x: f64, y: f64, radius: Option<f64>) {
        let cfg = &self.config.obstacles;
        let radius = radius.unwrap_or(cfg.default_radius);
        self.obstacles.add(Obstacle::new(x, y, radius, cfg.lifetime));
    }

    pub fn set_current_pattern(&mut self, pattern: CurrentPattern) {
        self.field.set_pattern(pattern);
    }

    pub fn set_current_strength(&mut self, strength: f64) {
        self.field.set_current_strength(strength);
    }

    pub fn set_animation_speed(&mut self, speed: f64) {
        self.field.set_animation_speed(speed);
    }

    pub fn set_display(&mut self, flag: DisplayFlag, value: bool) {
        self.display.set(flag, value);
    }

    /// Change the world size. The grid and the field are rebuilt and every
    /// creature is pulled back inside the new bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        let (width, height) = sanitize_dimensions(width, height);
        self.width = width;
        self.height = height;

        self.grid = SpatialGrid::new(width, height, self.config.world.grid_cell_size);

        let mut field = EnvironmentalField::new(width, height, &self.config.field);
        field.set_pattern(self.field.pattern());
        field.set_current_strength(self.field.current_strength());
        field.set_animation_speed(self.field.animation_speed());
        field.tick(0.0);
        self.field = field;

        for fish in &mut self.fish {
            motion::confine(&mut fish.body, width, height);
        }
        for shark in &mut self.sharks {
            motion::confine(&mut shark.body, width, height);
        }

        log::info!("Ocean resized to {}x{}", width, height);
    }

    /// Apply a front-end command
    pub fn apply(&mut self, command: OceanCommand) {
        match command {
            OceanCommand::AddFish(n) => {
                self.add_fish(n);
            }
            OceanCommand::AddShark => {
                self.add_shark();
            }
            OceanCommand::AddDrifter(kind) => {
                self.add_drifter(kind);
            }
            OceanCommand::ToggleFisherman => self.toggle_fisherman(),
            OceanCommand::SpawnPlankton => self.spawn_plankton_patch(),
            OceanCommand::AddObstacle { x, y, radius } => self.add_obstacle(x, y, radius),
            OceanCommand::SetCurrentPattern(pattern) => self.set_current_pattern(pattern),
            OceanCommand::SetCurrentStrength(s) => self.set_current_strength(s),
            OceanCommand::SetAnimationSpeed(s) => self.set_animation_speed(s),
            OceanCommand::SetDisplay(flag, value) => self.set_display(flag, value),
            OceanCommand::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Register an observer notified after every tick
    pub fn register_observer<O: OceanObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Stop the ocean and release its workers.
    ///
    /// Later `step` calls return `None`. Waits up to the configured grace
    /// period for worker threads to exit; running over it is only logged.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(pool) = self.pool.take() {
            drop(pool);
            let grace = Duration::from_millis(self.config.runtime.shutdown_grace_ms);
            let deadline = Instant::now() + grace;
            while self.exited_workers.load(Ordering::SeqCst) < self.workers {
                if Instant::now() >= deadline {
                    log::warn!(
                        "Workers still running after {:?} ({}/{} exited)",
                        grace,
                        self.exited_workers.load(Ordering::SeqCst),
                        self.workers
                    );
                    break;
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        }

        log::info!("Ocean stopped at frame {}: {} fish", self.frame, self.fish.len());
    }

    // ----- Accessors -----

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    /// Mutable access to the fish, for tools and tests that set up scenarios
    pub fn fish_mut(&mut self) -> &mut [Fish] {
        &mut self.fish
    }

    pub fn sharks(&self) -> &[Shark] {
        &self.sharks
    }

    pub fn drifters(&self) -> &[Drifter] {
        &self.drifters
    }

    pub fn plankton(&self) -> &[PlanktonPatch] {
        &self.plankton
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    pub fn algae(&self) -> &[Algae] {
        &self.algae
    }

    pub fn fisherman(&self) -> &Fisherman {
        &self.fisherman
    }

    pub fn field(&self) -> &EnvironmentalField {
        &self.field
    }

    pub fn day_night(&self) -> &DayNightCycle {
        &self.day_night
    }

    pub fn display(&self) -> DisplaySettings {
        self.display
    }

    pub fn fish_count(&self) -> usize {
        self.fish.len()
    }

    pub fn shark_count(&self) -> usize {
        self.sharks.len()
    }

    pub fn drifter_count(&self) -> usize {
        self.drifters.len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Threads in the fish-phase pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Current statistics with population figures
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats
            .snapshot(self.frame, self.fish.len(), self.sharks.len(), self.plankton.len())
    }

    /// Copy what a renderer needs for the current frame
    pub fn snapshot(&self) -> OceanSnapshot {
        let creatures = self
            .fish
            .iter()
            .map(CreatureView::from)
            .chain(self.sharks.iter().map(CreatureView::from))
            .collect();

        let day_night = self.display.day_night_enabled.then_some(&self.day_night);

        OceanSnapshot {
            width: self.width,
            height: self.height,
            frame: self.frame,
            creatures,
            plankton: self.plankton.iter().map(Into::into).collect(),
            obstacles: self.obstacles.as_slice().to_vec(),
            drifters: self.drifters.clone(),
            algae: self.algae.clone(),
            hook: HookView {
                x: self.fisherman.x,
                y: self.fisherman.y,
                fishing: self.fisherman.is_fishing(),
                phase: self.fisherman.phase(),
            },
            field_resolution: self.field.resolution(),
            field: self.display.show_currents.then(|| self.field.cells().to_vec()),
            light_level: day_night.map_or(1.0, DayNightCycle::light_level),
            time_of_day: day_night.map(DayNightCycle::time_string),
            display: self.display,
            stats: self.stats_snapshot(),
        }
    }
}

/// Fall back to the default window size for unusable dimensions
fn sanitize_dimensions(width: f64, height: f64) -> (f64, f64) {
    let width = if width > 0.0 && width.is_finite() { width } else { DEFAULT_WIDTH };
    let height = if height > 0.0 && height.is_finite() { height } else { DEFAULT_HEIGHT };
    (width, height)
}

/// Take one slot from the birth budget, failing when none are left
#[inline]
fn reserve_birth(budget: &AtomicUsize) -> bool {
    budget
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        .is_ok()
}

fn build_pool(threads: usize, exited: Arc<AtomicUsize>) -> Option<ThreadPool> {
    let built = ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("reef-worker-{}", i))
        .exit_handler(move |_| {
            exited.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    match built {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Worker pool failed to build, using the global pool: {}", e);
            None
        }
    }
}
