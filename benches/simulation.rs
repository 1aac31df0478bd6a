//! Performance benchmarks for REEF

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reef::ecology::EnvironmentalField;
use reef::{Config, Ocean, SpatialGrid};

fn benchmark_ocean_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("ocean_step");

    for fish in [200, 800, 1800].iter() {
        let mut config = Config::default();
        config.fish.initial_count = *fish;

        let mut ocean = Ocean::new_with_seed(config, 42);
        for _ in 0..10 {
            ocean.add_shark();
        }

        // Warm up
        ocean.run(10);

        group.bench_with_input(BenchmarkId::new("fish", fish), fish, |b, _| {
            b.iter(|| {
                ocean.step();
            });
        });
        ocean.shutdown();
    }

    group.finish();
}

fn benchmark_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("fish_phase_workers");

    for workers in [1, 2, 4].iter() {
        let mut config = Config::default();
        config.fish.initial_count = 1500;
        let mut ocean = Ocean::with_workers(config, *workers);
        ocean.run(5);

        group.bench_with_input(BenchmarkId::new("workers", workers), workers, |b, _| {
            b.iter(|| {
                ocean.step();
            });
        });
        ocean.shutdown();
    }

    group.finish();
}

fn benchmark_grid(c: &mut Criterion) {
    let ocean = Ocean::new_with_seed(Config::default(), 7);
    let mut grid = SpatialGrid::new(ocean.width(), ocean.height(), 100.0);

    c.bench_function("grid_rebuild", |b| {
        b.iter(|| {
            grid.clear();
            for (i, fish) in ocean.fish().iter().enumerate() {
                grid.insert(i, fish.x(), fish.y());
            }
        });
    });

    c.bench_function("grid_query", |b| {
        b.iter(|| grid.query_neighbors(black_box(800.0), black_box(450.0)));
    });
}

fn benchmark_field(c: &mut Criterion) {
    let mut field = EnvironmentalField::new(1600.0, 900.0, &Config::default().field);

    c.bench_function("field_tick", |b| {
        b.iter(|| field.tick(black_box(1.0)));
    });
}

criterion_group!(
    benches,
    benchmark_ocean_step,
    benchmark_workers,
    benchmark_grid,
    benchmark_field,
);

criterion_main!(benches);
