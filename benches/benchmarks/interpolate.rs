use criterion::{black_box, criterion_group, Criterion};
use rand::prelude::*;

use sphsplat::sph::smoothing_kernel::CubicSpline;
use sphsplat::sph::*;
use sphsplat::units::*;

fn random_particles(num_particles: usize) -> ParticleTable {
    let mut rng: rand::rngs::SmallRng = rand::SeedableRng::seed_from_u64(123456789);
    let mut column = |range: std::ops::Range<Real>| -> Vec<Real> { (0..num_particles).map(|_| rng.gen_range(range.clone())).collect() };
    ParticleTable::new()
        .with_column("x", column(0.0..1.0))
        .with_column("y", column(0.0..1.0))
        .with_column("z", column(0.0..1.0))
        .with_column(DENSITY_COLUMN, column(0.5..2.0))
        .with_column("A", column(0.0..1.0))
        .with_column(MASS_COLUMN, column(0.5..1.5))
        .with_column(SMOOTHING_LENGTH_COLUMN, column(0.01..0.05))
}

fn bench_interpolate(c: &mut Criterion) {
    const NUM_PARTICLES: usize = 100_000;
    let data = random_particles(NUM_PARTICLES);
    let kernel = CubicSpline::new();
    let grid = PixelGrid::covering(0.0, 1.0, 0.0, 1.0, 480, 480);
    let line = CrossSectionLine::from_coords(0.0, 0.0, 1.0, 1.0, 500);
    // Build the column table up front so it isn't part of the measurement.
    project_3d_column_default(&data, "A", "x", "y", &kernel, &grid).unwrap();

    let mut group = c.benchmark_group(format!("interpolate, {} particles", NUM_PARTICLES));
    group.sample_size(10);
    group.bench_function("project_2d", |b| b.iter(|| project_2d(&data, "A", "x", "y", &kernel, black_box(&grid))));
    group.bench_function("project_2d_line", |b| b.iter(|| project_2d_line(&data, "A", "x", "y", &kernel, black_box(&line))));
    group.bench_function("project_3d_column", |b| {
        b.iter(|| project_3d_column_default(&data, "A", "x", "y", &kernel, black_box(&grid)))
    });
    group.bench_function("project_3d_plane", |b| {
        b.iter(|| project_3d_plane(&data, "A", black_box(0.5), "x", "y", "z", &kernel, black_box(&grid)))
    });
    group.finish();
}

criterion_group!(interpolate, bench_interpolate);
