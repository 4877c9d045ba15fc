use criterion::{black_box, criterion_group, Criterion};

use sphsplat::sph::smoothing_kernel::*;

fn bench_kernels(c: &mut Criterion) {
    let kernel = black_box(CubicSpline::new());
    let q = black_box(0.7);

    c.bench_function("CubicSpline.weight 2D", |b| b.iter(|| kernel.weight(q, Dimension::Two)));
    c.bench_function("CubicSpline.weight 3D", |b| b.iter(|| kernel.weight(q, Dimension::Three)));

    let table = kernel.column_table(DEFAULT_COLUMN_SAMPLES).unwrap();
    c.bench_function("column_weight lookup", |b| b.iter(|| column_weight(&table, kernel.radius(), q)));

    c.bench_function("integrate_column (1000 samples)", |b| {
        b.iter(|| integrate_column(kernel.radius(), black_box(DEFAULT_COLUMN_SAMPLES), |q| kernel.weight(q, Dimension::Three)))
    });
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(core::time::Duration::new(0, 100))
        .sample_size(1000)
        .significance_level(0.1)
}

criterion_group!(
    name = smoothing_kernel;
    config = config();
    targets = bench_kernels
);
