use std::ops::Range;
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::units::Real;

/// Upper bound on the number of private accumulators a projection allocates.
pub(super) const MAX_PARTIAL_ACCUMULATORS: usize = 16;

/// Batches are never split below this many particles.
pub(super) const MIN_PARTICLES_PER_BATCH: usize = 1024;

const PAR_THRESHOLD_DEFAULT: usize = 4096;

// Below this many particles all batches run on the calling thread.
fn parallel_threshold() -> usize {
    static THRESHOLD: OnceLock<usize> = OnceLock::new();
    *THRESHOLD.get_or_init(|| parse_threshold(std::env::var("SPHSPLAT_PAR_THRESHOLD").ok().as_deref()))
}

// Unset, unparsable or zero values fall back to the default.
fn parse_threshold(value: Option<&str>) -> usize {
    value
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(PAR_THRESHOLD_DEFAULT)
}

/// Splits `num_particles` into contiguous batches.
/// The split depends on nothing but the particle count, so results don't depend on the thread count either.
pub(super) fn particle_batches(num_particles: usize) -> Vec<Range<usize>> {
    let batch_size = num_particles.div_ceil(MAX_PARTIAL_ACCUMULATORS).max(MIN_PARTICLES_PER_BATCH);
    (0..num_particles)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(num_particles))
        .collect()
}

/// Sums independent per-particle contributions into a zeroed buffer of `len` values.
///
/// `splat(particle, buffer)` adds the contribution of one particle to `buffer`.
/// Every batch of particles splats into its own private buffer; afterwards all buffers are summed pixel by pixel in batch order.
/// Particles sharing pixels therefore never race, and the result is bit-for-bit reproducible for a given particle order.
pub(super) fn accumulate(num_particles: usize, len: usize, splat: impl Fn(usize, &mut [Real]) + Sync) -> Vec<Real> {
    let batches = particle_batches(num_particles);
    let run_batch = |batch: &Range<usize>| {
        let mut buffer = vec![0.0; len];
        for particle in batch.clone() {
            splat(particle, &mut buffer);
        }
        buffer
    };

    let partials: Vec<Vec<Real>> = if batches.len() > 1 && num_particles >= parallel_threshold() {
        batches.par_iter().map(run_batch).collect()
    } else {
        batches.iter().map(run_batch).collect()
    };
    merge(partials, len)
}

fn merge(partials: Vec<Vec<Real>>, len: usize) -> Vec<Real> {
    let mut partials = partials.into_iter();
    let mut total = match partials.next() {
        Some(first) => first,
        None => return vec![0.0; len],
    };
    let rest: Vec<Vec<Real>> = partials.collect();
    if !rest.is_empty() {
        total.par_iter_mut().enumerate().for_each(|(pixel, value)| {
            for partial in rest.iter() {
                *value += partial[pixel];
            }
        });
    }
    total
}
