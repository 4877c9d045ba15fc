use std::ops::Range;

use cgmath::prelude::*;

use super::accumulator::accumulate;
use super::line::CrossSectionLine;
use super::particles::{ParticleColumns, ParticleData};
use crate::sph::error::Result;
use crate::sph::smoothing_kernel::{Dimension, Kernel};
use crate::units::*;

/// Interpolates 2D particle data onto a 1D cross-section line.
///
/// The line is sampled at `line.pixcount` equally spaced pixel centers. Only particles whose support circle intersects
/// the line segment contribute; each adds `w(q, 2) * target * m / (rho * h²)` to the pixels inside its support.
/// Vertical lines and lines running right to left are supported.
///
/// Particle densities and smoothing lengths are not checked; zero or negative values produce non-finite pixels.
pub fn project_2d_line(
    data: &(impl ParticleData + ?Sized),
    target: &str,
    x: &str,
    y: &str,
    kernel: &(impl Kernel + ?Sized),
    line: &CrossSectionLine,
) -> Result<Vec<Real>> {
    line.validate()?;
    let particles = ParticleColumns::fetch(data, target, [x, y])?;
    let [x_data, y_data] = particles.axes;

    let _span = tracing::debug_span!("project_2d_line", column = target).entered();
    tracing::debug!(num_particles = particles.len(), pixcount = line.pixcount, "interpolating 2D particle data to line");

    let radius = kernel.radius();
    let intersecting: Vec<(usize, Range<usize>)> = (0..particles.len())
        .filter_map(|i| {
            let center = Point::new(x_data[i], y_data[i]);
            line.pixels_in_support(center, radius * particles.smoothing_length[i])
                .map(|pixels| (i, pixels))
        })
        .collect();
    tracing::trace!(num_intersecting = intersecting.len(), "filtered particles crossing the line");

    let output = accumulate(intersecting.len(), line.pixcount, |k, output| {
        let (i, pixels) = &intersecting[k];
        let i = *i;
        let h = particles.smoothing_length[i];
        let h_inv_sq = 1.0 / (h * h);
        let term = particles.term(i, 2);
        let center = Point::new(x_data[i], y_data[i]);
        for pixel in pixels.clone() {
            let r_sq = line.pixel_center(pixel).distance2(center);
            output[pixel] += kernel.weight((r_sq * h_inv_sq).sqrt(), Dimension::Two) * term;
        }
    });

    Ok(output)
}
