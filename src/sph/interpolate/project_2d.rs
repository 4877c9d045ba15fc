use super::accumulator::accumulate;
use super::grid::PixelGrid;
use super::image::Image;
use super::particles::{ParticleColumns, ParticleData};
use crate::sph::error::Result;
use crate::sph::smoothing_kernel::{Dimension, Kernel};

/// Interpolates 2D particle data onto a grid of pixels.
///
/// Each particle adds `w(q, 2) * target * m / (rho * h²)` to every pixel whose center lies within its support, where `q` is
/// the distance to the pixel center in units of `h`.
/// Rows of the returned image run along `y`, columns along `x`.
///
/// Particle densities and smoothing lengths are not checked; zero or negative values produce non-finite pixels.
pub fn project_2d(
    data: &(impl ParticleData + ?Sized),
    target: &str,
    x: &str,
    y: &str,
    kernel: &(impl Kernel + ?Sized),
    grid: &PixelGrid,
) -> Result<Image> {
    grid.validate()?;
    let particles = ParticleColumns::fetch(data, target, [x, y])?;
    let [x_data, y_data] = particles.axes;

    let _span = tracing::debug_span!("project_2d", column = target).entered();
    tracing::debug!(
        num_particles = particles.len(),
        pixcountx = grid.pixcountx,
        pixcounty = grid.pixcounty,
        "interpolating 2D particle data"
    );

    let radius = kernel.radius();
    let pixels = accumulate(particles.len(), grid.num_pixels(), |i, image| {
        let h = particles.smoothing_length[i];
        let h_inv_sq = 1.0 / (h * h);
        let term = particles.term(i, 2);
        grid.foreach_pixel_in_support(
            x_data[i],
            y_data[i],
            radius * h,
            #[inline(always)]
            |pixel, r_sq| {
                image[pixel] += kernel.weight((r_sq * h_inv_sq).sqrt(), Dimension::Two) * term;
            },
        );
    });

    Ok(Image::from_pixels(grid.pixcountx, grid.pixcounty, pixels))
}
