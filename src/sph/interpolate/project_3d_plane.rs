use super::accumulator::accumulate;
use super::grid::PixelGrid;
use super::image::Image;
use super::particles::{ParticleColumns, ParticleData};
use crate::sph::error::Result;
use crate::sph::smoothing_kernel::{Dimension, Kernel};
use crate::units::Real;

/// Interpolates 3D particle data onto a grid of pixels lying in the plane `z = zslice`.
///
/// Only particles whose support reaches the plane, i.e. `|zslice - z| < radius * h`, contribute.
/// Each adds `w(q, 3) * target * m / (rho * h³)` where `q` is the 3D distance to the pixel center in units of `h`.
///
/// Particle densities and smoothing lengths are not checked; zero or negative values produce non-finite pixels.
#[allow(clippy::too_many_arguments)]
pub fn project_3d_plane(
    data: &(impl ParticleData + ?Sized),
    target: &str,
    zslice: Real,
    x: &str,
    y: &str,
    z: &str,
    kernel: &(impl Kernel + ?Sized),
    grid: &PixelGrid,
) -> Result<Image> {
    grid.validate()?;
    let particles = ParticleColumns::fetch(data, target, [x, y, z])?;
    let [x_data, y_data, z_data] = particles.axes;

    let _span = tracing::debug_span!("project_3d_plane", column = target, zslice).entered();
    tracing::debug!(
        num_particles = particles.len(),
        pixcountx = grid.pixcountx,
        pixcounty = grid.pixcounty,
        "interpolating 3D particle data to cross-section"
    );

    let radius = kernel.radius();
    let intersecting: Vec<usize> = (0..particles.len())
        .filter(|&i| (zslice - z_data[i]).abs() < radius * particles.smoothing_length[i])
        .collect();
    tracing::trace!(num_intersecting = intersecting.len(), "filtered particles crossing the plane");

    let pixels = accumulate(intersecting.len(), grid.num_pixels(), |k, image| {
        let i = intersecting[k];
        let h = particles.smoothing_length[i];
        let h_inv_sq = 1.0 / (h * h);
        let dz = zslice - z_data[i];
        let dz_sq = dz * dz * h_inv_sq;
        let term = particles.term(i, 3);
        grid.foreach_pixel_in_support(
            x_data[i],
            y_data[i],
            radius * h,
            #[inline(always)]
            |pixel, r_sq| {
                image[pixel] += kernel.weight((r_sq * h_inv_sq + dz_sq).sqrt(), Dimension::Three) * term;
            },
        );
    });

    Ok(Image::from_pixels(grid.pixcountx, grid.pixcounty, pixels))
}
