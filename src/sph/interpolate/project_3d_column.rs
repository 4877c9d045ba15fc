use super::accumulator::accumulate;
use super::grid::PixelGrid;
use super::image::Image;
use super::particles::{ParticleColumns, ParticleData};
use crate::sph::error::Result;
use crate::sph::smoothing_kernel::{column_weight, Kernel, DEFAULT_COLUMN_SAMPLES};

/// Interpolates 3D particle data onto a grid of pixels by integrating through the axis perpendicular to the grid.
///
/// Instead of integrating the 3D kernel along every pixel column, weights are read from the kernel's column table
/// (see [`Kernel::column_table`]) with `samples` entries. Each particle adds `column_weight(q) * target * m / (rho * h²)`.
/// The third position axis is never read.
///
/// Particle densities and smoothing lengths are not checked; zero or negative values produce non-finite pixels.
pub fn project_3d_column(
    data: &(impl ParticleData + ?Sized),
    target: &str,
    x: &str,
    y: &str,
    kernel: &(impl Kernel + ?Sized),
    grid: &PixelGrid,
    samples: usize,
) -> Result<Image> {
    grid.validate()?;
    let table = kernel.column_table(samples)?;
    let particles = ParticleColumns::fetch(data, target, [x, y])?;
    let [x_data, y_data] = particles.axes;

    let _span = tracing::debug_span!("project_3d_column", column = target, samples).entered();
    tracing::debug!(
        num_particles = particles.len(),
        pixcountx = grid.pixcountx,
        pixcounty = grid.pixcounty,
        "interpolating 3D particle data through columns"
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
                image[pixel] += column_weight(&table, radius, (r_sq * h_inv_sq).sqrt()) * term;
            },
        );
    });

    Ok(Image::from_pixels(grid.pixcountx, grid.pixcounty, pixels))
}

/// [`project_3d_column`] with the default column table resolution.
pub fn project_3d_column_default(
    data: &(impl ParticleData + ?Sized),
    target: &str,
    x: &str,
    y: &str,
    kernel: &(impl Kernel + ?Sized),
    grid: &PixelGrid,
) -> Result<Image> {
    project_3d_column(data, target, x, y, kernel, grid, DEFAULT_COLUMN_SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sph::interpolate::particles::{ParticleTable, DENSITY_COLUMN, MASS_COLUMN, SMOOTHING_LENGTH_COLUMN};
    use crate::sph::smoothing_kernel::CubicSpline;
    use crate::sph::InterpolationError;
    use crate::units::Real;
    use more_asserts::{assert_gt, assert_lt};

    fn single_particle(x: Real, y: Real, h: Real) -> ParticleTable {
        ParticleTable::new()
            .with_column("x", vec![x])
            .with_column("y", vec![y])
            .with_column("A", vec![3.0])
            .with_column(MASS_COLUMN, vec![0.5])
            .with_column(DENSITY_COLUMN, vec![2.0])
            .with_column(SMOOTHING_LENGTH_COLUMN, vec![h])
    }

    #[test]
    fn weights_come_from_column_table() {
        let kernel = CubicSpline::new();
        let grid = PixelGrid::new(0.0, 0.0, 0.05, 0.05, 40, 40);
        let (x, y, h) = (1.0 + 0.025, 0.9 + 0.025, 0.2);
        let data = single_particle(x, y, h);
        let image = project_3d_column_default(&data, "A", "x", "y", &kernel, &grid).unwrap();

        let table = kernel.column_table(DEFAULT_COLUMN_SAMPLES).unwrap();
        let term = 3.0 * 0.5 / (2.0 * h * h);
        // The particle sits on the center of pixel (20, 18).
        assert_lt!((image[(18, 20)] - table[0] * term).abs(), 1e-12);
        for j in 0..grid.pixcounty {
            for i in 0..grid.pixcountx {
                let dx = grid.pixel_center_x(i) - x;
                let dy = grid.pixel_center_y(j) - y;
                let q = (dx * dx + dy * dy).sqrt() / h;
                let expected = column_weight(&table, kernel.radius(), q) * term;
                assert_lt!((image[(j, i)] - expected).abs(), 1e-9);
                if q >= kernel.radius() + 1e-9 {
                    assert_eq!(image[(j, i)], 0.0);
                }
            }
        }
    }

    #[test]
    fn peak_at_particle_position() {
        let grid = PixelGrid::new(0.0, 0.0, 0.1, 0.1, 20, 20);
        let data = single_particle(1.05, 1.05, 0.25);
        let image = project_3d_column(&data, "A", "x", "y", &CubicSpline::new(), &grid, 200).unwrap();
        assert_eq!(image.max(), image[(10, 10)]);
        assert_gt!(image[(10, 11)], 0.0);
        assert_lt!(image[(10, 11)], image[(10, 10)]);
    }

    #[test]
    fn uses_cached_table() {
        let kernel = CubicSpline::new();
        let grid = PixelGrid::new(0.0, 0.0, 0.1, 0.1, 8, 8);
        let data = single_particle(0.4, 0.4, 0.1);
        project_3d_column(&data, "A", "x", "y", &kernel, &grid, 321).unwrap();
        assert!(kernel.column_cache().contains(321));
        assert!(!kernel.column_cache().contains(DEFAULT_COLUMN_SAMPLES));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let data = single_particle(0.4, 0.4, 0.1);
        let kernel = CubicSpline::new();
        let grid = PixelGrid::new(0.0, 0.0, 0.1, 0.1, 8, 8);
        assert!(matches!(
            project_3d_column(&data, "A", "x", "y", &kernel, &PixelGrid { pixwidthy: 0.0, ..grid }, 100),
            Err(InterpolationError::InvalidParameter { name: "pixwidthy", .. })
        ));
        assert!(matches!(
            project_3d_column(&data, "A", "x", "y", &kernel, &PixelGrid { pixcounty: 0, ..grid }, 100),
            Err(InterpolationError::InvalidParameter { name: "pixcounty", .. })
        ));
        assert!(matches!(
            project_3d_column(&data, "A", "x", "y", &kernel, &grid, 0),
            Err(InterpolationError::InvalidParameter { name: "samples", .. })
        ));
    }
}
