//! Interpolation of particle data onto pixel grids and cross-section lines.
//!
//! All four projections share the same shape: validate the grid, borrow the particle columns, then splat every
//! particle independently into a private accumulator and sum the accumulators in a fixed order.

pub use self::grid::PixelGrid;
pub use self::image::Image;
pub use self::line::CrossSectionLine;
pub use self::particles::{ParticleData, ParticleTable, DENSITY_COLUMN, MASS_COLUMN, SMOOTHING_LENGTH_COLUMN};
pub use self::project_2d::project_2d;
pub use self::project_2d_line::project_2d_line;
pub use self::project_3d_column::{project_3d_column, project_3d_column_default};
pub use self::project_3d_plane::project_3d_plane;

mod accumulator;
mod grid;
mod image;
mod line;
mod particles;
mod project_2d;
mod project_2d_line;
mod project_3d_column;
mod project_3d_plane;
