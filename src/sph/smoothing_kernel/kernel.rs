use std::sync::Arc;

use super::column::ColumnKernelCache;
use crate::sph::error::{InterpolationError, Result};
use crate::units::Real;

/// Number of spatial dimensions a kernel weight is normalized for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    One = 1,
    Two = 2,
    Three = 3,
}

/// SPH smoothing kernel
///
/// Only radially symmetric kernels with compact support are supported.
/// Kernels are evaluated at the normalized distance `q = r / h`, where `h` is the smoothing length of a particle.
/// A kernel is shared read-only by all interpolation workers, hence `Send + Sync`.
pub trait Kernel: Send + Sync {
    /// Support radius in units of smoothing length. `weight` is exactly zero for `q >= radius()`.
    fn radius(&self) -> Real;

    /// Evaluates the kernel at normalized distance `q`.
    /// Normalized so that it integrates to one over its support in `dim` dimensions.
    fn weight(&self, q: Real, dim: Dimension) -> Real;

    /// Storage for the column kernel tables derived from this kernel.
    fn column_cache(&self) -> &ColumnKernelCache;

    /// The 3D kernel integrated along one axis.
    ///
    /// Contains `samples` entries for equally spaced values of `q_xy²` in `[0, radius²)`, followed by a zero at `q = radius`.
    /// Tables are built once per sample count and shared afterwards, see [`ColumnKernelCache`].
    fn column_table(&self, samples: usize) -> Result<Arc<[Real]>> {
        if samples == 0 {
            return Err(InterpolationError::invalid_parameter("samples", samples));
        }
        Ok(self
            .column_cache()
            .get_or_compute(samples, self.radius(), |q| self.weight(q, Dimension::Three)))
    }
}
