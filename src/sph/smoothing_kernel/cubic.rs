use super::column::ColumnKernelCache;
use super::kernel::{Dimension, Kernel};
use crate::units::Real;

/// Cubic Spline smoothing kernel.
///
/// Classic cubic spline kernel from "J. Monaghan, Smoothed Particle Hydrodynamics, “Annual Review of Astronomy and Astrophysics”, 30 (1992), pp. 543-574."
/// Support radius is 2h. Normalization factors from https://pysph.readthedocs.io/en/latest/reference/kernels.html#monaghan1992
#[derive(Debug, Default)]
pub struct CubicSpline {
    column_cache: ColumnKernelCache,
}

impl CubicSpline {
    pub const RADIUS: Real = 2.0;

    pub fn new() -> CubicSpline {
        Default::default()
    }

    #[inline]
    fn normalizer(dim: Dimension) -> Real {
        match dim {
            Dimension::One => 2.0 / 3.0,
            Dimension::Two => 10.0 / (7.0 * std::f64::consts::PI),
            Dimension::Three => 1.0 / std::f64::consts::PI,
        }
    }
}

impl Kernel for CubicSpline {
    #[inline]
    fn radius(&self) -> Real {
        Self::RADIUS
    }

    #[inline]
    fn weight(&self, q: Real, dim: Dimension) -> Real {
        if (0.0..1.0).contains(&q) {
            Self::normalizer(dim) * (1.0 - 1.5 * q * q + 0.75 * q * q * q)
        } else if (1.0..2.0).contains(&q) {
            Self::normalizer(dim) * 0.25 * (2.0 - q).powi(3)
        } else {
            0.0
        }
    }

    fn column_cache(&self) -> &ColumnKernelCache {
        &self.column_cache
    }
}
