use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::units::Real;

/// Sample count used for column kernel tables unless asked otherwise.
pub const DEFAULT_COLUMN_SAMPLES: usize = 1000;

/// Number of non-default column tables a single kernel keeps around.
pub const MAX_CACHED_TABLES: usize = 8;

// Evaluation points of the trapezoidal rule along the integrated axis (99 sub-intervals).
const QUADRATURE_POINTS: usize = 100;

/// Integrates a 3D kernel along one axis.
///
/// Entry `i < samples` holds `2 * ∫ w(sqrt(q_xy² + q_z²)) dq_z` over `q_z ∈ [0, sqrt(radius² - q_xy²)]` with `q_xy² = i * radius² / samples`.
/// The factor two accounts for the mirrored half of the column. Entry `samples` is always zero.
pub fn integrate_column(radius: Real, samples: usize, weight_3d: impl Fn(Real) -> Real) -> Vec<Real> {
    let mut table = vec![0.0; samples + 1];
    let radius_sq = radius * radius;
    let intervals = (QUADRATURE_POINTS - 1) as Real;

    for (i, entry) in table.iter_mut().take(samples).enumerate() {
        let q_xy_sq = i as Real * (radius_sq / samples as Real);
        let dz = (radius_sq - q_xy_sq).sqrt() / intervals;

        let mut column_density = 0.0;
        for j in 0..QUADRATURE_POINTS {
            let q_z = j as Real * dz;
            let w = weight_3d((q_xy_sq + q_z * q_z).sqrt());
            if j == 0 || j == QUADRATURE_POINTS - 1 {
                column_density += 0.5 * w * dz;
            } else {
                column_density += w * dz;
            }
        }
        *entry = 2.0 * column_density;
    }

    table
}

/// Looks up a column kernel table at normalized distance `q`.
///
/// The table is linearly interpolated against `table.len()` equally spaced abscissas over `[0, radius]`.
/// Values of `q` outside that range take the first or last entry.
pub fn column_weight(table: &[Real], radius: Real, q: Real) -> Real {
    let last = match table.len() {
        0 => return 0.0,
        len => len - 1,
    };
    if q <= 0.0 {
        return table[0];
    }

    let position = q / radius * last as Real;
    if position >= last as Real {
        return table[last];
    }
    let index = position as usize;
    let t = position - index as Real;
    table[index] * (1.0 - t) + table[index + 1] * t
}

/// Memoizes column kernel tables per sample count.
///
/// The default sample count gets a dedicated slot that lives as long as the kernel.
/// Other sample counts share a small table that drops its oldest entry when full.
/// Tables are fully built before they are published, so readers never observe a partial table.
#[derive(Default)]
pub struct ColumnKernelCache {
    default_table: OnceLock<Arc<[Real]>>,
    tables: Mutex<Vec<(usize, Arc<[Real]>)>>,
}

impl ColumnKernelCache {
    pub fn new() -> ColumnKernelCache {
        Default::default()
    }

    /// Returns the table for `samples`, computing it with `weight_3d` if it isn't cached yet.
    pub fn get_or_compute(&self, samples: usize, radius: Real, weight_3d: impl Fn(Real) -> Real) -> Arc<[Real]> {
        if samples == DEFAULT_COLUMN_SAMPLES {
            if let Some(table) = self.default_table.get() {
                tracing::trace!(samples, "column kernel cache hit");
                return Arc::clone(table);
            }
            let table = self.default_table.get_or_init(|| Self::compute(samples, radius, weight_3d));
            return Arc::clone(table);
        }

        if let Some(table) = Self::find(&self.lock(), samples) {
            tracing::trace!(samples, "column kernel cache hit");
            return table;
        }

        // Computed without holding the lock. If another thread published the same table meanwhile, theirs wins.
        let table = Self::compute(samples, radius, weight_3d);
        let mut tables = self.lock();
        if let Some(existing) = Self::find(&tables, samples) {
            return existing;
        }
        if tables.len() >= MAX_CACHED_TABLES {
            tables.remove(0);
        }
        tables.push((samples, Arc::clone(&table)));
        table
    }

    /// Whether a table for `samples` is currently cached.
    pub fn contains(&self, samples: usize) -> bool {
        if samples == DEFAULT_COLUMN_SAMPLES {
            self.default_table.get().is_some()
        } else {
            Self::find(&self.lock(), samples).is_some()
        }
    }

    /// Number of cached tables, including the default one.
    pub fn len(&self) -> usize {
        self.lock().len() + usize::from(self.default_table.get().is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compute(samples: usize, radius: Real, weight_3d: impl Fn(Real) -> Real) -> Arc<[Real]> {
        tracing::debug!(samples, radius, "integrating column kernel");
        integrate_column(radius, samples, weight_3d).into()
    }

    fn find(tables: &[(usize, Arc<[Real]>)], samples: usize) -> Option<Arc<[Real]>> {
        tables.iter().find(|(key, _)| *key == samples).map(|(_, table)| Arc::clone(table))
    }

    // Tables are immutable once published, so a poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<(usize, Arc<[Real]>)>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ColumnKernelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut cached: Vec<usize> = self.lock().iter().map(|(samples, _)| *samples).collect();
        if self.default_table.get().is_some() {
            cached.push(DEFAULT_COLUMN_SAMPLES);
        }
        f.debug_struct("ColumnKernelCache").field("cached_samples", &cached).finish()
    }
}
