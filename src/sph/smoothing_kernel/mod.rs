/// Smoothing Kernels.
pub use self::column::{column_weight, integrate_column, ColumnKernelCache, DEFAULT_COLUMN_SAMPLES, MAX_CACHED_TABLES};
pub use self::cubic::CubicSpline;
pub use self::kernel::{Dimension, Kernel};

mod column;
mod cubic;
mod kernel;
