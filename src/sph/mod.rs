pub use self::error::{InterpolationError, Result};
pub use self::interpolate::*;

mod error;
pub mod interpolate;
pub mod smoothing_kernel;
