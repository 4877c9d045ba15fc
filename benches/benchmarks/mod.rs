pub mod interpolate;
pub mod smoothing_kernel;
