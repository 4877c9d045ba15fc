//! Interpolation of SPH particle data onto regular pixel grids.
//!
//! Every particle is smeared out with a compactly supported smoothing kernel and its weighted
//! contribution is accumulated into all pixels its support overlaps.

pub mod sph;
pub mod units;
