use crate::sph::error::{InterpolationError, Result};
use crate::units::Real;

/// Label of the particle mass column.
pub const MASS_COLUMN: &str = "m";
/// Label of the particle density column.
pub const DENSITY_COLUMN: &str = "rho";
/// Label of the smoothing length column.
pub const SMOOTHING_LENGTH_COLUMN: &str = "h";

/// Column-oriented particle storage, one value per particle in every column.
pub trait ParticleData {
    fn column(&self, label: &str) -> Option<&[Real]>;
}

/// Minimal in-memory particle table.
///
/// Columns keep their insertion order. Inserting a label that already exists replaces its values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleTable {
    columns: Vec<(String, Vec<Real>)>,
}

impl ParticleTable {
    pub fn new() -> ParticleTable {
        Default::default()
    }

    pub fn with_column(mut self, label: impl Into<String>, values: Vec<Real>) -> ParticleTable {
        self.insert_column(label, values);
        self
    }

    pub fn insert_column(&mut self, label: impl Into<String>, values: Vec<Real>) {
        let label = label.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, column)) => *column = values,
            None => self.columns.push((label, values)),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(label, _)| label.as_str())
    }

    /// Length of the first column, zero for an empty table.
    pub fn num_particles(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }
}

impl ParticleData for ParticleTable {
    fn column(&self, label: &str) -> Option<&[Real]> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, values)| values.as_slice())
    }
}

/// The columns a projection reads, checked to exist and to share one length.
/// `D` is the number of position axes.
pub(super) struct ParticleColumns<'a, const D: usize> {
    pub target: &'a [Real],
    pub axes: [&'a [Real]; D],
    pub mass: &'a [Real],
    pub density: &'a [Real],
    pub smoothing_length: &'a [Real],
}

impl<'a, const D: usize> ParticleColumns<'a, D> {
    pub fn fetch(data: &'a (impl ParticleData + ?Sized), target: &str, axes: [&str; D]) -> Result<Self> {
        let target_values = data.column(target).ok_or_else(|| InterpolationError::MissingColumn(target.to_string()))?;
        let num_particles = target_values.len();
        let fetch = move |label: &str| -> Result<&'a [Real]> {
            let values = data.column(label).ok_or_else(|| InterpolationError::MissingColumn(label.to_string()))?;
            if values.len() != num_particles {
                return Err(InterpolationError::ColumnLengthMismatch {
                    label: label.to_string(),
                    expected: num_particles,
                    found: values.len(),
                });
            }
            Ok(values)
        };

        let empty: &'a [Real] = &[];
        let mut axis_values = [empty; D];
        for (values, label) in axis_values.iter_mut().zip(axes) {
            *values = fetch(label)?;
        }

        Ok(ParticleColumns {
            target: target_values,
            axes: axis_values,
            mass: fetch(MASS_COLUMN)?,
            density: fetch(DENSITY_COLUMN)?,
            smoothing_length: fetch(SMOOTHING_LENGTH_COLUMN)?,
        })
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// `target * mass / (density * h^power)`, the per-particle factor every kernel weight is scaled with.
    #[inline]
    pub fn term(&self, i: usize, h_power: i32) -> Real {
        self.target[i] * self.mass[i] / (self.density[i] * self.smoothing_length[i].powi(h_power))
    }
}
