use thiserror::Error;

pub type Result<T> = std::result::Result<T, InterpolationError>;

/// Reasons an interpolation request is rejected before any numerical work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("{name} must be greater than zero (got {value})")]
    InvalidParameter { name: &'static str, value: String },

    #[error("zero length cross section")]
    DegenerateGeometry,

    #[error("particle data has no column '{0}'")]
    MissingColumn(String),

    #[error("column '{label}' has {found} entries, expected {expected}")]
    ColumnLengthMismatch { label: String, expected: usize, found: usize },
}

impl InterpolationError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl std::fmt::Display) -> InterpolationError {
        InterpolationError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
