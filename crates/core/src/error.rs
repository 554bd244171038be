//! Error types for reefgen.

use thiserror::Error;

/// Errors produced while configuring, composing, or exporting a scene.
#[derive(Debug, Error)]
pub enum ReefError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter had a usable type but an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Two rasters that must share a coordinate system had different sizes.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: u32,
        lhs_h: u32,
        rhs_w: u32,
        rhs_h: u32,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Reading or writing an artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl ReefError {
    /// Shorthand for [`ReefError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        ReefError::InvalidParam {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ReefError {
    fn from(e: std::io::Error) -> Self {
        ReefError::Io(e.to_string())
    }
}

impl From<image::ImageError> for ReefError {
    fn from(e: image::ImageError) -> Self {
        ReefError::Io(e.to_string())
    }
}
