//! Error taxonomy for filter resolution, validation, and execution.
//!
//! Every failure is a local, synchronous error reported to the caller. The
//! pipeline never retries and never substitutes a fallback image.

/// Reasons why a filter invocation may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterError {
    /// The requested identifier was never registered.
    UnknownFilter { name: String },
    /// A parameter is missing, has the wrong kind, or violates its bounds.
    InvalidParameter { name: String, reason: String },
    /// The input raster has a channel count the grayscale conversion cannot
    /// handle.
    UnsupportedImage { channels: usize },
    /// The underlying detector failed during computation.
    TransformExecution { filter: String, message: String },
}

impl FilterError {
    pub(crate) fn unknown_filter(name: impl Into<String>) -> Self {
        FilterError::UnknownFilter { name: name.into() }
    }

    pub(crate) fn invalid_parameter(
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FilterError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::UnknownFilter { name } => {
                write!(f, "unknown filter '{name}'")
            }
            FilterError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            FilterError::UnsupportedImage { channels } => {
                write!(f, "unsupported image ({channels} channels, expected 1 or 3)")
            }
            FilterError::TransformExecution { filter, message } => {
                write!(f, "filter '{filter}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for FilterError {}
