//! Render error types.

use thiserror::Error;

/// Errors raised while constructing or running a circle-fractal render.
///
/// Cancellation is deliberately absent: a cancelled render is reported as
/// [`crate::RenderOutcome::Cancelled`], not as an error.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Illegal values for color parts: {red}, {green}, {blue}")]
    ColorComponentOutOfRange { red: i64, green: i64, blue: i64 },

    #[error("Computation failed: {0}")]
    ComputationFailure(String),

    #[error("Worker pool unavailable: {0}")]
    WorkerPool(String),

    #[error("Render task was never started")]
    NotStarted,
}

impl RenderError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RenderError::InvalidParameter(message.into())
    }

    /// True for errors raised synchronously when a render is set up.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, RenderError::InvalidParameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_is_classified() {
        let err = RenderError::invalid("'divisionFactor' was not at least 2: 1");
        assert!(err.is_invalid_parameter());
        assert!(!RenderError::ComputationFailure("boom".into()).is_invalid_parameter());
    }

    #[test]
    fn color_error_lists_all_components() {
        let err = RenderError::ColorComponentOutOfRange {
            red: 256,
            green: 0,
            blue: -1,
        };
        assert_eq!(err.to_string(), "Illegal values for color parts: 256, 0, -1");
    }
}
