use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("x has {x_len} samples but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("at least {required} samples are required, got {got}")]
    InsufficientPoints { got: usize, required: usize },

    #[error("sample {index} is not finite")]
    NonFiniteSample { index: usize },

    #[error("x samples must be strictly increasing (violated at index {index})")]
    UnsortedInput { index: usize },

    #[error("x = {x} lies outside the interpolation domain [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },

    #[error("curves do not overlap: shared domain [{min}, {max}] is empty")]
    DomainMismatch { min: f64, max: f64 },

    #[error("interpolation failed: {0}")]
    InterpolationFailure(String),

    #[error("unknown interpolation kind '{0}'")]
    UnknownInterpolationKind(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl IntersectionError {
    pub fn invalid_configuration(message: impl Into<String>) -> IntersectionError {
        IntersectionError::InvalidConfiguration(message.into())
    }

    /// Domain mismatches are reported to callers of the locator as an empty
    /// result rather than a failure.
    pub fn is_domain_mismatch(&self) -> bool {
        matches!(self, IntersectionError::DomainMismatch { .. })
    }
}
