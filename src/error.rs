use thiserror::Error;

/// Failures surfaced by the prediction engine. Every variant aborts the
/// whole request; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("ML model not loaded. Please train the model first.")]
    ModelUnavailable,

    #[error("Invalid {field}. Must be one of: {}", allowed.join(", "))]
    InvalidCategory {
        field: &'static str,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid input: {field} must be a number")]
    InvalidNumber { field: &'static str },

    #[error("unknown {field} label {label:?}")]
    UnknownCategory { field: String, label: String },

    #[error("feature {name:?} is not part of the input schema")]
    MissingFeature { name: String },

    #[error("inference failed: {0}")]
    Inference(String),
}

impl EngineError {
    /// True for failures caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidCategory { .. }
                | EngineError::InvalidNumber { .. }
                | EngineError::UnknownCategory { .. }
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
