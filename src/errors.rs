//! Error taxonomy for vertex nomination.

use smartcore::error::Failed;

#[derive(Debug, thiserror::Error)]
pub enum NominationError {
    /// Wrong element type or unrecognised option type.
    #[error("Type error: {0}")]
    Type(String),

    /// Unsupported shape or out-of-range index.
    #[error("Index error: {0}")]
    Index(String),

    /// Missing or out-of-domain value.
    #[error("Value error: {0}")]
    Value(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Nominator has not been fitted: call `fit` before `predict`")]
    NotFitted,

    #[error("Unknown distance metric: {0}")]
    UnknownMetric(String),

    #[error("Eigendecomposition failed: {0}")]
    Decomposition(String),
}

impl From<Failed> for NominationError {
    fn from(e: Failed) -> Self {
        NominationError::Decomposition(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NominationError>;
