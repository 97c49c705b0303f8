//! # Model Errors
//!
//! Error types for artifact loading and classification.

use thiserror::Error;

use crate::preprocessing::PreprocessingError;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Model loading and prediction errors
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    // ==================
    // Artifact Errors
    // ==================

    /// An artifact file does not exist
    #[error("Model artifact not found: {path}")]
    ArtifactMissing { path: String },

    /// An artifact file exists but cannot be read or decoded
    #[error("Model artifact {path} is invalid: {reason}")]
    ArtifactInvalid { path: String, reason: String },

    /// Artifacts load individually but contradict each other
    #[error("Model artifacts do not match: {0}")]
    ArtifactMismatch(String),

    /// Model structure is inconsistent
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Feature schema could not be built
    #[error("Invalid feature schema: {0}")]
    InvalidSchema(#[from] PreprocessingError),

    // ==================
    // Prediction Errors
    // ==================

    /// Vector length differs from what the classifier was trained on
    #[error("Classifier expects {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    /// Probability output has the wrong shape
    #[error("Classifier returned {0} probabilities, expected 3")]
    InvalidProbabilities(usize),

    /// Label index has no outcome in the reverse mapping
    #[error("No outcome mapped to label index {0}")]
    UnknownLabel(usize),
}

impl ModelError {
    /// Artifact problems stop the service from serving predictions at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ModelError::ArtifactMissing { .. }
                | ModelError::ArtifactInvalid { .. }
                | ModelError::ArtifactMismatch(_)
                | ModelError::InvalidModel(_)
                | ModelError::InvalidSchema(_)
        )
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        500
    }
}
