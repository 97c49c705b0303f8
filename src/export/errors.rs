//! # Export Errors

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The session has not made a prediction yet
    #[error("No prediction to export; run a prediction first")]
    NoPrediction,

    /// Report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Serialization(String),
}

impl ExportError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ExportError::NoPrediction => 404,
            ExportError::Serialization(_) => 500,
        }
    }
}
