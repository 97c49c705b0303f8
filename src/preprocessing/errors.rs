//! # Preprocessing Errors
//!
//! Alignment itself never fails. The only errors here come from building
//! a feature schema out of an artifact.

use thiserror::Error;

/// Result type for preprocessing operations
pub type PreprocessingResult<T> = Result<T, PreprocessingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessingError {
    /// Schema has no columns
    #[error("Feature schema is empty")]
    EmptySchema,

    /// The same column appears twice
    #[error("Feature schema lists column '{0}' more than once")]
    DuplicateColumn(String),
}
