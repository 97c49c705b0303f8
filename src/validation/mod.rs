//! # Validation
//!
//! Advisory sanity checks over a raw record. Findings are surfaced to the
//! user but never stop a prediction.

mod validator;

pub use validator::{validate, Semester, ValidationRules, ValidationWarning, Validator};
