//! Feature schema and encoded vectors
//!
//! The schema is the ordered column list the classifier was trained on.
//! The classifier binds features by position, so the order here is the
//! contract.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::errors::{PreprocessingError, PreprocessingResult};

/// Ordered, duplicate-free list of feature columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Arc<[String]>,
}

impl FeatureSchema {
    /// Builds a schema, rejecting empty and duplicated column lists
    pub fn new(columns: Vec<String>) -> PreprocessingResult<Self> {
        if columns.is_empty() {
            return Err(PreprocessingError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(PreprocessingError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self {
            columns: columns.into(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(crate) fn shared_columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }
}

/// Numeric vector laid out exactly like a [`FeatureSchema`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedFeatureVector {
    #[serde(skip)]
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl EncodedFeatureVector {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column names, in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(column, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
