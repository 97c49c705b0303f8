//! Prediction report
//!
//! ```json
//! {
//!   "timestamp": "2024-05-01 14:03:22",
//!   "prediction": "Graduate",
//!   "confidence": "87.0%",
//!   "student_data": { "Age at enrollment": 20, "...": 0 }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::LastPrediction;
use crate::model::{Outcome, PredictionResult};
use crate::preprocessing::RawRecord;

use super::errors::{ExportError, ExportResult};

/// Downloadable summary of one prediction
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub timestamp: String,
    pub prediction: Outcome,
    pub confidence: String,
    /// The record the prediction was made from
    pub student_data: RawRecord,
}

impl ExportReport {
    pub fn new(record: &RawRecord, result: &PredictionResult, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            prediction: result.outcome,
            confidence: result.confidence_percent(),
            student_data: record.clone(),
        }
    }

    /// Report for a session's cached prediction
    pub fn from_last(last: Option<&LastPrediction>, at: DateTime<Utc>) -> ExportResult<Self> {
        let last = last.ok_or(ExportError::NoPrediction)?;
        Ok(Self::new(&last.record, &last.result, at))
    }

    /// Pretty-printed JSON body
    pub fn to_json(&self) -> ExportResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

/// `student_prediction_YYYYMMDD_HHMMSS.json`
pub fn file_name(at: DateTime<Utc>) -> String {
    format!("student_prediction_{}.json", at.format("%Y%m%d_%H%M%S"))
}
