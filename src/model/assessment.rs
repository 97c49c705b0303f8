//! Full assessment of one student record
//!
//! Combines the advisory checks, the prediction and the follow-up
//! recommendations into what a client displays.

use serde::Serialize;

use crate::observability::{log_event_with_fields, Event};
use crate::preprocessing::RawRecord;
use crate::validation::Validator;

use super::errors::ModelResult;
use super::outcome::{ConfidenceLevel, Outcome, OutcomeProbabilities};
use super::predictor::{PredictionResult, Predictor};
use super::recommendations::{recommendations, Recommendation};

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub outcome: Outcome,
    pub headline: &'static str,
    pub confidence: f64,
    /// e.g. `"87.0%"`
    pub confidence_percent: String,
    pub confidence_level: ConfidenceLevel,
    pub probabilities: OutcomeProbabilities,
    /// Advisory findings; never block the prediction
    pub warnings: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    /// Category indicators the model has never seen
    pub dropped_categories: Vec<String>,
}

/// Validates, predicts and recommends
///
/// Returns the raw result as well so callers can cache it for export.
pub fn assess(
    predictor: &Predictor,
    validator: &Validator,
    record: &RawRecord,
) -> ModelResult<(Assessment, PredictionResult)> {
    let warnings = validator.validate(record);
    if !warnings.is_empty() {
        let joined = warnings.join("; ");
        log_event_with_fields(Event::ValidationWarnings, &[("warnings", joined.as_str())]);
    }

    let prediction = predictor.predict(record)?;
    for column in &prediction.alignment.unknown_categories {
        log_event_with_fields(Event::UnknownCategoryDropped, &[("column", column.as_str())]);
    }

    let result = prediction.result;
    let confidence = format!("{:.4}", result.confidence());
    let zero_filled = prediction.alignment.zero_filled.to_string();
    log_event_with_fields(
        Event::PredictionComplete,
        &[
            ("confidence", confidence.as_str()),
            ("outcome", result.outcome.as_str()),
            ("zero_filled", zero_filled.as_str()),
        ],
    );

    let assessment = Assessment {
        outcome: result.outcome,
        headline: result.outcome.headline(),
        confidence: result.confidence(),
        confidence_percent: result.confidence_percent(),
        confidence_level: result.confidence_level(),
        probabilities: result.probabilities,
        warnings,
        recommendations: recommendations(result.outcome, record),
        dropped_categories: prediction.alignment.unknown_categories,
    };

    Ok((assessment, result))
}
