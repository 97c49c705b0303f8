//! Model summary for display

use serde::Serialize;

use super::outcome::Outcome;

/// Reported evaluation metrics of the deployed model, in percent
pub const ACCURACY: f64 = 93.84;
pub const PRECISION: f64 = 92.6;
pub const RECALL: f64 = 94.02;
pub const F1_SCORE: f64 = 93.15;

/// Static description of the loaded model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub algorithm: &'static str,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub features: usize,
    pub classes: Vec<Outcome>,
}

impl ModelInfo {
    pub fn new(features: usize) -> Self {
        Self {
            algorithm: "Random Forest Classifier",
            accuracy: ACCURACY,
            precision: PRECISION,
            recall: RECALL,
            f1_score: F1_SCORE,
            features,
            classes: Outcome::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_serializes_classes_as_labels() {
        let json = serde_json::to_value(ModelInfo::new(240)).unwrap();
        assert_eq!(json["features"], 240);
        assert_eq!(json["algorithm"], "Random Forest Classifier");
        assert_eq!(
            json["classes"],
            serde_json::json!(["Dropout", "Enrolled", "Graduate"])
        );
    }
}
