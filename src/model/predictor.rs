//! Prediction pipeline
//!
//! Raw record in, labelled outcome with probabilities out. The predictor
//! owns the classifier together with the schema and mappings it was
//! trained with, so the three can never drift apart at runtime.

use serde::{Deserialize, Serialize};

use crate::preprocessing::{align_with_report, AlignmentReport, EncodedFeatureVector, FeatureSchema, RawRecord};

use super::artifacts::ModelArtifacts;
use super::classifier::Classifier;
use super::errors::{ModelError, ModelResult};
use super::outcome::{ConfidenceLevel, Outcome, OutcomeProbabilities, TargetMapping};

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub outcome: Outcome,
    pub probabilities: OutcomeProbabilities,
}

impl PredictionResult {
    /// Probability of the most likely outcome
    pub fn confidence(&self) -> f64 {
        self.probabilities.max()
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence())
    }

    /// Confidence as a percentage with one decimal, e.g. `"87.0%"`
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence() * 100.0)
    }
}

/// A prediction together with what alignment dropped or filled
#[derive(Debug, Clone)]
pub struct Prediction {
    pub result: PredictionResult,
    pub alignment: AlignmentReport,
}

/// Aligns records and classifies them
pub struct Predictor {
    classifier: Box<dyn Classifier>,
    schema: FeatureSchema,
    categorical: Vec<String>,
    targets: TargetMapping,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("schema", &self.schema)
            .field("categorical", &self.categorical)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

impl Predictor {
    /// Builds a predictor, checking the classifier against the schema
    pub fn new(
        classifier: Box<dyn Classifier>,
        schema: FeatureSchema,
        categorical: Vec<String>,
        targets: TargetMapping,
    ) -> ModelResult<Self> {
        if classifier.n_features() != schema.len() {
            return Err(ModelError::ArtifactMismatch(format!(
                "classifier expects {} features but schema has {}",
                classifier.n_features(),
                schema.len()
            )));
        }
        if classifier.n_classes() != Outcome::ALL.len() {
            return Err(ModelError::ArtifactMismatch(format!(
                "classifier has {} classes, expected {}",
                classifier.n_classes(),
                Outcome::ALL.len()
            )));
        }

        Ok(Self {
            classifier,
            schema,
            categorical,
            targets,
        })
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> ModelResult<Self> {
        Self::new(
            Box::new(artifacts.classifier),
            artifacts.schema,
            artifacts.categorical,
            artifacts.targets,
        )
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }

    /// Encodes a record the way the classifier expects
    pub fn encode(&self, record: &RawRecord) -> (EncodedFeatureVector, AlignmentReport) {
        align_with_report(record, &self.categorical, &self.schema)
    }

    /// Classifies a raw record
    pub fn predict(&self, record: &RawRecord) -> ModelResult<Prediction> {
        let (features, alignment) = self.encode(record);

        let label = self.classifier.predict(&features)?;
        let probabilities = self.classifier.predict_proba(&features)?;

        let result = PredictionResult {
            outcome: self.targets.outcome(label)?,
            probabilities: OutcomeProbabilities::from_classes(&probabilities, &self.targets)?,
        };

        Ok(Prediction { result, alignment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::{DecisionTree, RandomForest, TreeNode};

    fn predictor() -> Predictor {
        let schema = FeatureSchema::new(vec![
            "Age at enrollment".to_string(),
            "Debtor_1".to_string(),
        ])
        .unwrap();

        // Debtors drop out, everyone else graduates
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 1,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    value: vec![1.0, 1.0, 8.0],
                },
                TreeNode::Leaf {
                    value: vec![9.0, 1.0, 0.0],
                },
            ],
        };
        let forest = RandomForest::new(2, 3, vec![tree]).unwrap();

        Predictor::new(
            Box::new(forest),
            schema,
            vec!["Debtor".to_string()],
            TargetMapping::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_predict_graduate() {
        let record = RawRecord::new().with("Age at enrollment", 19).with("Debtor", 0);
        let prediction = predictor().predict(&record).unwrap();

        assert_eq!(prediction.result.outcome, Outcome::Graduate);
        assert_eq!(prediction.result.probabilities.graduate, 0.8);
        assert_eq!(prediction.result.confidence_level(), ConfidenceLevel::High);
        assert_eq!(prediction.result.confidence_percent(), "80.0%");
        assert_eq!(prediction.alignment.dropped, vec!["Debtor_0".to_string()]);
    }

    #[test]
    fn test_predict_dropout() {
        let record = RawRecord::new().with("Age at enrollment", 19).with("Debtor", 1);
        let prediction = predictor().predict(&record).unwrap();

        assert_eq!(prediction.result.outcome, Outcome::Dropout);
        assert!(prediction.alignment.dropped.is_empty());
    }

    #[test]
    fn test_width_mismatch_rejected_at_construction() {
        let forest = RandomForest::new(
            3,
            3,
            vec![DecisionTree {
                nodes: vec![TreeNode::Leaf {
                    value: vec![1.0, 1.0, 1.0],
                }],
            }],
        )
        .unwrap();
        let schema = FeatureSchema::new(vec!["a".to_string()]).unwrap();

        let result = Predictor::new(Box::new(forest), schema, vec![], TargetMapping::default());
        assert!(matches!(result, Err(ModelError::ArtifactMismatch(_))));
    }
}
