//! # Model
//!
//! Trained classifier, its artifacts and everything derived from a
//! prediction.
//!
//! The classifier is loaded once at startup. Any artifact failure is
//! fatal: the service refuses to start rather than predict with a model
//! that does not match its feature schema.

mod artifacts;
mod assessment;
mod classifier;
mod errors;
mod forest;
mod info;
mod outcome;
mod predictor;
mod recommendations;

pub use artifacts::{ArtifactPaths, ModelArtifacts, PreprocessingInfo};
pub use assessment::{assess, Assessment};
pub use classifier::{argmax, Classifier};
pub use errors::{ModelError, ModelResult};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use info::ModelInfo;
pub use outcome::{ConfidenceLevel, Outcome, OutcomeProbabilities, TargetMapping};
pub use predictor::{Prediction, PredictionResult, Predictor};
pub use recommendations::{recommendations, Recommendation};
