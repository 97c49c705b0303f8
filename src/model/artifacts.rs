//! Model artifact loading
//!
//! Three files make up a deployable model:
//! - the classifier (random forest JSON)
//! - preprocessing metadata (categorical columns, target mapping)
//! - the feature names, i.e. the feature schema
//!
//! All three must load and agree, or the service does not start.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::CATEGORICAL_FIELDS;
use crate::preprocessing::FeatureSchema;

use super::classifier::Classifier;
use super::errors::{ModelError, ModelResult};
use super::forest::RandomForest;
use super::outcome::TargetMapping;

/// Where the model artifacts live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_model_path")]
    pub model: PathBuf,

    #[serde(default = "default_preprocessing_path")]
    pub preprocessing: PathBuf,

    #[serde(default = "default_feature_names_path")]
    pub feature_names: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("random_forest_model.json")
}

fn default_preprocessing_path() -> PathBuf {
    PathBuf::from("preprocessing_info.json")
}

fn default_feature_names_path() -> PathBuf {
    PathBuf::from("feature_names.json")
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            preprocessing: default_preprocessing_path(),
            feature_names: default_feature_names_path(),
        }
    }
}

impl ArtifactPaths {
    /// Default file names inside a directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(default_model_path()),
            preprocessing: dir.join(default_preprocessing_path()),
            feature_names: dir.join(default_feature_names_path()),
        }
    }
}

/// Preprocessing metadata as exported at training time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessingInfo {
    /// Copy of the feature schema; must match the feature-names artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    /// Label index (as string key) to outcome label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_reverse_mapping: Option<BTreeMap<String, String>>,

    /// Fields expanded into indicator columns
    #[serde(default = "default_categorical_columns")]
    pub categorical_columns: Vec<String>,
}

fn default_categorical_columns() -> Vec<String> {
    CATEGORICAL_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Everything needed to build a predictor
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub classifier: RandomForest,
    pub schema: FeatureSchema,
    pub categorical: Vec<String>,
    pub targets: TargetMapping,
}

impl ModelArtifacts {
    /// Loads and cross-checks all three artifacts
    pub fn load(paths: &ArtifactPaths) -> ModelResult<Self> {
        let classifier_json = read_artifact(&paths.model)?;
        let classifier =
            RandomForest::from_json_str(&classifier_json).map_err(|e| ModelError::ArtifactInvalid {
                path: paths.model.display().to_string(),
                reason: e.to_string(),
            })?;

        let info: PreprocessingInfo = read_json(&paths.preprocessing)?;
        let feature_names: Vec<String> = read_json(&paths.feature_names)?;

        if let Some(info_names) = &info.feature_names {
            if info_names != &feature_names {
                return Err(ModelError::ArtifactMismatch(format!(
                    "{} and {} list different feature names",
                    paths.preprocessing.display(),
                    paths.feature_names.display()
                )));
            }
        }

        let schema = FeatureSchema::new(feature_names)?;

        if classifier.n_features() != schema.len() {
            return Err(ModelError::ArtifactMismatch(format!(
                "model expects {} features but schema has {}",
                classifier.n_features(),
                schema.len()
            )));
        }

        let targets = match &info.target_reverse_mapping {
            Some(labels) => TargetMapping::from_labels(labels)?,
            None => TargetMapping::default(),
        };

        Ok(Self {
            classifier,
            schema,
            categorical: info.categorical_columns,
            targets,
        })
    }
}

fn read_artifact(path: &Path) -> ModelResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ModelError::ArtifactMissing {
            path: path.display().to_string(),
        },
        _ => ModelError::ArtifactInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ModelResult<T> {
    let content = read_artifact(path)?;
    serde_json::from_str(&content).map_err(|e| ModelError::ArtifactInvalid {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FOREST: &str = r#"{
        "n_features": 2,
        "n_classes": 3,
        "trees": [ { "nodes": [
            { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
            { "value": [1, 0, 0] },
            { "value": [0, 0, 1] }
        ] } ]
    }"#;

    fn write_artifacts(dir: &TempDir, info: &str, names: &str) -> ArtifactPaths {
        let paths = ArtifactPaths::in_dir(dir.path());
        fs::write(&paths.model, FOREST).unwrap();
        fs::write(&paths.preprocessing, info).unwrap();
        fs::write(&paths.feature_names, names).unwrap();
        paths
    }

    #[test]
    fn test_load_complete_artifacts() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(
            &dir,
            r#"{"feature_names": ["Gender_1", "Age at enrollment"],
                "target_reverse_mapping": {"0": "Dropout", "1": "Enrolled", "2": "Graduate"},
                "categorical_columns": ["Gender"]}"#,
            r#"["Gender_1", "Age at enrollment"]"#,
        );

        let artifacts = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(artifacts.schema.len(), 2);
        assert_eq!(artifacts.categorical, vec!["Gender".to_string()]);
        assert_eq!(artifacts.targets, TargetMapping::default());
    }

    #[test]
    fn test_defaults_when_metadata_sparse() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, "{}", r#"["a", "b"]"#);

        let artifacts = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(artifacts.categorical.len(), CATEGORICAL_FIELDS.len());
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, "{}", r#"["a", "b"]"#);
        fs::remove_file(&paths.model).unwrap();

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactMissing { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_feature_name_disagreement() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, r#"{"feature_names": ["b", "a"]}"#, r#"["a", "b"]"#);

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactMismatch(_)));
    }

    #[test]
    fn test_width_disagreement() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, "{}", r#"["a", "b", "c"]"#);

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactMismatch(_)));
    }

    #[test]
    fn test_label_index_gap_is_fatal() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(
            &dir,
            r#"{"target_reverse_mapping": {"0": "Dropout", "1": "Enrolled", "7": "Graduate"}}"#,
            r#"["a", "b"]"#,
        );

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactMismatch(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, "{", r#"["a", "b"]"#);

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactInvalid { .. }));
    }
}
