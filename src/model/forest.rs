//! Random forest classifier
//!
//! JSON export of a trained forest of binary decision trees. Each tree is a
//! flat node array with the root at index 0:
//!
//! ```json
//! { "n_features": 2, "n_classes": 3, "trees": [ { "nodes": [
//!     { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
//!     { "value": [10, 0, 2] },
//!     { "value": [0, 3, 9] }
//! ] } ] }
//! ```
//!
//! A split sends a sample left when `x[feature] <= threshold`. Leaves hold
//! per-class weights (sample counts or fractions). The forest's
//! probabilities are the mean of the normalized leaf distributions.

use serde::{Deserialize, Serialize};

use crate::preprocessing::EncodedFeatureVector;

use super::classifier::{check_width, Classifier};
use super::errors::{ModelError, ModelResult};

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A single decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Checks structure so that evaluation cannot panic or loop
    ///
    /// Children must come after their parent, which rules out cycles.
    fn validate(&self, tree_index: usize, n_features: usize, n_classes: usize) -> ModelResult<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidModel(format!("tree {} has no nodes", tree_index)));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} node {} splits on feature {} of {}",
                            tree_index, i, feature, n_features
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} node {} has a NaN threshold",
                            tree_index, i
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(ModelError::InvalidModel(format!(
                                "tree {} node {} has invalid child {}",
                                tree_index, i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} leaf {} has {} classes, expected {}",
                            tree_index,
                            i,
                            value.len(),
                            n_classes
                        )));
                    }
                    let total: f64 = value.iter().sum();
                    if value.iter().any(|v| *v < 0.0 || !v.is_finite()) || total <= 0.0 {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} leaf {} has no usable weights",
                            tree_index, i
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks from the root to the leaf this sample lands in
    fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// Forest of decision trees voting by averaged class distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Builds and validates a forest
    pub fn new(n_features: usize, n_classes: usize, trees: Vec<DecisionTree>) -> ModelResult<Self> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Parses and validates a forest from its JSON export
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let forest: RandomForest = serde_json::from_str(json)
            .map_err(|e| ModelError::InvalidModel(format!("malformed forest JSON: {}", e)))?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.n_features == 0 {
            return Err(ModelError::InvalidModel("forest has zero features".to_string()));
        }
        if self.n_classes == 0 {
            return Err(ModelError::InvalidModel("forest has zero classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidModel("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features, self.n_classes)?;
        }
        Ok(())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, features: &EncodedFeatureVector) -> ModelResult<Vec<f64>> {
        check_width(self.n_features, features)?;

        let x = features.values();
        let mut probabilities = vec![0.0; self.n_classes];

        for tree in &self.trees {
            let leaf = tree.leaf(x);
            let total: f64 = leaf.iter().sum();
            for (p, weight) in probabilities.iter_mut().zip(leaf) {
                *p += weight / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in probabilities.iter_mut() {
            *p /= n_trees;
        }
        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{align, FeatureSchema, RawRecord};

    fn stump(feature: usize, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    fn vector(values: &[(&str, f64)]) -> EncodedFeatureVector {
        let schema =
            FeatureSchema::new(values.iter().map(|(name, _)| name.to_string()).collect()).unwrap();
        let record: RawRecord = values.iter().map(|(k, v)| (*k, *v)).collect();
        align(&record, &[] as &[&str], &schema)
    }

    #[test]
    fn test_single_stump() {
        let forest =
            RandomForest::new(1, 3, vec![stump(0, 0.5, vec![8.0, 0.0, 2.0], vec![0.0, 1.0, 3.0])])
                .unwrap();

        let low = forest.predict_proba(&vector(&[("x", 0.0)])).unwrap();
        assert_eq!(low, vec![0.8, 0.0, 0.2]);

        let high = forest.predict_proba(&vector(&[("x", 1.0)])).unwrap();
        assert_eq!(high, vec![0.0, 0.25, 0.75]);
        assert_eq!(forest.predict(&vector(&[("x", 1.0)])).unwrap(), 2);
    }

    #[test]
    fn test_threshold_goes_left_on_equal() {
        let forest =
            RandomForest::new(1, 2, vec![stump(0, 0.5, vec![1.0, 0.0], vec![0.0, 1.0])]).unwrap();
        assert_eq!(forest.predict(&vector(&[("x", 0.5)])).unwrap(), 0);
    }

    #[test]
    fn test_trees_are_averaged() {
        let forest = RandomForest::new(
            1,
            2,
            vec![
                stump(0, 0.5, vec![1.0, 0.0], vec![0.0, 1.0]),
                stump(0, 5.0, vec![1.0, 1.0], vec![0.0, 1.0]),
            ],
        )
        .unwrap();

        let p = forest.predict_proba(&vector(&[("x", 1.0)])).unwrap();
        assert_eq!(p, vec![0.25, 0.75]);
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let forest =
            RandomForest::new(2, 2, vec![stump(1, 0.5, vec![1.0, 0.0], vec![0.0, 1.0])]).unwrap();
        let result = forest.predict_proba(&vector(&[("x", 1.0)]));
        assert!(matches!(
            result,
            Err(ModelError::FeatureCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_backward_child_rejected() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf {
                    value: vec![1.0, 0.0],
                },
            ],
        };
        assert!(RandomForest::new(1, 2, vec![tree]).is_err());
    }

    #[test]
    fn test_feature_out_of_range_rejected() {
        let result = RandomForest::new(1, 2, vec![stump(3, 0.5, vec![1.0, 0.0], vec![0.0, 1.0])]);
        assert!(matches!(result, Err(ModelError::InvalidModel(_))));
    }

    #[test]
    fn test_leaf_width_rejected() {
        let result = RandomForest::new(1, 3, vec![stump(0, 0.5, vec![1.0, 0.0], vec![0.0, 1.0])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "n_features": 1,
            "n_classes": 3,
            "trees": [ { "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 1, "right": 2 },
                { "value": [10, 0, 0] },
                { "value": [0, 0, 4] }
            ] } ]
        }"#;
        let forest = RandomForest::from_json_str(json).unwrap();
        assert_eq!(forest.n_trees(), 1);
        assert_eq!(forest.predict(&vector(&[("x", 2.0)])).unwrap(), 2);
    }

    #[test]
    fn test_empty_forest_rejected() {
        let json = r#"{ "n_features": 1, "n_classes": 3, "trees": [] }"#;
        assert!(RandomForest::from_json_str(json).is_err());
    }
}
