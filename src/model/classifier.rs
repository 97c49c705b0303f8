//! Classifier contract
//!
//! The trained model is opaque to the rest of the crate. Anything that can
//! score an encoded vector into per-class probabilities can sit behind
//! this trait.

use crate::preprocessing::EncodedFeatureVector;

use super::errors::{ModelError, ModelResult};

/// A trained multi-class classifier
pub trait Classifier: Send + Sync {
    /// Width of the input vector the model was trained on
    fn n_features(&self) -> usize;

    /// Number of classes in the probability output
    fn n_classes(&self) -> usize;

    /// Per-class probabilities, indexed by label index
    fn predict_proba(&self, features: &EncodedFeatureVector) -> ModelResult<Vec<f64>>;

    /// Most probable label index
    fn predict(&self, features: &EncodedFeatureVector) -> ModelResult<usize> {
        let probabilities = self.predict_proba(features)?;
        argmax(&probabilities).ok_or(ModelError::InvalidProbabilities(0))
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn n_features(&self) -> usize {
        (**self).n_features()
    }

    fn n_classes(&self) -> usize {
        (**self).n_classes()
    }

    fn predict_proba(&self, features: &EncodedFeatureVector) -> ModelResult<Vec<f64>> {
        (**self).predict_proba(features)
    }

    fn predict(&self, features: &EncodedFeatureVector) -> ModelResult<usize> {
        (**self).predict(features)
    }
}

/// Index of the largest value; the first one wins on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().copied().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Checks the vector width against the classifier's
pub(crate) fn check_width(expected: usize, features: &EncodedFeatureVector) -> ModelResult<()> {
    if features.len() != expected {
        return Err(ModelError::FeatureCountMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[0.9, 0.05, 0.05]), Some(0));
        assert_eq!(argmax(&[]), None);
    }
}
